use std::collections::BTreeSet;
use std::fs;

use polars::prelude::*;
use tempfile::tempdir;

use umkm_saw::aggregator::vector_normalize;
use umkm_saw::catalog::{self, CriteriaSet};
use umkm_saw::quartile::Quartiles;
use umkm_saw::schema::derived::{CRITERION_PREFIX, RECOMMENDATION, TOTAL_SCORE};
use umkm_saw::{loader, Category, Recommendation, SuitabilityError, SuitabilityPipeline};

fn villages(n: usize) -> DataFrame {
    let names: Vec<String> = (0..n).map(|i| format!("DESA {i}")).collect();
    let num = |f: &dyn Fn(usize) -> f64| -> Vec<f64> { (0..n).map(f).collect() };
    df!(
        "PROVINSI" => vec!["JAWA BARAT"; n],
        "KAB_KOTA" => vec!["CIAMIS"; n],
        "KECAMATAN" => (0..n).map(|i| format!("KEC {}", i % 3)).collect::<Vec<_>>(),
        "DESA" => names,
        "JUMLAH_PENDUDUK" => num(&|i| 1000.0 + ((i * 37) % 11) as f64 * 250.0),
        "TAMAT_SD" => num(&|i| 300.0 + ((i * 13) % 7) as f64 * 40.0),
        "JUMLAH_KK" => num(&|i| 250.0 + ((i * 5) % 9) as f64 * 30.0),
        "KEPADATAN" => num(&|i| 400.0 + ((i * 17) % 13) as f64 * 55.5),
        "KRISTEN" => num(&|i| ((i * 7) % 5) as f64),
        "KATOLIK" => num(&|i| ((i * 3) % 4) as f64),
        "HINDU" => num(&|_| 0.0),
        "BUDHA" => num(&|i| (i % 2) as f64),
        "KONGHUCU" => num(&|i| ((i * 11) % 6) as f64),
        "geometry" => (0..n).map(|i| format!("POINT ({} -7.5)", 108.0 + i as f64 / 100.0)).collect::<Vec<_>>(),
    )
    .unwrap()
}

fn f64_column(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

fn str_column(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

#[test]
fn criterion_columns_equal_weight_keys() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    for category in Category::ALL {
        let result = pipeline.run(category.key(), &villages(12)).unwrap();
        let derived: BTreeSet<String> = result
            .get_column_names_str()
            .into_iter()
            .filter(|c| c.starts_with(CRITERION_PREFIX))
            .map(str::to_string)
            .collect();
        let weights: BTreeSet<String> = category
            .criteria()
            .weight_columns()
            .map(str::to_string)
            .collect();
        assert_eq!(derived, weights, "category {}", category.key());
    }
}

#[test]
fn output_keeps_identifiers_geometry_score_and_label() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let raw = villages(8);
    let result = pipeline.run("sembako", &raw).unwrap();

    assert_eq!(result.height(), 8);
    for name in ["PROVINSI", "KAB_KOTA", "KECAMATAN", "DESA", "geometry", TOTAL_SCORE, RECOMMENDATION] {
        assert!(result.column(name).is_ok(), "missing {name}");
    }
    assert_eq!(str_column(&result, "geometry"), str_column(&raw, "geometry"));
    assert!(result.column("KRISTEN").is_err());
}

#[test]
fn staple_goods_population_scenario() {
    let raw = df!(
        "PROVINSI" => ["P"; 4],
        "KAB_KOTA" => ["K"; 4],
        "KECAMATAN" => ["C"; 4],
        "DESA" => ["A", "B", "C", "D"],
        "JUMLAH_PENDUDUK" => [100.0, 200.0, 300.0, 400.0],
        "TAMAT_SD" => [10.0, 20.0, 30.0, 40.0],
        "JUMLAH_KK" => [1.0, 2.0, 3.0, 4.0],
        "KEPADATAN" => [5.0, 6.0, 7.0, 8.0],
        "geometry" => ["POINT (0 0)"; 4],
    )
    .unwrap();

    let q = Quartiles::compute(&[100.0, 200.0, 300.0, 400.0]).unwrap();
    assert_eq!((q.q1, q.q2, q.q3), (175.0, 250.0, 325.0));

    let pipeline = SuitabilityPipeline::new().unwrap();
    let result = pipeline.run("sembako", &raw).unwrap();
    assert_eq!(
        result.column("BOBOT_JUMLAH_PENDUDUK").unwrap().dtype(),
        &DataType::String
    );
    assert_eq!(
        str_column(&result, "BOBOT_JUMLAH_PENDUDUK"),
        vec!["1", "2", "3", "4"]
    );
    assert_eq!(
        str_column(&result, RECOMMENDATION),
        vec![
            "TIDAK REKOMENDASI",
            "KURANG REKOMENDASI",
            "CUKUP REKOMENDASI",
            "DIREKOMENDASIKAN",
        ]
    );
}

#[test]
fn unknown_category_yields_empty_table() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let result = pipeline.run("unknown_category", &villages(5)).unwrap();
    assert_eq!(result.height(), 0);
}

#[test]
fn empty_input_fails_at_labelling() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let empty = villages(4).head(Some(0));
    assert!(matches!(
        pipeline.run("sembako", &empty),
        Err(SuitabilityError::EmptyInput(_))
    ));
}

#[test]
fn mismatched_weight_table_names_missing_column() {
    static MISMATCHED: CriteriaSet = CriteriaSet {
        columns: &["JUMLAH_PENDUDUK", "KEPADATAN"],
        weights: &[("BOBOT_JUMLAH_PENDUDUK", 0.5), ("BOBOT_TAMAT_SD", 0.5)],
    };

    let err = catalog::validate_criteria(&MISMATCHED).unwrap_err();
    assert!(err.to_string().contains("BOBOT_TAMAT_SD"));

    let pipeline = SuitabilityPipeline::new().unwrap();
    match pipeline.run_with_criteria(&MISMATCHED, &villages(6)) {
        Err(SuitabilityError::MissingColumn(name)) => assert_eq!(name, "BOBOT_TAMAT_SD"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn normalized_criteria_have_unit_norm() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let result = pipeline.run("kuliner_nonis", &villages(10)).unwrap();

    for name in Category::KulinerNonis.criteria().weight_columns() {
        let normalized = vector_normalize(&f64_column(&result, name));
        let sum_sq: f64 = normalized.iter().map(|v| v * v).sum();
        assert!((sum_sq - 1.0).abs() < 1e-9, "{name}: {sum_sq}");
    }
    assert_eq!(vector_normalize(&[0.0; 4]).iter().sum::<f64>(), 0.0);
}

#[test]
fn zero_variance_attribute_is_all_lowest_class() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let result = pipeline.run("kuliner_nonis", &villages(9)).unwrap();
    assert!(str_column(&result, "BOBOT_HINDU").iter().all(|c| c == "1"));
}

#[test]
fn rerunning_is_bit_identical() {
    let pipeline = SuitabilityPipeline::new().unwrap();
    let raw = villages(15);
    let first = pipeline.run("kuliner_nonis", &raw).unwrap();
    let second = pipeline.run("kuliner_nonis", &raw).unwrap();

    let bits = |df: &DataFrame| -> Vec<u64> {
        f64_column(df, TOTAL_SCORE).into_iter().map(f64::to_bits).collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(str_column(&first, RECOMMENDATION), str_column(&second, RECOMMENDATION));
}

#[test]
fn tiers_follow_quartiles_of_the_scored_set() {
    let pipeline = SuitabilityPipeline::new().unwrap();

    for raw in [villages(20), villages(20).head(Some(7))] {
        let result = pipeline.run("sembako", &raw).unwrap();
        let scores = f64_column(&result, TOTAL_SCORE);
        let labels = str_column(&result, RECOMMENDATION);
        let q = Quartiles::compute(&scores).unwrap();

        for (score, label) in scores.iter().zip(&labels) {
            let expected = Recommendation::ALL[q.bucket(*score)];
            assert_eq!(label, expected.label());
        }
    }
}

#[test]
fn csv_file_flows_through_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data_merged.csv");
    fs::write(
        &input,
        "PROVINSI,KAB_KOTA,KECAMATAN,DESA,JUMLAH_PENDUDUK,TAMAT_SD,JUMLAH_KK,KEPADATAN,geometry\n\
         JAWA BARAT,CIAMIS,A,D1,100,10,5,1.5,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\"\n\
         JAWA BARAT,CIAMIS,A,D2,200,40,6,2.5,\"POLYGON ((1 0, 2 0, 2 1, 1 0))\"\n\
         JAWA BARAT,CIAMIS,B,D3,300,30,7,3.5,\"POLYGON ((2 0, 3 0, 3 1, 2 0))\"\n\
         JAWA BARAT,CIAMIS,B,D4,400,20,8,4.5,\"POLYGON ((3 0, 4 0, 4 1, 3 0))\"\n",
    )
    .unwrap();

    let raw = loader::read_villages_csv(&input).unwrap();
    let pipeline = SuitabilityPipeline::new().unwrap();
    let result = pipeline.run("sembako", &raw).unwrap();
    assert_eq!(result.height(), 4);

    let output = dir.path().join("out/recommendations.csv");
    loader::write_csv(&result, &output).unwrap();
    let reread = loader::read_villages_csv(&output).unwrap();
    assert_eq!(reread.height(), 4);
    assert_eq!(str_column(&reread, "DESA"), vec!["D1", "D2", "D3", "D4"]);
    assert_eq!(
        str_column(&reread, "geometry")[0],
        "POLYGON ((0 0, 1 0, 1 1, 0 0))"
    );
}
