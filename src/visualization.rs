//! Visualization module: choropleth-ready recommendation report.
//!
//! Produces a self-contained HTML fragment with:
//! - A legend of the four recommendation tiers with their fixed colors and counts
//! - A table of villages, each row tinted with its tier color
//! - An embedded JSON payload (map center/zoom plus per-village tier, color and
//!   untouched WKT geometry) for a client-side map renderer
//!
//! Geometry is never parsed here; it is forwarded as the WKT text it arrived as.

use std::fmt::Write as FmtWrite;

use polars::prelude::*;
use serde::Serialize;

use crate::classifier::Recommendation;
use crate::config::MapConfig;
use crate::error::{Result, SuitabilityError};
use crate::labeler::column_as_f64;
use crate::pipeline::tier_counts;
use crate::schema::derived::{RECOMMENDATION, TOTAL_SCORE};
use crate::schema::{geometry, identity};

// ── Intermediate data structures ────────────────────────────────────────────

#[derive(Serialize)]
struct VillageFeature {
    village: String,
    district: String,
    score: f64,
    tier: u8,
    label: &'static str,
    color: &'static str,
    wkt: String,
}

#[derive(Serialize)]
struct MapPayload<'a> {
    title: &'a str,
    center: [f64; 2],
    zoom: u8,
    legend: Vec<LegendEntry>,
    features: &'a [VillageFeature],
}

#[derive(Serialize)]
struct LegendEntry {
    tier: u8,
    label: &'static str,
    description: &'static str,
    color: &'static str,
    count: usize,
}

// ── Data extraction ─────────────────────────────────────────────────────────

fn extract_features(df: &DataFrame) -> Result<Vec<VillageFeature>> {
    let villages = df.column(identity::VILLAGE)?.str()?;
    let districts = df.column(identity::DISTRICT)?.str()?;
    let geometries = df.column(geometry::GEOMETRY)?.str()?;
    let labels = df.column(RECOMMENDATION)?.str()?;
    let scores = column_as_f64(df, TOTAL_SCORE)?;

    let mut features = Vec::with_capacity(df.height());
    for (i, score) in scores.into_iter().enumerate() {
        let label = labels.get(i).unwrap_or("");
        let tier = Recommendation::from_label(label).ok_or_else(|| {
            SuitabilityError::InvalidData(format!("Unknown recommendation label at row {i}: {label}"))
        })?;
        features.push(VillageFeature {
            village: villages.get(i).unwrap_or("").to_string(),
            district: districts.get(i).unwrap_or("").to_string(),
            score,
            tier: tier.tier(),
            label: tier.label(),
            color: tier.color(),
            wkt: geometries.get(i).unwrap_or("").to_string(),
        });
    }
    Ok(features)
}

fn legend(df: &DataFrame) -> Result<Vec<LegendEntry>> {
    Ok(tier_counts(df)?
        .into_iter()
        .map(|(tier, count)| LegendEntry {
            tier: tier.tier(),
            label: tier.label(),
            description: tier.description(),
            color: tier.color(),
            count,
        })
        .collect())
}

// ── HTML generation ─────────────────────────────────────────────────────────

/// Main entry point: renders the recommendation report for a pipeline result.
pub fn generate_recommendation_html(df: &DataFrame, config: &MapConfig) -> Result<String> {
    if df.height() == 0 {
        return Ok("<div>No villages to visualize.</div>".to_string());
    }

    let features = extract_features(df)?;
    let legend = legend(df)?;

    let mut legend_html = String::new();
    for entry in &legend {
        write!(
            legend_html,
            r##"<li title="{description}"><span style="display:inline-block; width:12px; height:12px; margin-right:6px; background:{color};"></span>{label} ({count})</li>"##,
            color = entry.color,
            description = escape_html(entry.description),
            label = escape_html(entry.label),
            count = entry.count,
        )
        .map_err(|e| SuitabilityError::InvalidData(e.to_string()))?;
    }

    let mut rows_html = String::new();
    for f in &features {
        write!(
            rows_html,
            r##"<tr><td>{village}</td><td>{district}</td><td style="text-align:right;">{score:.6}</td><td style="border-left:6px solid {color};">{label}</td></tr>"##,
            village = escape_html(&f.village),
            district = escape_html(&f.district),
            score = f.score,
            color = f.color,
            label = escape_html(f.label),
        )
        .map_err(|e| SuitabilityError::InvalidData(e.to_string()))?;
    }

    let payload = MapPayload {
        title: &config.title,
        center: [config.center_lat, config.center_lon],
        zoom: config.zoom,
        legend,
        features: &features,
    };
    let payload_json = escape_script(&serde_json::to_string(&payload)?);

    let html = format!(
        r##"<div class="umkm-report" style="font-family:sans-serif; font-size:12px; color:#495057;">
  <h3 style="margin:4px 0;">{title}</h3>
  <div style="font-weight:600;">Kategori Rekomendasi</div>
  <ul style="list-style:none; padding:0; margin:4px 0 8px 0;">{legend_html}</ul>
  <div style="overflow:auto; max-height:600px; border:1px solid #dee2e6; border-radius:4px;">
    <table style="border-collapse:collapse; width:100%;">
      <thead><tr><th>DESA</th><th>KECAMATAN</th><th>Total_Score</th><th>REKOMENDASI</th></tr></thead>
      <tbody>{rows_html}</tbody>
    </table>
  </div>
  <script type="application/json" id="umkm-map-data">{payload_json}</script>
</div>"##,
        title = escape_html(&config.title),
    );

    Ok(html)
}

// ── Escaping helpers ────────────────────────────────────────────────────────

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// JSON inside a <script> block must not close the tag early.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
