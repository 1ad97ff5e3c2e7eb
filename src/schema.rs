/// Column-name constants for the village dataset.
/// Single source of truth - exported to Python via PyO3.

// ── Identifier columns ──────────────────────────────────────────────────────
pub mod identity {
    pub const PROVINCE: &str = "PROVINSI";
    pub const REGENCY: &str = "KAB_KOTA";
    pub const DISTRICT: &str = "KECAMATAN";
    pub const VILLAGE: &str = "DESA";

    pub const ALL: [&str; 4] = [PROVINCE, REGENCY, DISTRICT, VILLAGE];
}

// ── Geometry payload (WKT, carried through untouched) ───────────────────────
pub mod geometry {
    pub const GEOMETRY: &str = "geometry";
}

// ── Numeric attribute columns ───────────────────────────────────────────────
pub mod attribute {
    pub const POPULATION: &str = "JUMLAH_PENDUDUK";
    pub const PRIMARY_GRADUATES: &str = "TAMAT_SD";
    pub const HOUSEHOLDS: &str = "JUMLAH_KK";
    pub const DENSITY: &str = "KEPADATAN";
    pub const CHRISTIAN: &str = "KRISTEN";
    pub const CATHOLIC: &str = "KATOLIK";
    pub const HINDU: &str = "HINDU";
    pub const BUDDHIST: &str = "BUDHA";
    pub const CONFUCIAN: &str = "KONGHUCU";
}

// ── Derived columns ─────────────────────────────────────────────────────────
pub mod derived {
    /// Prefix marking a potential-class column as a weight-eligible criterion.
    pub const CRITERION_PREFIX: &str = "BOBOT_";
    pub const TOTAL_SCORE: &str = "Total_Score";
    pub const RECOMMENDATION: &str = "REKOMENDASI";

    /// Name of the potential-class column derived from `source`.
    pub fn criterion_column(source: &str) -> String {
        format!("{CRITERION_PREFIX}{source}")
    }
}
