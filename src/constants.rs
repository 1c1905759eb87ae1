//! Service endpoints and fixed query parameters shared across the crate.

// NASA Exoplanet Archive TAP endpoint (synchronous queries)
pub const EXOPLANET_ARCHIVE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";
pub const EXOPLANET_ARCHIVE_QUERY: &str =
    "select distinct tic_id from pscomppars where tic_id is not null";
pub const EXOPLANET_ARCHIVE_MAXREC: u64 = 100_000;
pub const EXOPLANET_ARCHIVE_TIC_FIELD: &str = "tic_id";

// MAST portal API
pub const MAST_URL: &str = "https://mast.stsci.edu/api/v0/invoke";
pub const MAST_SERVICE: &str = "Mast.Caom.Filtered";
pub const MAST_PAGESIZE: u64 = 500_000;
pub const MAST_MAX_POLLS: u32 = 30;
pub const MAST_TARGET_NAME_COLUMN: &str = "target_name";
pub const MAST_EXPTIME_COLUMN: &str = "t_exptime";

/// Fixed criteria for TESS light curves: (paramName, value)
pub const MAST_CRITERIA: [(&str, &str); 3] = [
    ("project", "TESS"),
    ("dataproduct_type", "timeseries"),
    ("obs_collection", "TESS"),
];

pub const HTTP_TIMEOUT_SECONDS: u64 = 60;

/// Textual prefix carried by catalog identifiers ("TIC 12345")
pub const TIC_PREFIX: &str = "TIC";

// Output
pub const DEFAULT_OUTPUT_PATH: &str = "tess_no_planets.csv";
pub const DEFAULT_CONFIG_PATH: &str = "tess_no_planets.toml";
pub const OUTPUT_HEADER: [&str; 2] = ["tic_id", "cadence"];

// Environment overrides
pub const ENV_ARCHIVE_URL: &str = "TESS_EXOPLANET_ARCHIVE_URL";
pub const ENV_MAST_URL: &str = "TESS_MAST_URL";
pub const ENV_HTTP_TIMEOUT: &str = "TESS_HTTP_TIMEOUT_SECONDS";
