/// Listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.refugerestrooms.org/api/v1/restrooms";

/// File names
pub const DEFAULT_OUTPUT_FILE: &str = "refuge_data.csv";

/// Pagination query parameters
pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";

/// Fetch defaults
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Truncation applied to unexpected response bodies in diagnostics
pub const DIAGNOSTIC_PREVIEW_CHARS: usize = 500;

/// Source record fields
pub const FIELD_NAME: &str = "name";
pub const FIELD_STREET: &str = "street";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";

/// Persisted table columns
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_ADDRESS: &str = "address";
pub const COLUMN_LATITUDE: &str = "latitude";
pub const COLUMN_LONGITUDE: &str = "longitude";
pub const TABLE_COLUMNS: [&str; 4] = [
    COLUMN_NAME,
    COLUMN_ADDRESS,
    COLUMN_LATITUDE,
    COLUMN_LONGITUDE,
];

/// WGS84 bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
