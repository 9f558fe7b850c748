//! Platform constants
//!
//! Defaults the Baasic REST API applies when a caller does not say otherwise.

// Paging defaults for list/query operations
pub const DEFAULT_SEARCH_QUERY: &str = "";
pub const DEFAULT_PAGE: u32 = 1;
/// Platform default for the maximum number of results per page.
pub const DEFAULT_MAX_NUMBER_OF_RESULTS: u32 = 10;
pub const DEFAULT_SORTING: &str = "";
pub const DEFAULT_EMBED: &str = "";
pub const DEFAULT_FIELDS: &str = "";

// Content negotiation
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;

// Module relative paths
pub const LOGIN_MODULE_PATH: &str = "Login";
pub const METERING_DATA_MODULE_PATH: &str = "metering/data";
pub const METERING_STATISTICS_MODULE_PATH: &str = "metering/statistics";

// Token wire format
pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const SLIDING_OPTION: &str = "sliding";
pub const DEFAULT_TOKEN_SCHEME: &str = "bearer";
