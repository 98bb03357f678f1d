//! Domain constants

/// Default base URL for the sevDesk REST API.
pub const DEFAULT_BASE_URL: &str = "https://my.sevdesk.de/api/v1";

/// Minimum interval between any two outgoing gateway requests, in
/// milliseconds. Applies across all endpoints of one gateway instance.
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 100;

/// Delay between consecutive batch submissions, in milliseconds.
/// Composes with the gateway interval; spacing under contention is at
/// least the sum of both.
pub const DEFAULT_PACING_MS: u64 = 200;

/// Request timeout for gateway calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tax rate applied to CSV rows that omit `tax_rate`, in percent.
pub const DEFAULT_TAX_RATE: f64 = 19.0;

/// Quantity applied to CSV rows that omit `quantity`.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Contact label applied to CSV rows that omit `contact_name`.
pub const UNKNOWN_CONTACT_LABEL: &str = "Unknown";

/// Line item description applied to CSV rows that omit `description`.
pub const DEFAULT_ITEM_DESCRIPTION: &str = "Imported item";

/// File name for the persisted batch queue.
pub const QUEUE_FILE_NAME: &str = "invoice_batch.json";
