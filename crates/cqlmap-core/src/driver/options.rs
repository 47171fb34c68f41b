use super::PageState;

use serde::Deserialize;

/// Execution parameters forwarded verbatim to the driver.
///
/// The mapper only fills `fetch_size` and `page_state` from the mapping
/// options; everything else is passthrough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecOptions {
    pub consistency: Option<Consistency>,

    pub serial_consistency: Option<Consistency>,

    /// Named execution profile configured on the driver
    pub execution_profile: Option<String>,

    pub is_idempotent: Option<bool>,

    /// Client-side write timestamp, in microseconds
    pub timestamp: Option<i64>,

    /// Maximum number of rows per page
    pub fetch_size: Option<u32>,

    /// Continuation token from a previous page
    pub page_state: Option<PageState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Consistency {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    LocalOne,
}
