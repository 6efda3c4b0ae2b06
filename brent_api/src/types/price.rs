use serde::{Deserialize, Serialize};

/// One row of the `/prices` payload.
///
/// `Date` is kept as the raw wire string; parsing happens in the library's
/// boundary adapter together with every other date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Log_Return")]
    pub log_return: f64,
}
