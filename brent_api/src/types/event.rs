use serde::{Deserialize, Serialize};

/// One row of the `/events` calendar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventEntry {
    #[serde(rename = "Start Date")]
    pub start_date: String,

    #[serde(rename = "Event")]
    pub event: String,
}
