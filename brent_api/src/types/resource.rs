use std::fmt;

use serde::Serialize;

/// The four range-filtered resources behind one dashboard view.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Prices,
    ChangePoint,
    Events,
    Stats,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Prices,
        Resource::ChangePoint,
        Resource::Events,
        Resource::Stats,
    ];

    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Prices => "/prices",
            Resource::ChangePoint => "/change-point",
            Resource::Events => "/events",
            Resource::Stats => "/stats",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Resource::Prices => "prices",
                Resource::ChangePoint => "change-point",
                Resource::Events => "events",
                Resource::Stats => "stats",
            }
        )
    }
}
