//! Shared query infrastructure: the [`Query`] trait and the [`QueryCommon`] date bounds.

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the date-range bounds.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the inclusive lower bound of the date range.
    fn with_start(mut self, start: DateTime<Utc>) -> Self
    where
        Self: Sized,
    {
        self.get_common().start = Some(start);
        self
    }

    /// Sets the inclusive upper bound of the date range.
    fn with_end(mut self, end: DateTime<Utc>) -> Self
    where
        Self: Sized,
    {
        self.get_common().end = Some(end);
        self
    }
}

/// Date bounds shared by every resource. An absent bound is unbounded on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl QueryCommon {
    /// Appends `start`/`end` to the URL. Absent bounds are omitted entirely.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(start) = self.start {
            url.query_pairs_mut()
                .append_pair("start", &format_bound(start));
        }
        if let Some(end) = self.end {
            url.query_pairs_mut().append_pair("end", &format_bound(end));
        }
        url
    }
}

/// Formats a bound as ISO-8601 UTC with millisecond precision (`2020-01-01T00:00:00.000Z`).
pub fn format_bound(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
