use chrono::{DateTime, Utc};
use url::Url;

use super::common::{Query, QueryCommon};

/// Date-range filter sent, unchanged, to all four resources of one view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub common: QueryCommon,
}

impl Query for RangeQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl RangeQuery {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            common: QueryCommon { start, end },
        }
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.common.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.common.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use url::Url;

    use crate::query::{Query, RangeQuery};

    #[test]
    fn test_range_query() {
        let url = Url::parse("https://example.com/api/prices").unwrap();
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 3, 31, 12, 30, 0).unwrap();

        insta::assert_snapshot!(
            RangeQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/api/prices"
        );

        insta::assert_snapshot!(
            RangeQuery::default().with_start(start).add_to_url(&url).to_string(),
            @"https://example.com/api/prices?start=2020-01-01T00%3A00%3A00.000Z"
        );

        insta::assert_snapshot!(
            RangeQuery::default().with_end(end).add_to_url(&url).to_string(),
            @"https://example.com/api/prices?end=2020-03-31T12%3A30%3A00.000Z"
        );

        insta::assert_snapshot!(
            RangeQuery::new(Some(start), Some(end)).add_to_url(&url).to_string(),
            @"https://example.com/api/prices?start=2020-01-01T00%3A00%3A00.000Z&end=2020-03-31T12%3A30%3A00.000Z"
        );
    }
}
