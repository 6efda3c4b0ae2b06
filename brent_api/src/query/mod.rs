mod common;
pub use self::common::{format_bound, Query, QueryCommon};

mod range;
pub use self::range::RangeQuery;
