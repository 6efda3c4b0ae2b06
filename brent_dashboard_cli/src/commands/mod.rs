pub mod hover;
pub mod view;

use brent_dashboard_lib::{validation, DateRange};

/// Validates optional `--start`/`--end` values against today's UTC date.
pub(crate) fn range_args(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, brent_dashboard_lib::DashboardError> {
    let today = chrono::Utc::now().date_naive();
    validation::validate_range(start, end, today)
}
