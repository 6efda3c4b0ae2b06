//! Library layer for the Brent dashboard: fetch orchestration, boundary
//! normalization, and the chart model builder.
//!
//! Wraps the `brent_api` client with retrying, all-or-nothing retrieval of the
//! four view resources, generation-tagged state publication, and the pure
//! view-model-to-render-spec builder.

pub mod adapter;
pub mod chart;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod session;
pub mod validation;

pub use brent_api;
pub use brent_api::types;
pub use brent_api::{Query, RangeQuery, Resource};

pub use chart::{build_chart, RenderSpec};
pub use config::{DashboardConfig, ReentryPolicy, RetryConfig};
pub use error::{DashboardError, FetchFailure};
pub use model::{ChangePoint, DateRange, EventRecord, PricePoint, StatsSummary, ViewModel};
pub use session::{FetchState, Snapshot, ViewSession, CANCELLED_REASON};
