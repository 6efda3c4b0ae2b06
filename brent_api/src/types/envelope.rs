use serde::{Deserialize, Serialize};

/// The `{ "data": T }` envelope every resource responds with.
///
/// `data` may be `null` or missing entirely; both deserialize to `None`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub data: Option<T>,
}
