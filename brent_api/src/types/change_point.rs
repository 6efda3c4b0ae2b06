use serde::{Deserialize, Serialize};

/// The `/change-point` payload: the single detected structural break.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChangePointRecord {
    pub change_date: String,
}
