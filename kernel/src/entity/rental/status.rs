use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Approved,
    Completed,
    Canceled,
}

impl RentalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Completed | RentalStatus::Canceled)
    }
}
