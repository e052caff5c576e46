use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Amount in minor currency units.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PaymentAmount(i64);

impl PaymentAmount {
    pub fn new(amount: impl Into<i64>) -> Self {
        Self(amount.into())
    }
}
