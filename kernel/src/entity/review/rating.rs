use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Star rating, clamped to 1..=5 on construction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Rating(i32);

impl Rating {
    pub fn new(rating: impl Into<i32>) -> Self {
        Self(rating.into().clamp(1, 5))
    }
}

#[cfg(test)]
mod test {
    use super::Rating;

    #[test]
    fn rating_is_clamped() {
        assert_eq!(Rating::new(0), Rating::new(1));
        assert_eq!(Rating::new(3), Rating::new(3));
        assert_eq!(Rating::new(9), Rating::new(5));
    }
}
