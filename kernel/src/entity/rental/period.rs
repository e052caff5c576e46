use error_stack::Report;
use time::Date;
use vodca::References;

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct RentalPeriod {
    start: Date,
    end: Date,
}

impl RentalPeriod {
    /// End must be strictly after start.
    pub fn new(start: Date, end: Date) -> error_stack::Result<Self, KernelError> {
        if end <= start {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("rental end date must be strictly after the start date"));
        }
        Ok(Self { start, end })
    }

    /// Creation-time check only. Existing rentals keep their dates.
    pub fn reject_past_start(&self, today: Date) -> error_stack::Result<(), KernelError> {
        if self.start < today {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("rental start date must not be in the past"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::RentalPeriod;

    #[test]
    fn end_must_follow_start() {
        assert!(RentalPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 10)).is_ok());
        assert!(RentalPeriod::new(date!(2025 - 06 - 10), date!(2025 - 06 - 01)).is_err());
        assert!(RentalPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 01)).is_err());
    }

    #[test]
    fn start_must_not_precede_today() {
        let period = RentalPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 10)).unwrap();
        assert!(period.reject_past_start(date!(2025 - 06 - 01)).is_ok());
        assert!(period.reject_past_start(date!(2025 - 05 - 20)).is_ok());
        assert!(period.reject_past_start(date!(2025 - 06 - 02)).is_err());
    }
}
