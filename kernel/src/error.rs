use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Authentication,
    Validation,
    Infrastructure,
    StateConflict,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Authentication => write!(f, "Missing or rejected credential"),
            KernelError::Validation => write!(f, "Request rejected as invalid"),
            KernelError::Infrastructure => write!(f, "Infrastructure failure"),
            KernelError::StateConflict => write!(f, "Entity was not in the expected state"),
        }
    }
}

impl Context for KernelError {}
