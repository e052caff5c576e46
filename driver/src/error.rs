use error_stack::Report;
use kernel::KernelError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Http(reqwest::Error),
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error(transparent)]
    Serde(serde_json::Error),
}

impl From<reqwest::Error> for DriverError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, reqwest::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Infrastructure))
    }
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Infrastructure))
    }
}

/// Maps a non-success response onto the kernel taxonomy. Validation
/// bodies are attached untouched so the caller can render the
/// field-level detail.
pub(crate) fn status_error(status: StatusCode, body: String) -> Report<KernelError> {
    let context = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => KernelError::Authentication,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            KernelError::Validation
        }
        StatusCode::CONFLICT => KernelError::StateConflict,
        _ => KernelError::Infrastructure,
    };
    let mut report = Report::new(context).attach_printable(format!("remote service returned {status}"));
    if !body.is_empty() {
        report = report.attach_printable(body);
    }
    report
}
