use crate::app::pipeline::PipelineError;
use crate::data::FetchError;

/// Top-level error carried out of `app::run` to `main`.
///
/// Exit codes: 2 for usage/config/IO problems, 4 for API/data failures.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let message = match &err {
            FetchError::Transport { .. } => format!("HTTP error when contacting SUPEN API: {err}"),
            FetchError::Shape { .. } => format!("Unexpected data format: {err}"),
        };
        AppError::new(4, message)
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let PipelineError { horizon, source } = err;
        let inner = AppError::from(source);
        AppError::new(
            inner.exit_code,
            format!("{} horizon failed. {}", horizon.label(), inner.message),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Horizon;

    #[test]
    fn pipeline_errors_map_to_data_exit_code() {
        let err = PipelineError {
            horizon: Horizon::Medium,
            source: FetchError::Shape {
                url: "http://x/36meses".to_string(),
                detail: "no records".to_string(),
            },
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 4);
        assert!(app.to_string().starts_with("Medium term horizon failed."));
        assert!(app.to_string().contains("Unexpected data format"));
    }
}
