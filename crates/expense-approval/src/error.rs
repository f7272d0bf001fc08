use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::expense::{ChainError, ImportError, RequestError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Chain(ChainError),
    Request(RequestError),
    Import(ImportError),
    Output(serde_json::Error),
    Task(tokio::task::JoinError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Chain(err) => write!(f, "approval chain error: {}", err),
            AppError::Request(err) => write!(f, "invalid expense request: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
            AppError::Task(err) => write!(f, "background task failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Chain(err) => Some(err),
            AppError::Request(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Output(err) => Some(err),
            AppError::Task(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ChainError> for AppError {
    fn from(value: ChainError) -> Self {
        Self::Chain(value)
    }
}

impl From<RequestError> for AppError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn serialization_failures_surface_as_output_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let app = AppError::from(err);

        assert!(matches!(app, AppError::Output(_)));
        assert!(app.to_string().starts_with("output error: "));
        assert!(app.source().is_some());
    }

    #[tokio::test]
    async fn panicked_tasks_surface_as_task_errors() {
        let joined = tokio::task::spawn_blocking(|| -> u32 { panic!("worker failed") }).await;
        let app = AppError::from(joined.expect_err("task panicked"));

        assert!(matches!(app, AppError::Task(_)));
        assert!(app.to_string().starts_with("background task failed: "));
    }
}
