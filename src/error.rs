//! 统一错误类型
//!
//! 每个错误都有一个稳定的 snake_case 错误码，便于日志检索

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AccountsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Toml(_) => "toml_error",
            Self::Http(_) => "http_error",
            Self::Config(_) => "invalid_config",
        }
    }
}

pub type AccountsResult<T> = Result<T, AccountsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: AccountsError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert_eq!(err.code(), "io_error");

        let err: AccountsError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), "json_error");

        let err: AccountsError = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert_eq!(err.code(), "toml_error");

        assert_eq!(AccountsError::config("bad").code(), "invalid_config");
    }

    #[test]
    fn test_config_message() {
        assert_eq!(
            AccountsError::config("ACCOUNTS_FILE must not be empty").to_string(),
            "Invalid configuration: ACCOUNTS_FILE must not be empty"
        );
    }
}
