use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("console error: {0}")]
    ConsoleError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SaraError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("generation.top_p = 2 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: generation.top_p = 2 is out of range"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::PathError("no home".into());
        assert_eq!(err.to_string(), "path error: no home");

        let err = PlatformError::ConsoleError("not a tty".into());
        assert_eq!(err.to_string(), "console error: not a tty");
    }

    #[test]
    fn sara_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: SaraError = config_err.into();
        assert!(matches!(err, SaraError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn sara_error_from_platform() {
        let err: SaraError = PlatformError::ConsoleError("closed".into()).into();
        assert!(matches!(err, SaraError::Platform(_)));
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn sara_error_backend_display() {
        let err = SaraError::Backend("model unavailable".into());
        assert_eq!(err.to_string(), "backend error: model unavailable");
    }
}
