use thiserror::Error;

use crate::config::ConfigError;

/// Failures outside the core state machines. The interactive operations
/// themselves are total: indices wrap, malformed form input falls back to
/// defaults, and a bad pincode is a display branch rather than an error.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("render surface failure: {0}")]
    Surface(String),
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigError;

    use super::RuntimeError;

    #[test]
    fn config_errors_convert_transparently() {
        let error: RuntimeError =
            ConfigError::Validation("carousel.slide_count must be at least 2".to_string()).into();
        assert!(error.to_string().contains("slide_count"));
    }
}
