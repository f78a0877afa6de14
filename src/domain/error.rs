//! Domain error types.

/// Top-level error type for bandtrader.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {name} window {value}: must be at least 1")]
    InvalidWindow { name: &'static str, value: usize },

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("invalid close price {close} at bar {index}")]
    InvalidPrice { index: usize, close: f64 },

    #[error("bars out of order at index {index}: dates must be strictly increasing")]
    UnorderedBars { index: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TraderError {
    /// Process exit status for this error's category.
    pub fn exit_code(&self) -> u8 {
        match self {
            TraderError::Io(_) => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. }
            | TraderError::InvalidWindow { .. }
            | TraderError::InsufficientData { .. } => 2,
            TraderError::InvalidPrice { .. }
            | TraderError::UnorderedBars { .. }
            | TraderError::Data { .. } => 3,
            TraderError::Report { .. } => 4,
        }
    }
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_error_message() {
        let err = TraderError::InvalidWindow {
            name: "short",
            value: 0,
        };
        assert_eq!(err.to_string(), "invalid short window 0: must be at least 1");
    }

    #[test]
    fn insufficient_data_message() {
        let err = TraderError::InsufficientData {
            bars: 10,
            minimum: 50,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: have 10 bars, need 50"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        let io = TraderError::Io(std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), 1);

        let cfg = TraderError::ConfigMissing {
            section: "indicators".into(),
            key: "short_window".into(),
        };
        assert_eq!(cfg.exit_code(), 2);

        let data = TraderError::UnorderedBars { index: 3 };
        assert_eq!(data.exit_code(), 3);

        let report = TraderError::Report {
            reason: "disk full".into(),
        };
        assert_eq!(report.exit_code(), 4);
    }
}
