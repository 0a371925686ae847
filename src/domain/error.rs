//! Domain error types.

/// Top-level error type for marketlens.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("insufficient data for decomposition: have {observations} observations, need {minimum}")]
    Dimension {
        observations: usize,
        minimum: usize,
    },

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

    #[error("no price data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io(_) => 1,
            AnalyzerError::ConfigParse { .. }
            | AnalyzerError::ConfigMissing { .. }
            | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::Data { .. } | AnalyzerError::NoData { .. } => 3,
            AnalyzerError::Dimension { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

impl AnalyzerError {
    pub fn data(reason: impl Into<String>) -> Self {
        AnalyzerError::Data {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn data_error_display() {
        let err = AnalyzerError::data("duplicate date 2024-01-02 for AAPL");
        assert_eq!(
            err.to_string(),
            "data error: duplicate date 2024-01-02 for AAPL"
        );
    }

    #[test]
    fn dimension_error_display() {
        let err = AnalyzerError::Dimension {
            observations: 1,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for decomposition: have 1 observations, need 2"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        let io = AnalyzerError::Io(std::io::Error::other("boom"));
        let config = AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        };
        let data = AnalyzerError::data("hole in matrix");
        let dim = AnalyzerError::Dimension {
            observations: 0,
            minimum: 2,
        };

        // ExitCode has no PartialEq; compare the Debug form.
        assert_eq!(format!("{:?}", ExitCode::from(&io)), format!("{:?}", ExitCode::from(1u8)));
        assert_eq!(format!("{:?}", ExitCode::from(&config)), format!("{:?}", ExitCode::from(2u8)));
        assert_eq!(format!("{:?}", ExitCode::from(&data)), format!("{:?}", ExitCode::from(3u8)));
        assert_eq!(format!("{:?}", ExitCode::from(&dim)), format!("{:?}", ExitCode::from(4u8)));
    }
}
