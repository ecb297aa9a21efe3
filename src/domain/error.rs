//! Domain error types.

/// Top-level error type for swingacademy.
#[derive(Debug, thiserror::Error)]
pub enum AcademyError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("cannot {action} in {section}")]
    InvalidAction { section: String, action: String },

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("no {kind} #{index} (have {available})")]
    UnknownItem {
        kind: String,
        index: usize,
        available: usize,
    },

    #[error("session store error: {reason}")]
    Session { reason: String },

    #[error(transparent)]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AcademyError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AcademyError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<&AcademyError> for std::process::ExitCode {
    fn from(err: &AcademyError) -> Self {
        let code: u8 = match err {
            AcademyError::Io(_) | AcademyError::Export(_) | AcademyError::Session { .. } => 1,
            AcademyError::ConfigParse { .. } | AcademyError::ConfigInvalid { .. } => 2,
            AcademyError::InvalidInput { .. } | AcademyError::InvalidAction { .. } => 3,
            AcademyError::UnknownSection(_) | AcademyError::UnknownItem { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_field() {
        let err = AcademyError::invalid_input("stop_loss", "must be positive");
        assert_eq!(err.to_string(), "invalid stop_loss: must be positive");
    }

    #[test]
    fn unknown_item_message() {
        let err = AcademyError::UnknownItem {
            kind: "pattern".into(),
            index: 7,
            available: 4,
        };
        assert_eq!(err.to_string(), "no pattern #7 (have 4)");
    }

    #[test]
    fn exit_codes_group_by_kind() {
        use std::process::ExitCode;
        let code = |err: &AcademyError| format!("{:?}", ExitCode::from(err));
        let config = AcademyError::ConfigInvalid {
            section: "calculator".into(),
            key: "risk_percent".into(),
            reason: "too high".into(),
        };
        assert_eq!(code(&config), format!("{:?}", ExitCode::from(2u8)));
        let action = AcademyError::InvalidAction {
            section: "Risk Management".into(),
            action: "reveal".into(),
        };
        assert_eq!(code(&action), format!("{:?}", ExitCode::from(3u8)));
        let unknown = AcademyError::UnknownSection("charts".into());
        assert_eq!(code(&unknown), format!("{:?}", ExitCode::from(4u8)));
    }
}
