use thiserror::Error;

/// Failures reported by a [`SettingsStore`](crate::store::SettingsStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no value set")]
    NotSet,

    #[error("unknown setting {0:?}")]
    Unknown(String),

    #[error("invalid {kind} {value:?}")]
    Invalid { kind: &'static str, value: String },

    #[error("no settings registered")]
    NoSettings,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed options file: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// errno-style status code, used as the process exit status.
    pub fn code(&self) -> i32 {
        match self {
            StoreError::NotSet | StoreError::Unknown(_) | StoreError::NoSettings => 2,
            StoreError::Invalid { .. } => 22,
            StoreError::Io(err) => err.raw_os_error().unwrap_or(5),
            StoreError::Json(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_nonzero() {
        let errors = [
            StoreError::NotSet,
            StoreError::Unknown("x".into()),
            StoreError::Invalid {
                kind: "string",
                value: String::new(),
            },
            StoreError::NoSettings,
            StoreError::Io(std::io::Error::other("disk")),
        ];
        for err in errors {
            assert_ne!(err.code(), 0, "{err}");
        }
    }

    #[test]
    fn io_error_keeps_os_code() {
        let err = StoreError::from(std::io::Error::from_raw_os_error(28));
        assert_eq!(err.code(), 28);
    }
}
