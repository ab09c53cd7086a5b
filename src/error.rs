use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReframeError>;

#[derive(Debug, Error)]
pub enum ReframeError {
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("Metadata '{key}' already defined on {target}")]
    DuplicateAnnotation { target: String, key: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReframeError {
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReframeError::unsupported_method("head");
        assert_eq!(err.to_string(), "Unsupported HTTP method: head");

        let err = ReframeError::DuplicateAnnotation {
            target: "UserController::create".to_string(),
            key: "path".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Metadata 'path' already defined on UserController::create"
        );
    }
}
