//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use crate::errors::MoodMapError;
    use std::io;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = MoodMapError::Custom("Test error message".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Test error message");
    }

    #[test]
    fn test_config_error() {
        let error = MoodMapError::ConfigError("Invalid configuration".to_string());
        assert!(matches!(error, MoodMapError::ConfigError(_)));
        let display = format!("{}", error);
        assert!(display.contains("configuration"));
    }

    #[test]
    fn test_tone_error() {
        let error = MoodMapError::ToneError("API call failed".to_string());
        assert_eq!(error.to_string(), "Tone analysis error: API call failed");
    }

    #[test]
    fn test_conversation_not_found() {
        let error = MoodMapError::ConversationNotFound("room-1".to_string());
        assert!(error.to_string().contains("room-1"));
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: MoodMapError = io_err.into();

        assert!(matches!(err, MoodMapError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MoodMapError = json_err.into();

        assert!(matches!(err, MoodMapError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: MoodMapError = toml_err.into();

        assert!(matches!(err, MoodMapError::TomlParsing(_)));
    }

    #[test]
    fn test_error_from_url() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: MoodMapError = url_err.into();

        assert!(matches!(err, MoodMapError::InvalidUrl(_)));
    }
}
