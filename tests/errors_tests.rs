use linkvault::errors::{LinkvaultError, Result};
use linkvault::utils::url_validator::UrlValidationError;
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_alias_in_use_error() {
        let error = LinkvaultError::alias_in_use("docs 已被占用");

        assert!(matches!(error, LinkvaultError::AliasInUse(_)));
        assert!(error.to_string().contains("Alias In Use"));
        assert!(error.to_string().contains("docs 已被占用"));
    }

    #[test]
    fn test_persistence_error() {
        let error = LinkvaultError::persistence("写入失败");

        assert!(matches!(error, LinkvaultError::Persistence(_)));
        assert_eq!(error.to_string(), "Persistence Error: 写入失败");
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            LinkvaultError::alias_in_use(""),
            LinkvaultError::invalid_alias(""),
            LinkvaultError::invalid_url(""),
            LinkvaultError::persistence(""),
            LinkvaultError::corrupt_state(""),
            LinkvaultError::file_operation(""),
            LinkvaultError::config(""),
        ];
        let mut codes: Vec<&str> = all.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(LinkvaultError::alias_in_use("x").is_user_error());
        assert!(LinkvaultError::invalid_alias("x").is_user_error());
        assert!(LinkvaultError::invalid_url("x").is_user_error());

        assert!(!LinkvaultError::persistence("x").is_user_error());
        assert!(!LinkvaultError::corrupt_state("x").is_user_error());
        assert!(!LinkvaultError::file_operation("x").is_user_error());
        assert!(!LinkvaultError::config("x").is_user_error());
    }

    #[test]
    fn test_format_colored_contains_parts() {
        let error = LinkvaultError::corrupt_state("row 3");
        let out = error.format_colored();
        assert!(out.contains("E005"));
        assert!(out.contains("row 3"));
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: LinkvaultError = io.into();
        assert!(matches!(error, LinkvaultError::FileOperation(_)));
        assert!(error.message().contains("gone"));
    }

    #[test]
    fn test_from_url_validation_error() {
        let error: LinkvaultError = UrlValidationError::MissingHost.into();
        assert!(matches!(error, LinkvaultError::InvalidUrl(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/linkvault")?)
        }
        assert!(matches!(
            read_missing(),
            Err(LinkvaultError::FileOperation(_))
        ));
    }

    #[test]
    fn test_is_std_error() {
        let error = LinkvaultError::config("bad");
        let dyn_err: &dyn Error = &error;
        assert!(dyn_err.source().is_none());

        let wrapped = anyhow::Error::new(error);
        assert!(wrapped.to_string().contains("Configuration Error"));
    }
}
