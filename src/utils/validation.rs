use crate::utils::error::{PrepError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PrepError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input.path", "frames.json").is_ok());
        assert!(validate_path("input.path", "").is_err());
        assert!(validate_path("input.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("preprocessor.num_landmarks", 21, 1).is_ok());
        assert!(validate_positive_number("preprocessor.num_landmarks", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(21usize);
        assert_eq!(*validate_required_field("n", &present).unwrap(), 21);

        let absent: Option<usize> = None;
        match validate_required_field("preprocessor.num_landmarks", &absent) {
            Err(PrepError::MissingConfigError { field }) => {
                assert_eq!(field, "preprocessor.num_landmarks")
            }
            other => panic!("expected MissingConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.formats", "csv", &["csv", "json"]).is_ok());
        assert!(validate_one_of("output.formats", "tsv", &["csv", "json"]).is_err());
    }
}
