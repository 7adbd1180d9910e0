use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::AppError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Turn a schema-validator report into a validation error.
///
/// Understands the two report shapes emitted by JSON-schema validators:
/// `{"errors": [{"path": "/email", "message": "..."}]}` and
/// `{"property": "/email", "message": "..."}`. Anything else, including text
/// that is not JSON at all, yields a validation error with no details.
pub fn parse_validation_error(report: &str) -> AppError {
    let details = serde_json::from_str::<Value>(report)
        .map(|value| field_errors(&value))
        .unwrap_or_default();

    AppError::validation(details)
}

fn field_errors(report: &Value) -> Vec<FieldError> {
    if let Some(issues) = report.get("errors").and_then(Value::as_array) {
        if !issues.is_empty() {
            return issues
                .iter()
                .map(|issue| {
                    let field = issue
                        .get("path")
                        .and_then(Value::as_str)
                        .map(field_name)
                        .unwrap_or_else(|| "unknown".to_string());
                    let message = issue
                        .get("message")
                        .or_else(|| issue.get("summary"))
                        .and_then(Value::as_str)
                        .unwrap_or("Invalid field");
                    FieldError::new(field, message)
                })
                .collect();
        }
    }

    if let Some(property) = report.get("property").and_then(Value::as_str) {
        let message = report
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Validation failed");
        return vec![FieldError::new(field_name(property), message)];
    }

    Vec::new()
}

fn field_name(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn details_of(error: AppError) -> Vec<FieldError> {
        match error {
            AppError::Validation { details, .. } => details,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors_array() {
        let report = r#"{
            "errors": [
                {"path": "/email", "message": "Valid email address is required"},
                {"path": "/name", "summary": "Name cannot be empty"},
                {"message": "Unexpected property"}
            ]
        }"#;

        let details = details_of(parse_validation_error(report));

        assert_eq!(
            details,
            vec![
                FieldError::new("email", "Valid email address is required"),
                FieldError::new("name", "Name cannot be empty"),
                FieldError::new("unknown", "Unexpected property"),
            ]
        );
    }

    #[test]
    fn test_parse_single_property() {
        let report = r#"{"property": "/password", "message": "Password cannot be empty"}"#;

        let details = details_of(parse_validation_error(report));

        assert_eq!(
            details,
            vec![FieldError::new("password", "Password cannot be empty")]
        );
    }

    #[test]
    fn test_parse_property_without_message() {
        let details = details_of(parse_validation_error(r#"{"property": "email"}"#));
        assert_eq!(details, vec![FieldError::new("email", "Validation failed")]);
    }

    #[test]
    fn test_non_json_degrades_to_empty_details() {
        let error = parse_validation_error("Failed to parse the request body as JSON");

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.public_message(), "Validation failed");
        assert!(details_of(error).is_empty());
    }

    #[test]
    fn test_unexpected_shapes_degrade_to_empty_details() {
        for report in ["[]", "42", "null", r#"{"errors": []}"#, r#"{"errors": "nope"}"#] {
            assert!(details_of(parse_validation_error(report)).is_empty(), "{}", report);
        }
    }
}
