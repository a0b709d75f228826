//! JSON body extractor with field validation.
//!
//! Rejections use the same `{"error": msg}` body as every other failure:
//! an unreadable body is 400, a readable body that breaks a field rule is 422.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use stayvista_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection_message(&rejection))))?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!(validation_message(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON".to_string(),
        JsonRejection::JsonDataError(_) => missing_field(&rejection.body_text())
            .map(|field| format!("{field} is required"))
            .unwrap_or_else(|| "request body has a field of the wrong type".to_string()),
        _ => "request body could not be read".to_string(),
    }
}

/// Dotted path of the first missing field named in a deserialization error,
/// e.g. `guest.email` for `"...: guest: missing field `email` at line 1"`.
fn missing_field(detail: &str) -> Option<String> {
    let (before, after) = detail.split_once("missing field `")?;
    let field = after.split('`').next()?;

    let parent = before
        .trim_end()
        .trim_end_matches(':')
        .rsplit(": ")
        .next()
        .filter(|path| !path.is_empty() && !path.contains(char::is_whitespace));

    Some(match parent {
        Some(parent) => format!("{parent}.{field}"),
        None => field.to_string(),
    })
}

/// Flattens nested validation errors into one sorted, comma-separated line.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{path} is invalid"))
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;
    use stayvista_models::NewRoom;

    #[derive(Debug, Deserialize, Validate)]
    struct Contact {
        #[validate(email(message = "email must be valid"))]
        email: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Reservation {
        #[validate(nested)]
        guest: Contact,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = ValidatedJson::<Contact>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "email is required");
    }

    #[tokio::test]
    async fn test_missing_nested_field_names_its_path() {
        let err = ValidatedJson::<Reservation>::from_request(json_request(r#"{"guest":{}}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "guest.email is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = ValidatedJson::<Contact>::from_request(json_request("{\"email\":"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "request body is not valid JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email":"a@x.com"}"#))
            .unwrap();

        let err = ValidatedJson::<Contact>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn test_invalid_value_is_unprocessable() {
        let err = ValidatedJson::<Contact>::from_request(json_request(r#"{"email":"nope"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error.to_string(), "email must be valid");
    }

    #[tokio::test]
    async fn test_invalid_host_email_on_room_is_reported() {
        let err = ValidatedJson::<NewRoom>::from_request(
            json_request(r#"{"title":"Loft","host":{"email":"nope"}}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error.to_string(), "host.email must be a valid email");
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(contact) =
            ValidatedJson::<Contact>::from_request(json_request(r#"{"email":"a@x.com"}"#), &())
                .await
                .unwrap();
        assert_eq!(contact.email, "a@x.com");
    }

    #[test]
    fn test_missing_field_paths() {
        assert_eq!(
            missing_field("Failed to deserialize the JSON body into the target type: missing field `price` at line 1 column 2"),
            Some("price".to_string())
        );
        assert_eq!(
            missing_field("Failed to deserialize the JSON body into the target type: host: missing field `email` at line 1 column 12"),
            Some("host.email".to_string())
        );
        assert_eq!(missing_field("invalid type: string"), None);
    }
}
