//! JSON body extractor that runs `validator` rules.

use std::error::Error as _;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use pitchhub_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but the body must also pass its `#[validate]` rules.
///
/// The first failing field (alphabetically) becomes the error's field.
/// A body that parses as JSON but not as `T` is keyed by the top-level
/// field serde was reading when it failed.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_app_error)?;
        value.validate().map_err(to_app_error)?;
        Ok(Self(value))
    }
}

fn rejection_to_app_error(rejection: JsonRejection) -> AppError {
    let field = match &rejection {
        JsonRejection::JsonDataError(err) => err
            .source()
            .and_then(|source| field_from_data_error(&source.to_string())),
        _ => None,
    };
    let error = AppError::validation(rejection.body_text());
    match field {
        Some(field) => error.on_field(field),
        None => error,
    }
}

/// Top-level field named by a deserialization error.
///
/// Errors below the root read `path: message`. A missing field is a root
/// error and names the field in backticks instead.
fn field_from_data_error(detail: &str) -> Option<String> {
    let field = match detail.strip_prefix("missing field `") {
        Some(rest) => rest.split('`').next()?,
        None => {
            let (path, _) = detail.split_once(": ")?;
            path.split(['.', '[']).next()?
        }
    };
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then(|| field.to_string())
}

/// Convert validator output into a field-keyed validation error.
pub fn to_app_error(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().cloned().collect();
    fields.sort();

    let Some(field) = fields.into_iter().next() else {
        return AppError::validation("Invalid request body");
    };
    let message = field_errors
        .get(&field)
        .and_then(|errs| errs.first())
        .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Invalid value for {field}"));

    AppError::field(field.to_string(), message)
}
