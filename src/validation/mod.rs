use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{
    db::models::api::{error_codes, ErrorDetail},
    error::AppError,
};

/// JSON body extractor that deserializes and then runs the payload's
/// `Validate` rules. Any failure rejects with `AppError::Validation`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        let value: T = serde_path_to_error::deserialize(raw).map_err(shape_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(field_details(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn body_rejection(rejection: JsonRejection) -> AppError {
    AppError::validation(vec![ErrorDetail {
        field: None,
        code: error_codes::INVALID_BODY.to_string(),
        message: rejection.body_text(),
    }])
}

/// A well-formed body whose values do not fit the payload type. The detail
/// names the offending key when there is one.
fn shape_rejection(error: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = error.path().to_string();
    let field = if path == "." { None } else { Some(path) };
    AppError::validation(vec![ErrorDetail {
        field,
        code: error_codes::INVALID_TYPE.to_string(),
        message: error.into_inner().to_string(),
    }])
}

/// Flattens validator output into wire details, ordered by field name.
pub fn field_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            let field = camel_case(field);
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.clone()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    details
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Field rules shared by the request DTOs.
pub mod rules {
    use std::borrow::Cow;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use validator::ValidationError;

    use crate::db::enums::{ProjectStatus, TaskPriority, TaskStatus, UnknownVariant, UserRole};
    use crate::db::models::api::error_codes;
    use crate::error::{AppError, AppResult};

    fn enum_error(allowed: String) -> ValidationError {
        let mut error = ValidationError::new(error_codes::INVALID_ENUM);
        error.message = Some(Cow::from(format!("must be one of: {}", allowed)));
        error
    }

    pub fn validate_task_status(value: &str) -> Result<(), ValidationError> {
        TaskStatus::from_str(value)
            .map(|_| ())
            .map_err(|_| enum_error(TaskStatus::allowed()))
    }

    pub fn validate_task_priority(value: &str) -> Result<(), ValidationError> {
        TaskPriority::from_str(value)
            .map(|_| ())
            .map_err(|_| enum_error(TaskPriority::allowed()))
    }

    pub fn validate_project_status(value: &str) -> Result<(), ValidationError> {
        ProjectStatus::from_str(value)
            .map(|_| ())
            .map_err(|_| enum_error(ProjectStatus::allowed()))
    }

    pub fn validate_user_role(value: &str) -> Result<(), ValidationError> {
        UserRole::from_str(value)
            .map(|_| ())
            .map_err(|_| enum_error(UserRole::allowed()))
    }

    /// Serde hook for optional fields that may be omitted but never `null`.
    pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        match Option::<T>::deserialize(deserializer)? {
            Some(value) => Ok(Some(value)),
            None => Err(serde::de::Error::custom("must not be null")),
        }
    }

    /// `#RRGGBB`
    pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
        if color.len() != 7
            || !color.starts_with('#')
            || !color.chars().skip(1).all(|c| c.is_ascii_hexdigit())
        {
            let mut error = ValidationError::new("invalid_color");
            error.message = Some(Cow::from("Color must be hex like #RRGGBB"));
            return Err(error);
        }
        Ok(())
    }

    /// Converts an already validated wire string into its enum. Still
    /// returns a field error so callers never need to unwrap.
    pub fn parse_enum<T>(field: &str, raw: &str) -> AppResult<T>
    where
        T: FromStr<Err = UnknownVariant>,
    {
        raw.parse::<T>().map_err(|e| {
            AppError::invalid_field(field, error_codes::INVALID_ENUM, &e.to_string())
        })
    }
}
