//! Request validation helpers for API handlers

use std::str::FromStr;

use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::request::Parts,
};
use pillowcase_core::{AppError, ImageId};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::HttpAppError;

/// Query string extractor that deserializes then runs `Validate`.
///
/// Both deserialization failures and validation failures become
/// `AppError::InvalidQuery` (422).
#[derive(Debug, Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;

        inner.validate().map_err(AppError::from)?;

        Ok(ValidatedQuery(inner))
    }
}

fn query_rejection(rejection: QueryRejection) -> HttpAppError {
    HttpAppError(AppError::InvalidQuery(rejection.body_text()))
}

/// Parse a path segment into an image identifier.
///
/// Anything that is not a UUID cannot name a stored image, so it is reported
/// as not found rather than as a malformed request.
pub fn parse_image_id(raw: &str) -> Result<ImageId, HttpAppError> {
    ImageId::from_str(raw).map_err(|_| HttpAppError(AppError::ImageNotFound(raw.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_id() {
        let id = ImageId::new_random();
        assert_eq!(parse_image_id(&id.to_string()).unwrap(), id);

        let HttpAppError(err) = parse_image_id("../etc/passwd").unwrap_err();
        assert!(matches!(err, AppError::ImageNotFound(raw) if raw == "../etc/passwd"));
    }
}
