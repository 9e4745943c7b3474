/*
 * Responsibility
 * - axum::Json の rejection (plain text) を AppError の JSON error body に揃える
 * - 構文エラー / Content-Type 不備は 400、型に合わない body は 422
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` whose rejection is an `AppError`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "request body rejected");
                Err(rejection_to_error(rejection))
            }
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            AppError::unprocessable("request body does not match the expected shape")
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::bad_request("invalid_json", "request body is not valid JSON")
        }
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(
            "invalid_content_type",
            "expected `Content-Type: application/json`",
        ),
        _ => AppError::bad_request("invalid_body", "request body could not be read"),
    }
}
