/*
 * Responsibility
 * - Path の {drink_id} を i32 として受ける
 * - 数値でなければ 400 (AppError の JSON error body)
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct DrinkId(pub i32);

impl FromRequestParts<AppState> for DrinkId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "invalid drink id");
                AppError::bad_request("invalid_id", "drink id must be an integer")
            })?;
        Ok(Self(id))
    }
}
