/*
 * Responsibility
 * - handler が要求する permission を型で宣言し、リクエスト到達前に認可する
 * 主な責務
 *  - Authorized<P> の定義（ジェネリック本体）
 *  - impl FromRequestParts<AppState> for Authorized<P>
 *  - 失敗時は AuthError → AppError (401/403/400) へ変換
 * 置かないもの
 *  - get:drinks などの具体的な permission 名 (types.rs)
 *  - JWT/JWKS の検証ロジック (services::auth)
 */
use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::services::auth::Claims;
use crate::state::AppState;

/// A permission string a handler requires, attached to a zero-sized tag type.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Verified claims of a caller holding permission `P`.
pub struct Authorized<P> {
    pub claims: Claims,
    _marker: PhantomData<P>,
}

impl<P> Authorized<P> {
    fn new(claims: Claims) -> Self {
        Self {
            claims,
            _marker: PhantomData,
        }
    }
}

impl<P> FromRequestParts<AppState> for Authorized<P>
where
    P: Permission,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.authorizer.authorize(P::NAME, &parts.headers).await {
            Ok(claims) => Ok(Self::new(claims)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    code = err.code(),
                    permission = P::NAME,
                    "authorization failed"
                );
                Err(err.into())
            }
        }
    }
}

impl<P: Permission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("sub", &self.claims.subject())
            .finish()
    }
}
