/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, authorizer: Authorizer
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::Authorizer;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, authorizer: Arc<Authorizer>) -> Self {
        Self { db, authorizer }
    }
}
