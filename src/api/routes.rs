/*
 * Responsibility
 * - URL 構造を定義 (/health, /drinks, /drinks-detail, /drinks/{id})
 * - 認可は route_layer ではなく handler の Can* extractor で endpoint ごとに宣言する
 */
use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::handlers::{
    drinks::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink},
    health::health,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drinks_detail))
        .route("/drinks/{drink_id}", patch(update_drink).delete(delete_drink))
}
