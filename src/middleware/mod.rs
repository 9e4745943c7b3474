/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認可 (permission チェック) はここではなく api::extractors::authorized 側
 */
pub mod cors;
pub mod http;
pub mod security_headers;
