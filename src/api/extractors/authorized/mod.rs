/*!
 * Permission-gated authentication extractor
 *
 * Responsibility:
 * - handler に検証済み Claims を渡す（permission はシグネチャで宣言）
 * - axum 依存は core に閉じ込め、permission タグは types に分離する
 *
 * Public API:
 * - CanGetDrinks / CanGetDrinksDetail / CanPostDrinks / CanPatchDrinks
 */

mod core;
mod types;

pub use types::*;
