/**
 * Responsibility
 *
 * 主な責務
 *  - endpoint ごとの permission タグ型を宣言する
 *
 * 置くもの
 *  - GetDrinks, PostDrinks などのタグ型と permission 名
 *  - type CanGetDrinks = Authorized<GetDrinks> のような alias
 *
 * 置かないもの
 *  - 認可ロジック / extractor 実装
 */
use super::core::{Authorized, Permission};

// GET /drinks
pub enum GetDrinks {}
impl Permission for GetDrinks {
    const NAME: &'static str = "get:drinks";
}
pub type CanGetDrinks = Authorized<GetDrinks>;

// GET /drinks-detail
pub enum GetDrinksDetail {}
impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}
pub type CanGetDrinksDetail = Authorized<GetDrinksDetail>;

// POST /drinks
pub enum PostDrinks {}
impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}
pub type CanPostDrinks = Authorized<PostDrinks>;

// PATCH /drinks/{id}, DELETE /drinks/{id}
pub enum PatchDrinks {}
impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}
pub type CanPatchDrinks = Authorized<PatchDrinks>;
