/*
 * Responsibility
 * - /drinks 系 CRUD handler
 * - 各 handler は必要な permission を Can* extractor で宣言する (認可は handler 到達前に完了)
 * - DTO validation → repo 呼び出し → short/long 表現で返す
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::drinks::{
            CreateDrinkRequest, DeleteDrinkResponse, Drink, DrinkLong, DrinkShort,
            DrinksResponse, UpdateDrinkRequest,
        },
        extractors::{
            authorized::{CanGetDrinks, CanGetDrinksDetail, CanPatchDrinks, CanPostDrinks},
            drink_id::DrinkId,
            json_body::ApiJson,
        },
    },
    error::AppError,
    repos::drink_repo::{self, DrinkRow},
    state::AppState,
};

fn row_to_drink(row: DrinkRow) -> Result<Drink, AppError> {
    let id = row.id;
    Drink::try_from(row).map_err(|e| {
        tracing::error!(drink_id = id, error = %e, "stored recipe is not valid json");
        AppError::Internal
    })
}

async fn all_drinks(state: &AppState) -> Result<Vec<Drink>, AppError> {
    let rows = drink_repo::list(&state.db).await?;

    let mut drinks = Vec::with_capacity(rows.len());
    for row in rows {
        drinks.push(row_to_drink(row)?);
    }

    Ok(drinks)
}

fn encode_recipe(recipe: &impl serde::Serialize) -> Result<String, AppError> {
    serde_json::to_string(recipe).map_err(|e| {
        tracing::error!(error = %e, "failed to encode recipe");
        AppError::Internal
    })
}

pub async fn list_drinks(
    State(state): State<AppState>,
    _auth: CanGetDrinks,
) -> Result<Json<DrinksResponse<Vec<DrinkShort>>>, AppError> {
    let drinks = all_drinks(&state).await?;

    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::short).collect(),
    )))
}

pub async fn list_drinks_detail(
    State(state): State<AppState>,
    _auth: CanGetDrinksDetail,
) -> Result<Json<DrinksResponse<Vec<DrinkLong>>>, AppError> {
    let drinks = all_drinks(&state).await?;

    Ok(Json(DrinksResponse::new(
        drinks.into_iter().map(Drink::long).collect(),
    )))
}

pub async fn create_drink(
    State(state): State<AppState>,
    auth: CanPostDrinks,
    ApiJson(req): ApiJson<CreateDrinkRequest>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    req.validate().map_err(AppError::unprocessable)?;

    let recipe = encode_recipe(&req.recipe.into_vec())?;
    let row = drink_repo::create(&state.db, req.title.trim(), &recipe).await?;
    let drink = row_to_drink(row)?;

    tracing::info!(drink_id = drink.id, sub = ?auth.claims.subject(), "drink created");

    Ok(Json(DrinksResponse::new(drink.long())))
}

pub async fn update_drink(
    State(state): State<AppState>,
    auth: CanPatchDrinks,
    DrinkId(drink_id): DrinkId,
    ApiJson(req): ApiJson<UpdateDrinkRequest>,
) -> Result<Json<DrinksResponse<Vec<DrinkShort>>>, AppError> {
    req.validate().map_err(AppError::unprocessable)?;

    let recipe = match req.recipe {
        Some(recipe) => Some(encode_recipe(&recipe.into_vec())?),
        None => None,
    };

    let title = req.title.as_deref().map(str::trim);
    let row = if title.is_none() && recipe.is_none() {
        drink_repo::get(&state.db, drink_id).await?
    } else {
        drink_repo::update(&state.db, drink_id, title, recipe.as_deref()).await?
    };
    row.ok_or(AppError::not_found("drink"))?;

    tracing::info!(drink_id, sub = ?auth.claims.subject(), "drink updated");

    // Responds with the whole menu (short form), as it stands after the update.
    let drinks = all_drinks(&state).await?;
    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::short).collect(),
    )))
}

pub async fn delete_drink(
    State(state): State<AppState>,
    auth: CanPatchDrinks,
    DrinkId(drink_id): DrinkId,
) -> Result<Json<DeleteDrinkResponse>, AppError> {
    let deleted = drink_repo::delete(&state.db, drink_id).await?;
    if !deleted {
        return Err(AppError::not_found("drink"));
    }

    tracing::info!(drink_id, sub = ?auth.claims.subject(), "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink_id,
    }))
}
