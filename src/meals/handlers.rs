use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{auth::jwt::AuthUser, state::AppState};

use super::dto::{Filter, FilterQuery};
use super::error::MealError;
use super::filter::{get_filtered_tos, get_tos};
use super::model::{Meal, MealTo};

fn malformed_body(rejection: JsonRejection) -> MealError {
    MealError::IllegalRequest(rejection.body_text())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/filter", get(filter_meals))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MealTo>>, MealError> {
    let meals = state.meals.get_all(user_id).await?;
    Ok(Json(get_tos(meals, state.config.calories_per_day)))
}

#[instrument(skip(state))]
pub async fn filter_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Vec<MealTo>>, MealError> {
    let f = Filter::try_from(q)?;
    let meals = state
        .meals
        .get_between_inclusive(f.start_date, f.end_date, user_id)
        .await?;
    Ok(Json(get_filtered_tos(
        meals,
        state.config.calories_per_day,
        f.start_time,
        f.end_time,
    )))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Meal>, MealError> {
    Ok(Json(state.meals.get(id, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<Meal>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<Meal>), MealError> {
    let Json(meal) = payload.map_err(malformed_body)?;
    let created = state.meals.create(meal, user_id).await?;

    let mut headers = HeaderMap::new();
    if let Some(id) = created.id {
        let location = HeaderValue::from_str(&format!("/api/v1/meals/{id}"))
            .map_err(|e| MealError::Repository(e.into()))?;
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
    payload: Result<Json<Meal>, JsonRejection>,
) -> Result<StatusCode, MealError> {
    let Json(mut meal) = payload.map_err(malformed_body)?;
    match meal.id {
        None => meal.id = Some(id),
        Some(body_id) if body_id != id => {
            return Err(MealError::IllegalRequest(format!("meal must be with id={id}")));
        }
        Some(_) => {}
    }
    state.meals.update(meal, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, MealError> {
    state.meals.delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
