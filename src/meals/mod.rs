pub mod dto;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod services;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_data;

use crate::state::AppState;
use axum::Router;

pub use error::MealError;
pub use model::{Meal, MealTo};
pub use repo::{InMemoryMealRepository, MealRepository, PgMealRepository};
pub use services::MealService;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
