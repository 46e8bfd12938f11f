use std::sync::Arc;

use time::Date;
use tracing::{debug, info, instrument, warn};

use super::error::MealError;
use super::filter::{start_of_day, start_of_next_day};
use super::model::Meal;
use super::repo::MealRepository;
use super::validation::validate;

/// Ownership-scoped operations on a user's meals.
#[derive(Clone)]
pub struct MealService {
    repo: Arc<dyn MealRepository>,
}

impl MealService {
    pub fn new(repo: Arc<dyn MealRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32, user_id: i32) -> Result<Meal, MealError> {
        self.repo
            .get(id, user_id)
            .await?
            .ok_or(MealError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), MealError> {
        if !self.repo.delete(id, user_id).await? {
            warn!(id, user_id, "delete: meal not found");
            return Err(MealError::NotFound(id));
        }
        info!(id, user_id, "meal deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, user_id: i32) -> Result<Vec<Meal>, MealError> {
        Ok(self.repo.get_all(user_id).await?)
    }

    /// Meals whose date lies in `[start_date, end_date]`; a missing bound
    /// leaves that side open.
    #[instrument(skip(self))]
    pub async fn get_between_inclusive(
        &self,
        start_date: Option<Date>,
        end_date: Option<Date>,
        user_id: i32,
    ) -> Result<Vec<Meal>, MealError> {
        let start = start_of_day(start_date);
        let end = start_of_next_day(end_date);
        debug!(?start, ?end, "half-open range");
        Ok(self.repo.get_between_half_open(start, end, user_id).await?)
    }

    #[instrument(skip(self, meal), fields(id = ?meal.id))]
    pub async fn update(&self, meal: Meal, user_id: i32) -> Result<(), MealError> {
        let id = meal
            .id
            .ok_or_else(|| MealError::IllegalRequest("meal to update must have an id".into()))?;
        validate(&meal)?;
        if self.repo.save(meal, user_id).await?.is_none() {
            warn!(id, user_id, "update: meal not found");
            return Err(MealError::NotFound(id));
        }
        info!(id, user_id, "meal updated");
        Ok(())
    }

    #[instrument(skip(self, meal))]
    pub async fn create(&self, meal: Meal, user_id: i32) -> Result<Meal, MealError> {
        if !meal.is_new() {
            return Err(MealError::IllegalRequest(format!(
                "meal with id={} must be new (id=null)",
                meal.id.unwrap_or_default()
            )));
        }
        validate(&meal)?;
        let created = self
            .repo
            .save(meal, user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("repository returned no meal on insert"))?;
        info!(id = ?created.id, user_id, "meal created");
        Ok(created)
    }
}
