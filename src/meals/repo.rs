use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use super::filter::is_between_half_open;
use super::model::Meal;

/// Storage for meals keyed by `(id, user_id)`. Lookups for another user's
/// id behave exactly like lookups for a missing id.
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Inserts when `meal.id` is unset, otherwise updates the owned row.
    /// `None` means the update target does not exist for this user.
    async fn save(&self, meal: Meal, user_id: i32) -> anyhow::Result<Option<Meal>>;
    async fn delete(&self, id: i32, user_id: i32) -> anyhow::Result<bool>;
    async fn get(&self, id: i32, user_id: i32) -> anyhow::Result<Option<Meal>>;
    /// Newest first.
    async fn get_all(&self, user_id: i32) -> anyhow::Result<Vec<Meal>>;
    /// `start <= date_time < end`, newest first. A `None` bound is open.
    async fn get_between_half_open(
        &self,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
        user_id: i32,
    ) -> anyhow::Result<Vec<Meal>>;
}

#[derive(Clone)]
pub struct PgMealRepository {
    db: PgPool,
}

impl PgMealRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepository for PgMealRepository {
    async fn save(&self, meal: Meal, user_id: i32) -> anyhow::Result<Option<Meal>> {
        match meal.id {
            None => {
                let created = sqlx::query_as::<_, Meal>(
                    r#"
                    INSERT INTO meals (user_id, date_time, description, calories)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, date_time, description, calories
                    "#,
                )
                .bind(user_id)
                .bind(meal.date_time)
                .bind(&meal.description)
                .bind(meal.calories)
                .fetch_one(&self.db)
                .await
                .context("insert meal")?;
                Ok(Some(created))
            }
            Some(id) => {
                let updated = sqlx::query_as::<_, Meal>(
                    r#"
                    UPDATE meals
                       SET date_time = $1, description = $2, calories = $3
                     WHERE id = $4 AND user_id = $5
                    RETURNING id, date_time, description, calories
                    "#,
                )
                .bind(meal.date_time)
                .bind(&meal.description)
                .bind(meal.calories)
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.db)
                .await
                .with_context(|| format!("update meal {id}"))?;
                Ok(updated)
            }
        }
    }

    async fn delete(&self, id: i32, user_id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete meal {id}"))?;
        Ok(res.rows_affected() != 0)
    }

    async fn get(&self, id: i32, user_id: i32) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, date_time, description, calories
              FROM meals
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("get meal {id}"))?;
        Ok(meal)
    }

    async fn get_all(&self, user_id: i32) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, date_time, description, calories
              FROM meals
             WHERE user_id = $1
             ORDER BY date_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meals")?;
        Ok(rows)
    }

    async fn get_between_half_open(
        &self,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
        user_id: i32,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, date_time, description, calories
              FROM meals
             WHERE user_id = $1
               AND ($2::timestamp IS NULL OR date_time >= $2)
               AND ($3::timestamp IS NULL OR date_time < $3)
             ORDER BY date_time DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await
        .context("list meals between")?;
        Ok(rows)
    }
}

/// Process-local store, one map per owner.
pub struct InMemoryMealRepository {
    meals: Mutex<HashMap<i32, BTreeMap<i32, Meal>>>,
    next_id: AtomicI32,
}

pub const START_SEQ: i32 = 100_000;

impl Default for InMemoryMealRepository {
    fn default() -> Self {
        Self::with_start_seq(START_SEQ)
    }
}

impl InMemoryMealRepository {
    pub fn with_start_seq(start: i32) -> Self {
        Self {
            meals: Mutex::new(HashMap::new()),
            next_id: AtomicI32::new(start),
        }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<i32, BTreeMap<i32, Meal>>>> {
        self.meals
            .lock()
            .map_err(|_| anyhow::anyhow!("meal store lock poisoned"))
    }

    fn sorted_desc(mut meals: Vec<Meal>) -> Vec<Meal> {
        meals.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        meals
    }
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn save(&self, mut meal: Meal, user_id: i32) -> anyhow::Result<Option<Meal>> {
        let mut store = self.lock()?;
        match meal.id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                meal.id = Some(id);
                store.entry(user_id).or_default().insert(id, meal.clone());
                Ok(Some(meal))
            }
            Some(id) => match store.get_mut(&user_id).and_then(|m| m.get_mut(&id)) {
                Some(slot) => {
                    *slot = meal.clone();
                    Ok(Some(meal))
                }
                None => Ok(None),
            },
        }
    }

    async fn delete(&self, id: i32, user_id: i32) -> anyhow::Result<bool> {
        let mut store = self.lock()?;
        Ok(store
            .get_mut(&user_id)
            .and_then(|m| m.remove(&id))
            .is_some())
    }

    async fn get(&self, id: i32, user_id: i32) -> anyhow::Result<Option<Meal>> {
        let store = self.lock()?;
        Ok(store.get(&user_id).and_then(|m| m.get(&id)).cloned())
    }

    async fn get_all(&self, user_id: i32) -> anyhow::Result<Vec<Meal>> {
        let store = self.lock()?;
        let meals = store
            .get(&user_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        Ok(Self::sorted_desc(meals))
    }

    async fn get_between_half_open(
        &self,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
        user_id: i32,
    ) -> anyhow::Result<Vec<Meal>> {
        let store = self.lock()?;
        let meals = store
            .get(&user_id)
            .map(|m| {
                m.values()
                    .filter(|meal| {
                        meal.date_time
                            .map_or(false, |dt| is_between_half_open(dt, start, end))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self::sorted_desc(meals))
    }
}
