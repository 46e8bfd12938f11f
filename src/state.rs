use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::meals::{InMemoryMealRepository, MealRepository, MealService, PgMealRepository};

#[derive(Clone)]
pub struct AppState {
    pub meals: MealService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn MealRepository> = match &config.database_url {
            Some(url) => {
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;
                info!("meals stored in postgres");
                Arc::new(PgMealRepository::new(db))
            }
            None => {
                warn!("DATABASE_URL not set; meals are kept in memory");
                Arc::new(InMemoryMealRepository::default())
            }
        };
        Ok(Self::from_parts(Arc::new(config), repo))
    }

    pub fn from_parts(config: Arc<AppConfig>, repo: Arc<dyn MealRepository>) -> Self {
        Self {
            meals: MealService::new(repo),
            config,
        }
    }
}
