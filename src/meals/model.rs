use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime, Time};

time::serde::format_description!(
    local_date_time,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second]]]"
);

/// A logged food entry. The owner is not part of the record; every
/// operation receives it separately as the access scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default, with = "local_date_time::option")]
    pub date_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calories: i32,
}

impl Meal {
    pub fn new(
        id: Option<i32>,
        date_time: PrimitiveDateTime,
        description: impl Into<String>,
        calories: i32,
    ) -> Self {
        Self {
            id,
            date_time: Some(date_time),
            description: description.into(),
            calories,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn date(&self) -> Option<Date> {
        self.date_time.map(|dt| dt.date())
    }

    pub fn time(&self) -> Option<Time> {
        self.date_time.map(|dt| dt.time())
    }
}

/// Read-side view of a meal, flagged when its day went over the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTo {
    pub id: Option<i32>,
    #[serde(with = "local_date_time::option")]
    pub date_time: Option<PrimitiveDateTime>,
    pub description: String,
    pub calories: i32,
    pub excess: bool,
}

impl MealTo {
    pub fn from_meal(meal: Meal, excess: bool) -> Self {
        Self {
            id: meal.id,
            date_time: meal.date_time,
            description: meal.description,
            calories: meal.calories,
            excess,
        }
    }
}
