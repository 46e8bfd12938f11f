use time::macros::datetime;

use super::model::Meal;
use super::repo::{InMemoryMealRepository, MealRepository, START_SEQ};

pub const USER_ID: i32 = START_SEQ;
pub const ADMIN_ID: i32 = START_SEQ + 1;
pub const MEAL1_ID: i32 = START_SEQ + 2;
pub const ADMIN_MEAL_ID: i32 = MEAL1_ID + 7;
pub const NOT_FOUND: i32 = 10;

pub fn meal1() -> Meal {
    Meal::new(Some(MEAL1_ID), datetime!(2020-01-30 10:00), "Breakfast", 500)
}
pub fn meal2() -> Meal {
    Meal::new(Some(MEAL1_ID + 1), datetime!(2020-01-30 13:00), "Lunch", 1000)
}
pub fn meal3() -> Meal {
    Meal::new(Some(MEAL1_ID + 2), datetime!(2020-01-30 20:00), "Dinner", 500)
}
pub fn meal4() -> Meal {
    Meal::new(Some(MEAL1_ID + 3), datetime!(2020-01-31 00:00), "Midnight snack", 100)
}
pub fn meal5() -> Meal {
    Meal::new(Some(MEAL1_ID + 4), datetime!(2020-01-31 10:00), "Breakfast", 500)
}
pub fn meal6() -> Meal {
    Meal::new(Some(MEAL1_ID + 5), datetime!(2020-01-31 13:00), "Lunch", 1000)
}
pub fn meal7() -> Meal {
    Meal::new(Some(MEAL1_ID + 6), datetime!(2020-01-31 20:00), "Dinner", 510)
}
pub fn admin_meal1() -> Meal {
    Meal::new(Some(ADMIN_MEAL_ID), datetime!(2020-01-31 14:00), "Admin lunch", 510)
}
pub fn admin_meal2() -> Meal {
    Meal::new(Some(ADMIN_MEAL_ID + 1), datetime!(2020-01-31 21:00), "Admin dinner", 1500)
}

/// The user's meals, newest first.
pub fn meals() -> Vec<Meal> {
    vec![meal7(), meal6(), meal5(), meal4(), meal3(), meal2(), meal1()]
}

pub fn new_meal() -> Meal {
    Meal::new(None, datetime!(2020-02-01 18:00), "Created dinner", 300)
}

pub fn updated_meal() -> Meal {
    Meal::new(Some(MEAL1_ID), datetime!(2020-01-30 10:02), "Updated breakfast", 200)
}

/// Store populated so that every fixture above carries its real id.
pub async fn seeded_repository() -> InMemoryMealRepository {
    let repo = InMemoryMealRepository::with_start_seq(MEAL1_ID);
    let user_meals = [meal1(), meal2(), meal3(), meal4(), meal5(), meal6(), meal7()];
    for meal in user_meals {
        insert_as(&repo, meal, USER_ID).await;
    }
    for meal in [admin_meal1(), admin_meal2()] {
        insert_as(&repo, meal, ADMIN_ID).await;
    }
    repo
}

async fn insert_as(repo: &InMemoryMealRepository, meal: Meal, user_id: i32) {
    let expected = meal.id;
    let saved = repo
        .save(Meal { id: None, ..meal }, user_id)
        .await
        .expect("seed save")
        .expect("seed insert");
    assert_eq!(saved.id, expected, "fixture ids must follow insertion order");
}
