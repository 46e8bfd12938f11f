use std::collections::HashMap;

use time::{Date, PrimitiveDateTime, Time};

use super::model::{Meal, MealTo};

/// Inclusive lower date as a date-time bound; `None` stays open.
pub fn start_of_day(date: Option<Date>) -> Option<PrimitiveDateTime> {
    date.map(Date::midnight)
}

/// Inclusive upper date as an exclusive date-time bound. `None`, and the
/// last representable date, leave the range open.
pub fn start_of_next_day(date: Option<Date>) -> Option<PrimitiveDateTime> {
    date.and_then(Date::next_day).map(Date::midnight)
}

/// `start <= value < end`, an absent side is unbounded.
pub fn is_between_half_open<T: PartialOrd>(value: T, start: Option<T>, end: Option<T>) -> bool {
    start.map_or(true, |s| value >= s) && end.map_or(true, |e| value < e)
}

pub fn get_tos(meals: Vec<Meal>, calories_per_day: i32) -> Vec<MealTo> {
    get_filtered_tos(meals, calories_per_day, None, None)
}

/// Excess is decided over every given meal of a day, before the
/// time-of-day filter drops any of them.
pub fn get_filtered_tos(
    meals: Vec<Meal>,
    calories_per_day: i32,
    start_time: Option<Time>,
    end_time: Option<Time>,
) -> Vec<MealTo> {
    let mut calories_by_date: HashMap<Date, i32> = HashMap::new();
    for meal in &meals {
        if let Some(date) = meal.date() {
            *calories_by_date.entry(date).or_insert(0) += meal.calories;
        }
    }

    meals
        .into_iter()
        .filter(|meal| {
            meal.time()
                .map_or(false, |t| is_between_half_open(t, start_time, end_time))
        })
        .map(|meal| {
            let excess = meal
                .date()
                .and_then(|d| calories_by_date.get(&d))
                .map_or(false, |total| *total > calories_per_day);
            MealTo::from_meal(meal, excess)
        })
        .collect()
}
