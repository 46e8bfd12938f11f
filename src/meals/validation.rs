use std::fmt;

use super::model::Meal;

pub const MIN_CALORIES: i32 = 10;
pub const MAX_CALORIES: i32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every constraint a meal failed, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.0))]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate(meal: &Meal) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    if meal.date_time.is_none() {
        violations.push(Violation {
            field: "dateTime",
            message: "must not be null".into(),
        });
    }
    if meal.description.trim().is_empty() {
        violations.push(Violation {
            field: "description",
            message: "must not be blank".into(),
        });
    }
    if !(MIN_CALORIES..=MAX_CALORIES).contains(&meal.calories) {
        violations.push(Violation {
            field: "calories",
            message: format!("must be between {MIN_CALORIES} and {MAX_CALORIES}"),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}
