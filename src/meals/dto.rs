use serde::Deserialize;
use time::macros::format_description;
use time::{Date, Time};

use super::error::MealError;

/// Query of `GET /meals/filter`. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub start_date: Option<Date>,
    pub start_time: Option<Time>,
    pub end_date: Option<Date>,
    pub end_time: Option<Time>,
}

impl TryFrom<FilterQuery> for Filter {
    type Error = MealError;

    fn try_from(q: FilterQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_date("startDate", q.start_date.as_deref())?,
            start_time: parse_time("startTime", q.start_time.as_deref())?,
            end_date: parse_date("endDate", q.end_date.as_deref())?,
            end_time: parse_time("endTime", q.end_time.as_deref())?,
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<Date>, MealError> {
    non_blank(raw)
        .map(|s| {
            Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|_| {
                MealError::IllegalRequest(format!("{name} must be YYYY-MM-DD, got {s}"))
            })
        })
        .transpose()
}

fn parse_time(name: &str, raw: Option<&str>) -> Result<Option<Time>, MealError> {
    non_blank(raw)
        .map(|s| {
            Time::parse(s, format_description!("[hour]:[minute]"))
                .map_err(|_| MealError::IllegalRequest(format!("{name} must be HH:MM, got {s}")))
        })
        .transpose()
}
