use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

pub const TITLE_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Validated field set written by create and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
        }
    }
}

/// Raw urlencoded form body. Browsers send every field, so missing ones
/// default to empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoFormError {
    #[error("Title is required!")]
    TitleRequired,

    #[error("Title must be at most {} characters.", TITLE_MAX_LEN)]
    TitleTooLong,

    #[error("Enter a valid date.")]
    InvalidDueDate,
}

impl TodoForm {
    pub fn validate(&self) -> Result<NewTodo, TodoFormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TodoFormError::TitleRequired);
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(TodoFormError::TitleTooLong);
        }

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| TodoFormError::InvalidDueDate)?,
            ),
        };

        Ok(NewTodo {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            due_date,
        })
    }
}

impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}
