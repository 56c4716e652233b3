//! Domain models for the todo store.
//!
//! These models are storage-agnostic. The enumerated fields carry the exact
//! wire strings stored in the `todo` table.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored todo record, field names mirror the `todo` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub priority: TodoPriority,
    pub status: TodoStatus,
    pub category: TodoCategory,
    pub due_date: DueDate,
}

// =============================================================================
// Enumerated fields
// =============================================================================

/// Status of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoStatus {
    #[serde(rename = "TO DO")]
    ToDo,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [TodoStatus::ToDo, TodoStatus::InProgress, TodoStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::ToDo => "TO DO",
            TodoStatus::InProgress => "IN PROGRESS",
            TodoStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO DO" => Ok(TodoStatus::ToDo),
            "IN PROGRESS" => Ok(TodoStatus::InProgress),
            "DONE" => Ok(TodoStatus::Done),
            _ => Err(format!("Invalid TodoStatus: {}", s)),
        }
    }
}

/// Priority of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoPriority {
    High,
    Medium,
    Low,
}

impl TodoPriority {
    pub const ALL: [TodoPriority; 3] = [
        TodoPriority::High,
        TodoPriority::Medium,
        TodoPriority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoPriority::High => "HIGH",
            TodoPriority::Medium => "MEDIUM",
            TodoPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(TodoPriority::High),
            "MEDIUM" => Ok(TodoPriority::Medium),
            "LOW" => Ok(TodoPriority::Low),
            _ => Err(format!("Invalid TodoPriority: {}", s)),
        }
    }
}

/// Category of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoCategory {
    Work,
    Home,
    Learning,
}

impl TodoCategory {
    pub const ALL: [TodoCategory; 3] = [
        TodoCategory::Work,
        TodoCategory::Home,
        TodoCategory::Learning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoCategory::Work => "WORK",
            TodoCategory::Home => "HOME",
            TodoCategory::Learning => "LEARNING",
        }
    }
}

impl fmt::Display for TodoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK" => Ok(TodoCategory::Work),
            "HOME" => Ok(TodoCategory::Home),
            "LEARNING" => Ok(TodoCategory::Learning),
            _ => Err(format!("Invalid TodoCategory: {}", s)),
        }
    }
}

// =============================================================================
// Due date
// =============================================================================

/// A calendar date in the exact `yyyy-MM-dd` shape.
///
/// Parsing rejects anything that is not four digits, a hyphen, two digits,
/// a hyphen and two digits, and anything that is not a real calendar day
/// (`2024-13-40`, `2023-02-29`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DueDate(NaiveDate);

impl DueDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for DueDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shaped {
            return Err(format!("Invalid DueDate: {}", s));
        }

        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(DueDate)
            .map_err(|_| format!("Invalid DueDate: {}", s))
    }
}

impl TryFrom<String> for DueDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DueDate> for String {
    fn from(date: DueDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        DueDate(date)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

// =============================================================================
// Query and patch types
// =============================================================================

/// Optional filters for listing todos.
///
/// `search_q` defaults to the empty string, which matches every todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub search_q: String,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub category: Option<TodoCategory>,
}

/// A partial update, every field is tagged present (`Some`) or absent (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub todo: Option<String>,
    pub priority: Option<TodoPriority>,
    pub status: Option<TodoStatus>,
    pub category: Option<TodoCategory>,
    pub due_date: Option<DueDate>,
}
