//! Partial update resolution.
//!
//! Merges a [`TodoPatch`] over a stored [`Todo`] and names the field the
//! update is reported under.

use std::fmt;

use crate::db::{DbError, DbResult, Todo, TodoPatch};

/// The field an update is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatedField {
    Status,
    Priority,
    Todo,
    Category,
    DueDate,
}

impl UpdatedField {
    /// Label used in the confirmation message.
    pub fn label(&self) -> &'static str {
        match self {
            UpdatedField::Status => "Status",
            UpdatedField::Priority => "Priority",
            UpdatedField::Todo => "Todo",
            UpdatedField::Category => "Category",
            UpdatedField::DueDate => "Due Date",
        }
    }
}

impl fmt::Display for UpdatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TodoPatch {
    /// First present field in the order status, priority, todo, category, due date.
    pub fn primary_field(&self) -> Option<UpdatedField> {
        if self.status.is_some() {
            Some(UpdatedField::Status)
        } else if self.priority.is_some() {
            Some(UpdatedField::Priority)
        } else if self.todo.is_some() {
            Some(UpdatedField::Todo)
        } else if self.category.is_some() {
            Some(UpdatedField::Category)
        } else if self.due_date.is_some() {
            Some(UpdatedField::DueDate)
        } else {
            None
        }
    }

    /// Apply every present field over `target`, absent fields keep their value.
    pub fn merge_into(self, target: &mut Todo) {
        if let Some(todo) = self.todo {
            target.todo = todo;
        }
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(due_date) = self.due_date {
            target.due_date = due_date;
        }
    }
}

/// Result of resolving a patch against the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpdate {
    pub todo: Todo,
    pub primary: Option<UpdatedField>,
}

impl ResolvedUpdate {
    /// Confirmation message, e.g. "Status Updated".
    pub fn message(&self) -> String {
        match self.primary {
            Some(field) => format!("{} Updated", field),
            None => "Nothing Updated".to_string(),
        }
    }
}

/// Merge `patch` over `stored`, failing with NotFound when nothing is stored under `id`.
pub fn resolve_update(id: i64, stored: Option<Todo>, patch: TodoPatch) -> DbResult<ResolvedUpdate> {
    let mut todo = stored.ok_or_else(|| DbError::todo_not_found(id))?;
    let primary = patch.primary_field();
    patch.merge_into(&mut todo);
    Ok(ResolvedUpdate { todo, primary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{TodoCategory, TodoPriority, TodoStatus};

    fn stored() -> Todo {
        Todo {
            id: 1,
            todo: "buy milk".to_string(),
            priority: TodoPriority::High,
            status: TodoStatus::ToDo,
            category: TodoCategory::Home,
            due_date: "2024-03-01".parse().unwrap(),
        }
    }

    #[test]
    fn status_patch_changes_only_status() {
        let patch = TodoPatch {
            status: Some(TodoStatus::Done),
            ..Default::default()
        };

        let resolved = resolve_update(1, Some(stored()), patch).unwrap();

        assert_eq!(
            resolved.todo,
            Todo {
                status: TodoStatus::Done,
                ..stored()
            }
        );
        assert_eq!(resolved.primary, Some(UpdatedField::Status));
        assert_eq!(resolved.message(), "Status Updated");
    }

    #[test]
    fn every_present_field_is_merged_regardless_of_primary() {
        let patch = TodoPatch {
            todo: Some("buy oat milk".to_string()),
            priority: Some(TodoPriority::Low),
            category: Some(TodoCategory::Work),
            due_date: Some("2024-04-02".parse().unwrap()),
            ..Default::default()
        };

        let resolved = resolve_update(1, Some(stored()), patch).unwrap();

        assert_eq!(resolved.primary, Some(UpdatedField::Priority));
        assert_eq!(resolved.todo.todo, "buy oat milk");
        assert_eq!(resolved.todo.priority, TodoPriority::Low);
        assert_eq!(resolved.todo.status, TodoStatus::ToDo);
        assert_eq!(resolved.todo.category, TodoCategory::Work);
        assert_eq!(resolved.todo.due_date.to_string(), "2024-04-02");
    }

    #[test]
    fn primary_field_follows_fixed_precedence() {
        let due = TodoPatch {
            due_date: Some("2024-04-02".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(due.primary_field(), Some(UpdatedField::DueDate));

        let category = TodoPatch {
            category: Some(TodoCategory::Learning),
            ..due.clone()
        };
        assert_eq!(category.primary_field(), Some(UpdatedField::Category));

        let text = TodoPatch {
            todo: Some("x".to_string()),
            ..category.clone()
        };
        assert_eq!(text.primary_field(), Some(UpdatedField::Todo));

        let priority = TodoPatch {
            priority: Some(TodoPriority::Medium),
            ..text.clone()
        };
        assert_eq!(priority.primary_field(), Some(UpdatedField::Priority));

        let status = TodoPatch {
            status: Some(TodoStatus::InProgress),
            ..priority
        };
        assert_eq!(status.primary_field(), Some(UpdatedField::Status));
    }

    #[test]
    fn empty_patch_leaves_record_unchanged() {
        let resolved = resolve_update(1, Some(stored()), TodoPatch::default()).unwrap();

        assert_eq!(resolved.todo, stored());
        assert_eq!(resolved.primary, None);
        assert_eq!(resolved.message(), "Nothing Updated");
    }

    #[test]
    fn missing_record_is_not_found() {
        let patch = TodoPatch {
            status: Some(TodoStatus::Done),
            ..Default::default()
        };

        let err = resolve_update(99, None, patch).unwrap_err();
        assert!(matches!(err, DbError::NotFound { id, .. } if id == "99"));
    }

    #[test]
    fn due_date_label_has_a_space() {
        assert_eq!(UpdatedField::DueDate.to_string(), "Due Date");
    }
}
