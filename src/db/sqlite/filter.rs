//! SQL assembly for listing todos.

use tracing::debug;

use crate::db::{FilterBranch, Presence, TodoFilter};

pub(crate) const SELECT_TODO: &str =
    "SELECT id, todo, priority, status, category, due_date FROM todo";

/// A parameterized read statement with its bind values in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub branch: FilterBranch,
    pub sql: String,
    pub binds: Vec<String>,
}

impl ListQuery {
    pub fn for_filter(filter: &TodoFilter) -> Self {
        let branch = FilterBranch::select(Presence::from(filter));
        debug!(?branch, "Selected todo filter combination");

        let mut conditions = vec!["todo LIKE ? ESCAPE '\\'".to_string()];
        let mut binds = vec![like_pattern(&filter.search_q)];

        for column in branch.columns() {
            if let Some(value) = column.value(filter) {
                conditions.push(format!("{} = ?", column.name()));
                binds.push(value.to_string());
            }
        }

        let sql = format!("{} WHERE {}", SELECT_TODO, conditions.join(" AND "));

        Self { branch, sql, binds }
    }
}

/// Substring LIKE pattern with `\`, `%` and `_` matched literally.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
