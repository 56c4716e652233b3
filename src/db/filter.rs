//! Filter precedence for listing todos.
//!
//! The supplied filters are matched against a fixed precedence table and the
//! first matching combination decides which columns are constrained. Filters
//! not named by the selected combination are ignored, so `status` together
//! with `priority` and `category` filters on status and priority only.

use crate::db::TodoFilter;

/// Which optional filters were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    pub status: bool,
    pub priority: bool,
    pub category: bool,
}

impl From<&TodoFilter> for Presence {
    fn from(filter: &TodoFilter) -> Self {
        Self {
            status: filter.status.is_some(),
            priority: filter.priority.is_some(),
            category: filter.category.is_some(),
        }
    }
}

/// A filter combination, each constrains the substring search plus its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBranch {
    PriorityAndStatus,
    Priority,
    Status,
    CategoryAndStatus,
    Category,
    CategoryAndPriority,
    SearchOnly,
}

/// Constrained column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Status,
    Priority,
    Category,
}

impl FilterColumn {
    pub fn name(&self) -> &'static str {
        match self {
            FilterColumn::Status => "status",
            FilterColumn::Priority => "priority",
            FilterColumn::Category => "category",
        }
    }

    pub(crate) fn value(&self, filter: &TodoFilter) -> Option<&'static str> {
        match self {
            FilterColumn::Status => filter.status.map(|s| s.as_str()),
            FilterColumn::Priority => filter.priority.map(|p| p.as_str()),
            FilterColumn::Category => filter.category.map(|c| c.as_str()),
        }
    }
}

/// First match wins. `CategoryAndPriority` sits behind `Priority` and `Category`
/// and is never selected.
const PRECEDENCE: [(FilterBranch, fn(Presence) -> bool); 6] = [
    (FilterBranch::PriorityAndStatus, |p: Presence| {
        p.priority && p.status
    }),
    (FilterBranch::Priority, |p: Presence| p.priority && !p.status),
    (FilterBranch::Status, |p: Presence| {
        p.status && !p.priority && !p.category
    }),
    (FilterBranch::CategoryAndStatus, |p: Presence| {
        p.category && p.status
    }),
    (FilterBranch::Category, |p: Presence| p.category),
    (FilterBranch::CategoryAndPriority, |p: Presence| {
        p.category && p.priority
    }),
];

impl FilterBranch {
    /// Select the combination for the supplied filters.
    pub fn select(presence: Presence) -> Self {
        PRECEDENCE
            .iter()
            .find(|(_, matches)| matches(presence))
            .map(|(branch, _)| *branch)
            .unwrap_or(FilterBranch::SearchOnly)
    }

    /// Columns constrained besides the substring search, in statement order.
    pub fn columns(&self) -> &'static [FilterColumn] {
        match self {
            FilterBranch::PriorityAndStatus => &[FilterColumn::Status, FilterColumn::Priority],
            FilterBranch::Priority => &[FilterColumn::Priority],
            FilterBranch::Status => &[FilterColumn::Status],
            FilterBranch::CategoryAndStatus => &[FilterColumn::Status, FilterColumn::Category],
            FilterBranch::Category => &[FilterColumn::Category],
            FilterBranch::CategoryAndPriority => &[FilterColumn::Category, FilterColumn::Priority],
            FilterBranch::SearchOnly => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presence(status: bool, priority: bool, category: bool) -> Presence {
        Presence {
            status,
            priority,
            category,
        }
    }

    #[test]
    fn test_select_covers_every_presence_combination() {
        let table = [
            ((false, false, false), FilterBranch::SearchOnly),
            ((true, false, false), FilterBranch::Status),
            ((false, true, false), FilterBranch::Priority),
            ((false, false, true), FilterBranch::Category),
            ((true, true, false), FilterBranch::PriorityAndStatus),
            ((true, false, true), FilterBranch::CategoryAndStatus),
            ((false, true, true), FilterBranch::Priority),
            ((true, true, true), FilterBranch::PriorityAndStatus),
        ];

        for ((status, priority, category), expected) in table {
            assert_eq!(
                FilterBranch::select(presence(status, priority, category)),
                expected,
                "status={status} priority={priority} category={category}"
            );
        }
    }

    #[test]
    fn test_category_and_priority_is_never_selected() {
        for bits in 0..8u8 {
            let p = presence(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            assert_ne!(FilterBranch::select(p), FilterBranch::CategoryAndPriority);
        }
    }

    #[test]
    fn test_selected_columns_reselect_the_same_branch() {
        for bits in 0..8u8 {
            let p = presence(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let branch = FilterBranch::select(p);
            let columns = branch.columns();
            let narrowed = Presence {
                status: columns.contains(&FilterColumn::Status),
                priority: columns.contains(&FilterColumn::Priority),
                category: columns.contains(&FilterColumn::Category),
            };
            assert_eq!(FilterBranch::select(narrowed), branch);
        }
    }
}
