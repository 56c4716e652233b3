//! Tests for domain models.

use crate::db::models::*;

#[test]
fn todo_status_deserializes_from_database_format() {
    // Status strings carry a space, not an underscore
    let to_do: TodoStatus = serde_json::from_str("\"TO DO\"").unwrap();
    assert_eq!(to_do, TodoStatus::ToDo);

    let in_progress: TodoStatus = serde_json::from_str("\"IN PROGRESS\"").unwrap();
    assert_eq!(in_progress, TodoStatus::InProgress);

    assert!(serde_json::from_str::<TodoStatus>("\"TO_DO\"").is_err());
}

#[test]
fn enumerations_parse_every_member_and_nothing_else() {
    for status in TodoStatus::ALL {
        assert_eq!(status.as_str().parse::<TodoStatus>(), Ok(status));
    }
    for priority in TodoPriority::ALL {
        assert_eq!(priority.as_str().parse::<TodoPriority>(), Ok(priority));
    }
    for category in TodoCategory::ALL {
        assert_eq!(category.as_str().parse::<TodoCategory>(), Ok(category));
    }

    assert!("done".parse::<TodoStatus>().is_err());
    assert!("URGENT".parse::<TodoPriority>().is_err());
    assert!("GARDEN".parse::<TodoCategory>().is_err());
    assert!("".parse::<TodoCategory>().is_err());
}

#[test]
fn enumerations_serialize_to_wire_strings() {
    assert_eq!(
        serde_json::to_string(&TodoStatus::InProgress).unwrap(),
        "\"IN PROGRESS\""
    );
    assert_eq!(
        serde_json::to_string(&TodoPriority::Medium).unwrap(),
        "\"MEDIUM\""
    );
    assert_eq!(
        serde_json::to_string(&TodoCategory::Learning).unwrap(),
        "\"LEARNING\""
    );
}

#[test]
fn due_date_accepts_exact_calendar_dates() {
    let date: DueDate = "2024-03-01".parse().unwrap();
    assert_eq!(date.to_string(), "2024-03-01");

    let leap: DueDate = "2024-02-29".parse().unwrap();
    assert_eq!(leap.to_string(), "2024-02-29");
}

#[test]
fn due_date_rejects_impossible_dates() {
    assert!("2024-13-40".parse::<DueDate>().is_err());
    assert!("2023-02-29".parse::<DueDate>().is_err());
    assert!("2024-04-31".parse::<DueDate>().is_err());
}

#[test]
fn due_date_rejects_other_shapes() {
    assert!("2024-3-1".parse::<DueDate>().is_err());
    assert!("2024/03/01".parse::<DueDate>().is_err());
    assert!("01-03-2024".parse::<DueDate>().is_err());
    assert!("2024-03-01T00:00:00".parse::<DueDate>().is_err());
    assert!(" 2024-03-01".parse::<DueDate>().is_err());
    assert!("".parse::<DueDate>().is_err());
}

#[test]
fn due_date_deserializes_through_parser() {
    let date: DueDate = serde_json::from_str("\"2021-12-12\"").unwrap();
    assert_eq!(String::from(date), "2021-12-12");

    assert!(serde_json::from_str::<DueDate>("\"2021-12-32\"").is_err());
    assert!(serde_json::from_str::<DueDate>("20211212").is_err());
}

#[test]
fn todo_filter_defaults_to_unconstrained_search() {
    let filter = TodoFilter::default();
    assert_eq!(filter.search_q, "");
    assert!(filter.status.is_none());
    assert!(filter.priority.is_none());
    assert!(filter.category.is_none());
}
