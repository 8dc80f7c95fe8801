//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::data::Table;

/// Create a small Titanic-shaped `Table` for testing.
#[must_use]
pub fn make_test_table() -> Table {
    Table {
        name: "titanic".to_string(),
        columns: vec![
            "Survived".to_string(),
            "Pclass".to_string(),
            "Age".to_string(),
            "Fare".to_string(),
        ],
        row_count: 891,
    }
}
