//! # Core-Variable Selection
//!
//! Picks the rows with at least one indicator set and orders them by
//! variable name. The sort is stable, so rows sharing a name keep their
//! workbook order. Rows without a name sort last.

use crate::types::{VariableRow, VariableTable};
use std::cmp::Ordering;

impl VariableTable {
    /// The core variables, sorted ascending by `variable`.
    ///
    /// The returned table keeps every column of `self`.
    #[must_use]
    pub fn core_subset(&self) -> Self {
        let mut rows: Vec<VariableRow> =
            self.rows().iter().filter(|r| r.is_core()).cloned().collect();
        rows.sort_by(by_variable);

        tracing::debug!(
            total = self.len(),
            core = rows.len(),
            "Selected core variables"
        );

        self.with_rows(rows)
    }

    /// Check whether rows are in ascending `variable` order.
    #[must_use]
    pub fn is_sorted_by_variable(&self) -> bool {
        self.rows()
            .windows(2)
            .all(|pair| by_variable(&pair[0], &pair[1]) != Ordering::Greater)
    }
}

/// Ascending by name, unnamed rows after all named ones.
fn by_variable(a: &VariableRow, b: &VariableRow) -> Ordering {
    match (a.variable(), b.variable()) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
