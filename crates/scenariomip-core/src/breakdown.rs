//! # Variable Breakdowns
//!
//! Frequency tables of variable-name prefixes, used in the README and in
//! verbose output.
//!
//! Entries are ordered by descending count. Equal counts keep the order in
//! which the prefix was first seen, which for a sorted core subset means
//! alphabetical order.

use crate::primitives::VARIABLE_SEPARATOR;
use crate::types::VariableTable;
use std::collections::BTreeMap;
use std::fmt;

/// A prefix and the number of variables that start with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownEntry {
    pub prefix: String,
    pub count: usize,
}

/// Counts of variables grouped by their first `depth` name levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    depth: usize,
    entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    /// Group by the first level (`Emissions|CO2|Energy` → `Emissions`).
    #[must_use]
    pub fn top_level(table: &VariableTable) -> Self {
        Self::at_depth(table, 1)
    }

    /// Group by the first two levels (`Emissions|CO2|Energy` → `Emissions|CO2`).
    #[must_use]
    pub fn second_level(table: &VariableTable) -> Self {
        Self::at_depth(table, 2)
    }

    /// Group by the first `depth` levels.
    ///
    /// Names with fewer levels than `depth` are counted under their full name.
    #[must_use]
    pub fn at_depth(table: &VariableTable, depth: usize) -> Self {
        let mut entries: Vec<BreakdownEntry> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();

        for variable in table.variables() {
            let prefix = name_prefix(variable, depth);
            match index.get(&prefix).copied() {
                Some(i) => entries[i].count += 1,
                None => {
                    index.insert(prefix.clone(), entries.len());
                    entries.push(BreakdownEntry { prefix, count: 1 });
                }
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { depth, entries }
    }

    /// Number of name levels grouped on.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Entries in report order.
    #[must_use]
    pub fn entries(&self) -> &[BreakdownEntry] {
        &self.entries
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// The first `depth` levels of a variable name, rejoined with `|`.
#[must_use]
pub fn name_prefix(variable: &str, depth: usize) -> String {
    variable
        .split(VARIABLE_SEPARATOR)
        .take(depth.max(1))
        .collect::<Vec<_>>()
        .join(&VARIABLE_SEPARATOR.to_string())
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|e| e.prefix.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.entries {
            writeln!(f, "{:<width$}  {:>5}", entry.prefix, entry.count)?;
        }
        Ok(())
    }
}
