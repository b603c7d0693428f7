//! Width → column count resolution

use super::types::sanitize_columns;
use serde::Deserialize;

/// A single `(min_width → count)` rule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    /// Smallest container width at which this rule applies.
    pub min_width: f64,
    /// Column count used from `min_width` upward.
    pub count: usize,
}

impl Breakpoint {
    /// Create a new rule.
    pub fn new(min_width: f64, count: usize) -> Self {
        Self { min_width, count }
    }
}

/// Ordered breakpoint rules plus the mandatory default.
///
/// `default` applies when the width is below every listed `min_width`.
/// Rules are matched by value, so listing order does not change the result;
/// among rules with equal `min_width` the last one listed wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakpointTable {
    /// Column count below the smallest breakpoint.
    pub default: usize,
    /// The `(min_width → count)` rules.
    #[serde(default)]
    pub breakpoints: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Create a table with only a default count.
    pub fn new(default: usize) -> Self {
        Self {
            default,
            breakpoints: Vec::new(),
        }
    }

    /// Builder-style rule insertion.
    pub fn with(mut self, min_width: f64, count: usize) -> Self {
        self.breakpoints.push(Breakpoint::new(min_width, count));
        self
    }

    /// Resolve a width to a column count. See [`resolve`].
    pub fn resolve(&self, width: f64) -> usize {
        resolve(width, self)
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::new(1).with(60.0, 2).with(100.0, 3).with(140.0, 4)
    }
}

/// Column configuration: either a fixed count or a responsive table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Always this many columns, regardless of width.
    Fixed(usize),
    /// Column count chosen from the container width.
    Responsive(BreakpointTable),
}

impl ColumnSpec {
    /// Column count for the given container width. Always `>= 1`.
    pub fn resolve(&self, width: f64) -> usize {
        match self {
            ColumnSpec::Fixed(count) => sanitize_columns(*count),
            ColumnSpec::Responsive(table) => table.resolve(width),
        }
    }
    /// Drop rules with a NaN `min_width`. They never match any width and
    /// would make two otherwise equal specs compare unequal.
    pub fn sanitized(self) -> Self {
        match self {
            ColumnSpec::Responsive(mut table) => {
                table.breakpoints.retain(|rule| !rule.min_width.is_nan());
                ColumnSpec::Responsive(table)
            }
            fixed => fixed,
        }
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        ColumnSpec::Responsive(BreakpointTable::default())
    }
}

/// Find the greatest `min_width <= width`; fall back to the table default.
///
/// Total: counts below one are coerced to one and a NaN width matches no
/// rule, so the result is always `>= 1`.
pub fn resolve(width: f64, table: &BreakpointTable) -> usize {
    let mut best: Option<&Breakpoint> = None;
    for rule in &table.breakpoints {
        if rule.min_width <= width && best.is_none_or(|b| rule.min_width >= b.min_width) {
            best = Some(rule);
        }
    }
    sanitize_columns(best.map_or(table.default, |rule| rule.count))
}
