//! Protocol-agnostic description of a recipe search.
//!
//! A [`FilterSpec`] is what every request surface (REST query string, RPC
//! tool arguments, translated free text) and every diet preset reduces to.
//! Range keys and the sort column are whitelist enums, so an unknown field
//! cannot be represented at all; adapters drop such input before it gets here.
//!
//! # Example
//!
//! ```
//! use recipe_core::{FilterSpec, NumericField, SortColumn, SortOrder};
//!
//! let filter = FilterSpec::new(20)
//!     .with_text_search("soup")
//!     .with_max(NumericField::Calories, 500.0)
//!     .exclude_ingredient("pork")
//!     .sorted_by(SortColumn::Field(NumericField::Rating), SortOrder::Desc);
//!
//! assert!(filter.has_constraints());
//! assert_eq!(filter.row_limit, 20);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::defaults::DIRECT_SEARCH_LIMIT;
use crate::fields::{NumericField, NumericKind, SortColumn, SortOrder};

/// One bound value, kept exact for integer columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Real(f64),
}

impl Bound {
    /// Coerce to the representation of a column kind.
    ///
    /// Integer columns only take integral values within `i64`; non-finite
    /// reals are rejected everywhere.
    pub fn for_kind(self, kind: NumericKind) -> Option<Bound> {
        match (self, kind) {
            (Bound::Int(v), NumericKind::Integer) => Some(Bound::Int(v)),
            (Bound::Int(v), NumericKind::Real) => Some(Bound::Real(v as f64)),
            (Bound::Real(v), _) if !v.is_finite() => None,
            (Bound::Real(v), NumericKind::Real) => Some(Bound::Real(v)),
            (Bound::Real(v), NumericKind::Integer) => {
                // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
                let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
                (v.fract() == 0.0 && in_range).then(|| Bound::Int(v as i64))
            }
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Bound::Int(v) => v as f64,
            Bound::Real(v) => v,
        }
    }
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Bound::Int(value)
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Real(value)
    }
}

/// Inclusive lower/upper bound on one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Bound>,
}

impl RangeBounds {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Normalized search constraints, independent of the input protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    /// Matched against recipe name and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_search: Option<String>,

    /// Each token must appear in the stored ingredient list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_ingredients: Vec<String>,

    /// No token may appear in the stored ingredient list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_ingredients: Vec<String>,

    /// Bounds per numeric column, iterated in column declaration order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ranges: BTreeMap<NumericField, RangeBounds>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortColumn>,

    pub sort_order: SortOrder,

    /// Row cap for the call site (always at least 1).
    pub row_limit: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new(DIRECT_SEARCH_LIMIT)
    }
}

impl FilterSpec {
    /// Empty filter (matches every recipe) capped at `row_limit` rows.
    pub fn new(row_limit: u32) -> Self {
        Self {
            text_search: None,
            include_ingredients: Vec::new(),
            exclude_ingredients: Vec::new(),
            ranges: BTreeMap::new(),
            sort_by: None,
            sort_order: SortOrder::Asc,
            row_limit: row_limit.max(1),
        }
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Set the free-text search term. Blank terms are ignored.
    pub fn with_text_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        if !term.trim().is_empty() {
            self.text_search = Some(term);
        }
        self
    }

    /// Require an ingredient substring. Blank tokens are ignored.
    pub fn include_ingredient(mut self, token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();
        if !token.is_empty() {
            self.include_ingredients.push(token.to_string());
        }
        self
    }

    /// Forbid an ingredient substring. Blank tokens are ignored.
    pub fn exclude_ingredient(mut self, token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();
        if !token.is_empty() {
            self.exclude_ingredients.push(token.to_string());
        }
        self
    }

    pub fn include_ingredients<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .fold(self, |spec, token| spec.include_ingredient(token))
    }

    pub fn exclude_ingredients<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .fold(self, |spec, token| spec.exclude_ingredient(token))
    }

    /// Set the inclusive lower bound for `field`. Values the column kind
    /// cannot hold (see [`Bound::for_kind`]) are ignored.
    pub fn with_min(mut self, field: NumericField, value: impl Into<Bound>) -> Self {
        if let Some(bound) = value.into().for_kind(field.kind()) {
            self.ranges.entry(field).or_default().min = Some(bound);
        }
        self
    }

    /// Set the inclusive upper bound for `field`. Values the column kind
    /// cannot hold are ignored.
    pub fn with_max(mut self, field: NumericField, value: impl Into<Bound>) -> Self {
        if let Some(bound) = value.into().for_kind(field.kind()) {
            self.ranges.entry(field).or_default().max = Some(bound);
        }
        self
    }

    pub fn sorted_by(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort_by = Some(column);
        self.sort_order = order;
        self
    }

    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = row_limit.max(1);
        self
    }

    // =========================================================================
    // QUERY METHODS
    // =========================================================================

    /// Bounds for `field`, if any were set.
    pub fn range(&self, field: NumericField) -> Option<RangeBounds> {
        self.ranges.get(&field).copied().filter(|b| !b.is_empty())
    }

    /// Populated ranges in column order.
    pub fn active_ranges(&self) -> impl Iterator<Item = (NumericField, RangeBounds)> + '_ {
        self.ranges
            .iter()
            .filter(|(_, bounds)| !bounds.is_empty())
            .map(|(field, bounds)| (*field, *bounds))
    }

    /// True when any predicate (not counting sort or row cap) is set.
    pub fn has_constraints(&self) -> bool {
        self.text_search.is_some()
            || !self.include_ingredients.is_empty()
            || !self.exclude_ingredients.is_empty()
            || self.active_ranges().next().is_some()
    }

    /// Number of predicate fragments this filter contributes.
    pub fn predicate_count(&self) -> usize {
        let ranges: usize = self
            .active_ranges()
            .map(|(_, b)| b.min.is_some() as usize + b.max.is_some() as usize)
            .sum();
        ranges
            + self.text_search.is_some() as usize
            + self.include_ingredients.len()
            + self.exclude_ingredients.len()
    }
}
