//! Recipe filter query builder.
//!
//! Turns an optional diet preset plus a caller [`FilterSpec`] into one
//! parameterized `SELECT` against the `recipes` table. The SQL text is built
//! only from fixed keywords, whitelisted column names and `?` placeholders;
//! every caller-influenced value travels in the parameter list.
//!
//! Fragment order is fixed: preset constraints first, then caller
//! constraints. Within one filter: ranges in column order (min before max),
//! text search, included ingredients, excluded ingredients.
//!
//! Ingredient and text matching use `LIKE '%token%'` against the stored
//! blob. Wildcards inside the token (`%`, `_`) are passed through unescaped,
//! and partial-word collisions ("egg" matches "eggplant") are a known
//! limitation of substring matching.

use recipe_core::defaults::RECIPE_TABLE;
use recipe_core::{Bound, DietPreset, FilterSpec, NumericKind, SortColumn, SortOrder};

/// Columns selected for every recipe query, in hydration order.
///
/// Real columns are cast so `DECIMAL` and `FLOAT` storage decode as `f64`
/// (needs MySQL 8.0.17+ or MariaDB 10.4.5+ for `CAST(.. AS DOUBLE)`).
pub const RECIPE_COLUMNS: &str = "id, name, description, image, prep_time_minutes, \
     cook_time_minutes, total_time_minutes, servings, CAST(rating AS DOUBLE) AS rating, \
     ingredients, instructions, calories, CAST(protein AS DOUBLE) AS protein, \
     CAST(fat AS DOUBLE) AS fat, CAST(carbs AS DOUBLE) AS carbs, \
     CAST(fiber AS DOUBLE) AS fiber, CAST(sodium AS DOUBLE) AS sodium";

/// Type-safe parameter binding for SQL queries.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// Bound against an integer column.
    Int(i64),
    /// Bound against a real column.
    Float(f64),
    /// `LIKE` pattern.
    String(String),
}

/// A composed search: predicate fragments, their parameters, ordering and cap.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    /// `AND`-joined predicate fragments, excluding the `1=1` base.
    pub clauses: Vec<String>,
    /// One parameter per placeholder in `clauses`, in order.
    pub params: Vec<QueryParam>,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,
    /// Row cap, bound as the final parameter.
    pub limit: u32,
}

impl ComposedQuery {
    /// `1=1 AND ...` predicate.
    pub fn where_clause(&self) -> String {
        std::iter::once("1=1")
            .chain(self.clauses.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn order_clause(&self) -> String {
        format!(
            "ORDER BY {} {}",
            self.sort_column.column(),
            self.sort_order.as_sql()
        )
    }

    /// Complete statement. The row cap is the last `?`.
    pub fn sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} {} LIMIT ?",
            RECIPE_COLUMNS,
            RECIPE_TABLE,
            self.where_clause(),
            self.order_clause()
        )
    }

    /// Number of `?` placeholders in [`sql`](Self::sql), row cap included.
    pub fn placeholder_count(&self) -> usize {
        self.params.len() + 1
    }
}

/// Generates the recipe search statement for a preset and caller filter.
///
/// # Example
///
/// ```
/// use recipe_core::{DietPresetTable, FilterSpec};
/// use recipe_db::filter_query::RecipeFilterQueryBuilder;
///
/// let presets = DietPresetTable::builtin();
/// let caller = FilterSpec::new(100).include_ingredient("tofu");
/// let query = RecipeFilterQueryBuilder::new(presets.lookup("vegan"), &caller).build();
///
/// assert_eq!(query.params.len(), 11);
/// assert_eq!(query.order_clause(), "ORDER BY fiber DESC");
/// assert!(query.sql().ends_with("LIMIT ?"));
/// ```
pub struct RecipeFilterQueryBuilder<'a> {
    preset: Option<&'a FilterSpec>,
    caller: &'a FilterSpec,
}

impl<'a> RecipeFilterQueryBuilder<'a> {
    pub fn new(preset: Option<&'a DietPreset>, caller: &'a FilterSpec) -> Self {
        Self {
            preset: preset.map(|p| &p.constraints),
            caller,
        }
    }

    pub fn build(&self) -> ComposedQuery {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(preset) = self.preset {
            push_constraints(preset, &mut clauses, &mut params);
        }
        push_constraints(self.caller, &mut clauses, &mut params);

        let (sort_column, sort_order) = self.sort();

        ComposedQuery {
            clauses,
            params,
            sort_column,
            sort_order,
            limit: self.caller.row_limit,
        }
    }

    /// Caller sort wins, then the preset's, then id in the caller's direction.
    fn sort(&self) -> (SortColumn, SortOrder) {
        let caller = self
            .caller
            .sort_by
            .map(|column| (column, self.caller.sort_order));
        let preset = self
            .preset
            .and_then(|p| p.sort_by.map(|column| (column, p.sort_order)));
        caller
            .or(preset)
            .unwrap_or((SortColumn::Id, self.caller.sort_order))
    }
}

/// Shorthand for [`RecipeFilterQueryBuilder::build`].
pub fn compose(preset: Option<&DietPreset>, caller: &FilterSpec) -> ComposedQuery {
    RecipeFilterQueryBuilder::new(preset, caller).build()
}

fn push_constraints(spec: &FilterSpec, clauses: &mut Vec<String>, params: &mut Vec<QueryParam>) {
    for (field, bounds) in spec.active_ranges() {
        let bind = |bound: Bound| match (field.kind(), bound) {
            (NumericKind::Integer, Bound::Int(v)) => QueryParam::Int(v),
            (NumericKind::Integer, Bound::Real(v)) => QueryParam::Int(v as i64),
            (NumericKind::Real, bound) => QueryParam::Float(bound.as_f64()),
        };
        if let Some(min) = bounds.min {
            clauses.push(format!("{} >= ?", field.column()));
            params.push(bind(min));
        }
        if let Some(max) = bounds.max {
            clauses.push(format!("{} <= ?", field.column()));
            params.push(bind(max));
        }
    }

    if let Some(term) = &spec.text_search {
        let pattern = contains_pattern(term);
        clauses.push("(name LIKE ? OR description LIKE ?)".to_string());
        params.push(QueryParam::String(pattern.clone()));
        params.push(QueryParam::String(pattern));
    }

    for token in &spec.include_ingredients {
        clauses.push("ingredients LIKE ?".to_string());
        params.push(QueryParam::String(contains_pattern(token)));
    }

    for token in &spec.exclude_ingredients {
        clauses.push("ingredients NOT LIKE ?".to_string());
        params.push(QueryParam::String(contains_pattern(token)));
    }
}

fn contains_pattern(token: &str) -> String {
    format!("%{token}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{DietPresetTable, NumericField};

    #[test]
    fn test_empty_filter_selects_everything_by_id() {
        let query = compose(None, &FilterSpec::new(100));
        assert_eq!(query.where_clause(), "1=1");
        assert_eq!(query.order_clause(), "ORDER BY id ASC");
        assert!(query.params.is_empty());
        assert_eq!(query.limit, 100);
        assert_eq!(
            query.sql(),
            format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE 1=1 ORDER BY id ASC LIMIT ?")
        );
    }

    #[test]
    fn test_real_columns_are_selected_as_double() {
        for field in NumericField::ALL {
            let cast = format!("CAST({0} AS DOUBLE) AS {0}", field.column());
            match field.kind() {
                NumericKind::Real => assert!(RECIPE_COLUMNS.contains(&cast), "{cast}"),
                NumericKind::Integer => {
                    assert!(!RECIPE_COLUMNS.contains(&cast), "{cast}");
                    assert!(RECIPE_COLUMNS.contains(field.column()));
                }
            }
        }
    }

    #[test]
    fn test_fragment_order_within_one_filter() {
        let caller = FilterSpec::new(100)
            .exclude_ingredient("nut")
            .include_ingredient("rice")
            .with_text_search("bowl")
            .with_max(NumericField::Rating, 5.0)
            .with_min(NumericField::Calories, 200.0)
            .with_max(NumericField::Calories, 600.0);
        let query = compose(None, &caller);
        assert_eq!(
            query.clauses,
            vec![
                "calories >= ?",
                "calories <= ?",
                "rating <= ?",
                "(name LIKE ? OR description LIKE ?)",
                "ingredients LIKE ?",
                "ingredients NOT LIKE ?",
            ]
        );
        assert_eq!(
            query.params,
            vec![
                QueryParam::Int(200),
                QueryParam::Int(600),
                QueryParam::Float(5.0),
                QueryParam::String("%bowl%".into()),
                QueryParam::String("%bowl%".into()),
                QueryParam::String("%rice%".into()),
                QueryParam::String("%nut%".into()),
            ]
        );
    }

    #[test]
    fn test_preset_fragments_precede_caller_fragments() {
        let presets = DietPresetTable::builtin();
        let caller = FilterSpec::new(100).with_max(NumericField::Calories, 400.0);
        let query = compose(presets.lookup("keto"), &caller);
        assert_eq!(
            query.clauses,
            vec!["fat >= ?", "carbs <= ?", "calories <= ?"]
        );
        assert_eq!(
            query.params,
            vec![
                QueryParam::Float(15.0),
                QueryParam::Float(20.0),
                QueryParam::Int(400),
            ]
        );
    }

    #[test]
    fn test_caller_sort_overrides_preset_sort() {
        let presets = DietPresetTable::builtin();
        let caller = FilterSpec::new(100).sorted_by(SortColumn::Name, SortOrder::Asc);
        let query = compose(presets.lookup("keto"), &caller);
        assert_eq!(query.order_clause(), "ORDER BY name ASC");
    }

    #[test]
    fn test_preset_sort_applies_without_caller_sort() {
        let presets = DietPresetTable::builtin();
        let query = compose(presets.lookup("low_sodium"), &FilterSpec::new(100));
        assert_eq!(query.order_clause(), "ORDER BY sodium ASC");
    }

    #[test]
    fn test_bare_sort_order_applies_to_id() {
        let caller = FilterSpec::new(100).with_sort_order(SortOrder::Desc);
        assert_eq!(compose(None, &caller).order_clause(), "ORDER BY id DESC");
    }

    #[test]
    fn test_integer_bounds_bind_exactly() {
        let caller = FilterSpec::new(100)
            .with_max(NumericField::Calories, i64::MAX)
            .with_min(NumericField::Calories, 9_007_199_254_740_993_i64);
        let query = compose(None, &caller);
        assert_eq!(
            query.params,
            vec![
                QueryParam::Int(9_007_199_254_740_993),
                QueryParam::Int(i64::MAX),
            ]
        );
    }

    #[test]
    fn test_every_sort_column_is_emitted_verbatim() {
        let mut columns = vec![SortColumn::Id, SortColumn::Name];
        columns.extend(NumericField::ALL.into_iter().map(SortColumn::Field));
        for column in columns {
            let caller = FilterSpec::new(100).sorted_by(column, SortOrder::Desc);
            let query = compose(None, &caller);
            assert_eq!(
                query.order_clause(),
                format!("ORDER BY {} DESC", column.column())
            );
        }
    }

    #[test]
    fn test_limit_comes_from_caller() {
        let presets = DietPresetTable::builtin();
        let query = compose(presets.lookup("vegan"), &FilterSpec::new(20));
        assert_eq!(query.limit, 20);
        assert_eq!(query.placeholder_count(), query.params.len() + 1);
    }

    #[test]
    fn test_placeholders_match_params() {
        let presets = DietPresetTable::builtin();
        let caller = FilterSpec::new(100)
            .with_text_search("x")
            .include_ingredients(["a", "b"])
            .with_min(NumericField::Servings, 2.0);
        let query = compose(presets.lookup("mediterranean"), &caller);
        assert_eq!(query.sql().matches('?').count(), query.placeholder_count());
    }
}
