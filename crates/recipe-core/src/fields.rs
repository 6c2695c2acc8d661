//! Column whitelist for range filters and sorting.
//!
//! Every column name that can reach generated SQL is a variant of one of the
//! enums in this module. Parsing from caller text is a strict membership test
//! against these fixed sets; anything else yields `None` and is dropped by the
//! caller. The SQL text for a column always comes from [`NumericField::column`]
//! or [`SortColumn::column`], never from input.

use std::fmt;

use serde::{Serialize, Serializer};

/// Storage kind of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Whole numbers (calories, minutes, servings).
    Integer,
    /// Real numbers (macronutrients, sodium, rating).
    Real,
}

/// Numeric columns eligible for `min_*` / `max_*` range filters.
///
/// Declaration order is the emission order of range predicates, so generated
/// queries are stable for the same logical filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Calories,
    Protein,
    Fat,
    Carbs,
    Fiber,
    Sodium,
    PrepTimeMinutes,
    CookTimeMinutes,
    TotalTimeMinutes,
    Servings,
    Rating,
}

impl NumericField {
    /// All range fields in emission order.
    pub const ALL: [NumericField; 11] = [
        NumericField::Calories,
        NumericField::Protein,
        NumericField::Fat,
        NumericField::Carbs,
        NumericField::Fiber,
        NumericField::Sodium,
        NumericField::PrepTimeMinutes,
        NumericField::CookTimeMinutes,
        NumericField::TotalTimeMinutes,
        NumericField::Servings,
        NumericField::Rating,
    ];

    /// Column name in the `recipes` table.
    pub fn column(self) -> &'static str {
        match self {
            NumericField::Calories => "calories",
            NumericField::Protein => "protein",
            NumericField::Fat => "fat",
            NumericField::Carbs => "carbs",
            NumericField::Fiber => "fiber",
            NumericField::Sodium => "sodium",
            NumericField::PrepTimeMinutes => "prep_time_minutes",
            NumericField::CookTimeMinutes => "cook_time_minutes",
            NumericField::TotalTimeMinutes => "total_time_minutes",
            NumericField::Servings => "servings",
            NumericField::Rating => "rating",
        }
    }

    /// Stem used in `min_<stem>` / `max_<stem>` request parameters.
    ///
    /// The time columns use the short `prep_time` form the REST surface has
    /// always accepted.
    pub fn param_stem(self) -> &'static str {
        match self {
            NumericField::PrepTimeMinutes => "prep_time",
            NumericField::CookTimeMinutes => "cook_time",
            NumericField::TotalTimeMinutes => "total_time",
            other => other.column(),
        }
    }

    pub fn kind(self) -> NumericKind {
        match self {
            NumericField::Calories
            | NumericField::PrepTimeMinutes
            | NumericField::CookTimeMinutes
            | NumericField::TotalTimeMinutes
            | NumericField::Servings => NumericKind::Integer,
            NumericField::Protein
            | NumericField::Fat
            | NumericField::Carbs
            | NumericField::Fiber
            | NumericField::Sodium
            | NumericField::Rating => NumericKind::Real,
        }
    }

    /// Exact column-name lookup.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }

    /// Lookup by parameter stem; accepts both `prep_time` and `prep_time_minutes`.
    pub fn from_param_stem(stem: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.param_stem() == stem || f.column() == stem)
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Columns eligible for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Name,
    Field(NumericField),
}

impl SortColumn {
    /// Every sortable column, `id` and `name` first.
    pub fn all() -> impl Iterator<Item = SortColumn> {
        [SortColumn::Id, SortColumn::Name]
            .into_iter()
            .chain(NumericField::ALL.into_iter().map(SortColumn::Field))
    }

    /// Strict set-membership parse against the sortable column names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortColumn::Id),
            "name" => Some(SortColumn::Name),
            other => NumericField::from_column(other).map(SortColumn::Field),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Field(field) => field.column(),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Serialize for SortColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) sorts descending; every other value sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
