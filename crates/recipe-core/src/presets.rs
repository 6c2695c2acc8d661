//! Named diet presets.
//!
//! A preset is an immutable partial [`FilterSpec`]: range bounds, ingredient
//! include/exclude lists and a default sort. The table is built once at
//! startup with [`DietPresetTable::builtin`], wrapped in an `Arc`, and only
//! ever read afterwards. Unknown preset names are not an error; lookup simply
//! returns `None`.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::fields::{NumericField, SortColumn, SortOrder};
use crate::filter::{Bound, FilterSpec};

/// A named bundle of default constraints for one dietary pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct DietPreset {
    /// Lookup key, e.g. `keto`.
    pub key: &'static str,
    /// Display name, e.g. `Ketogenic Diet`.
    pub name: &'static str,
    pub description: &'static str,
    /// Constraints applied ahead of the caller's own.
    pub constraints: FilterSpec,
}

impl DietPreset {
    /// Constraints rendered in the request-parameter vocabulary
    /// (`max_carbs`, `exclude_ingredients`, `sort_by`, ...).
    pub fn filters(&self) -> Map<String, Value> {
        let spec = &self.constraints;
        let mut filters = Map::new();

        for (field, bounds) in spec.active_ranges() {
            if let Some(min) = bounds.min {
                filters.insert(
                    format!("min_{}", field.param_stem()),
                    number_value(min),
                );
            }
            if let Some(max) = bounds.max {
                filters.insert(
                    format!("max_{}", field.param_stem()),
                    number_value(max),
                );
            }
        }
        if let Some(term) = &spec.text_search {
            filters.insert("search".to_string(), Value::from(term.as_str()));
        }
        if !spec.include_ingredients.is_empty() {
            filters.insert(
                "include_ingredients".to_string(),
                Value::from(spec.include_ingredients.clone()),
            );
        }
        if !spec.exclude_ingredients.is_empty() {
            filters.insert(
                "exclude_ingredients".to_string(),
                Value::from(spec.exclude_ingredients.clone()),
            );
        }
        if let Some(column) = spec.sort_by {
            filters.insert("sort_by".to_string(), Value::from(column.column()));
            filters.insert(
                "sort_order".to_string(),
                Value::from(spec.sort_order.as_str()),
            );
        }
        filters
    }
}

/// Integral values render without a fractional part.
fn number_value(bound: Bound) -> Value {
    match bound {
        Bound::Int(v) => Value::from(v),
        Bound::Real(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Value::from(v as i64),
        Bound::Real(v) => Value::from(v),
    }
}

impl Serialize for DietPreset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DietPreset", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("description", self.description)?;
        state.serialize_field("filters", &self.filters())?;
        state.end()
    }
}

/// Read-only table of diet presets keyed by preset identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DietPresetTable {
    presets: BTreeMap<&'static str, DietPreset>,
}

impl DietPresetTable {
    /// Build a table from the given presets. Later duplicates replace earlier ones.
    pub fn new(presets: impl IntoIterator<Item = DietPreset>) -> Self {
        Self {
            presets: presets.into_iter().map(|p| (p.key, p)).collect(),
        }
    }

    /// The ten built-in presets.
    pub fn builtin() -> Self {
        Self::new(builtin_presets())
    }

    /// Look up a preset by key. Unknown keys yield `None`.
    pub fn lookup(&self, key: &str) -> Option<&DietPreset> {
        self.presets.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DietPreset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn preset(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    constraints: FilterSpec,
) -> DietPreset {
    DietPreset {
        key,
        name,
        description,
        constraints,
    }
}

fn sorted(field: NumericField, order: SortOrder) -> FilterSpec {
    FilterSpec::default().sorted_by(SortColumn::Field(field), order)
}

fn builtin_presets() -> Vec<DietPreset> {
    use NumericField::*;

    vec![
        preset(
            "keto",
            "Ketogenic Diet",
            "High fat, very low carb diet for ketosis",
            sorted(Fat, SortOrder::Desc)
                .with_max(Carbs, 20.0)
                .with_min(Fat, 15.0),
        ),
        preset(
            "paleo",
            "Paleo Diet",
            "Whole foods, no processed ingredients",
            sorted(Protein, SortOrder::Desc)
                .exclude_ingredients(["wheat", "grain", "dairy", "sugar", "legume", "bean"]),
        ),
        preset(
            "mediterranean",
            "Mediterranean Diet",
            "Heart-healthy with olive oil, fish, and vegetables",
            sorted(Rating, SortOrder::Desc)
                .include_ingredients(["olive", "fish", "vegetable", "fruit", "nut"])
                .with_max(Sodium, 1500.0),
        ),
        preset(
            "vegan",
            "Vegan Diet",
            "Plant-based, no animal products",
            sorted(Fiber, SortOrder::Desc).exclude_ingredients([
                "meat", "chicken", "beef", "pork", "fish", "dairy", "milk", "cheese", "egg",
                "butter",
            ]),
        ),
        preset(
            "vegetarian",
            "Vegetarian Diet",
            "No meat, but includes dairy and eggs",
            sorted(Protein, SortOrder::Desc)
                .exclude_ingredients(["meat", "chicken", "beef", "pork", "fish", "seafood"]),
        ),
        preset(
            "low_carb",
            "Low Carb Diet",
            "Reduced carbohydrate intake",
            sorted(Carbs, SortOrder::Asc).with_max(Carbs, 50.0),
        ),
        preset(
            "high_protein",
            "High Protein Diet",
            "Protein-rich foods for muscle building",
            sorted(Protein, SortOrder::Desc).with_min(Protein, 20.0),
        ),
        preset(
            "low_sodium",
            "Low Sodium Diet",
            "Heart-healthy, reduced sodium intake",
            sorted(Sodium, SortOrder::Asc).with_max(Sodium, 1000.0),
        ),
        preset(
            "diabetic",
            "Diabetic Friendly",
            "Low sugar, controlled carbs",
            sorted(Carbs, SortOrder::Asc)
                .with_max(Carbs, 45.0)
                .exclude_ingredients(["sugar", "honey", "syrup", "candy"]),
        ),
        preset(
            "heart_healthy",
            "Heart Healthy",
            "Low sodium, healthy fats",
            sorted(Fiber, SortOrder::Desc)
                .with_max(Sodium, 1200.0)
                .with_min(Fiber, 5.0)
                .exclude_ingredients(["fried", "processed"]),
        ),
    ]
}
