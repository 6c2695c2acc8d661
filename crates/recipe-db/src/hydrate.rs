//! Row hydration.
//!
//! Raw rows carry ingredients and instructions as JSON-encoded text. A row
//! whose list payload is malformed still hydrates, with that list empty. A
//! row that cannot be scanned at all (type mismatch, overflow) is skipped and
//! logged; the rest of the result set is returned.

use std::fmt::Display;

use sqlx::mysql::MySqlRow;
use sqlx::FromRow;
use tracing::warn;

use recipe_core::{decode_string_list, Recipe};

/// One row of `recipes` as stored.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub rating: Option<f64>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

impl RecipeRow {
    /// Decode the list columns and fill text defaults.
    pub fn hydrate(&self) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            total_time_minutes: self.total_time_minutes,
            servings: self.servings,
            rating: self.rating,
            ingredients: decode_string_list(self.ingredients.as_deref()),
            instructions: decode_string_list(self.instructions.as_deref()),
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
            sodium: self.sodium,
        }
    }
}

/// Hydrate scanned rows, dropping any that failed to scan.
///
/// Returns the recipes and the number of rows skipped.
pub fn hydrate_scanned<E, I>(rows: I) -> (Vec<Recipe>, usize)
where
    I: IntoIterator<Item = Result<RecipeRow, E>>,
    E: Display,
{
    let mut recipes = Vec::new();
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match row {
            Ok(row) => recipes.push(row.hydrate()),
            Err(e) => {
                skipped += 1;
                warn!(
                    subsystem = "db",
                    component = "hydrator",
                    row_index = index,
                    error = %e,
                    "Skipping recipe row that failed to decode"
                );
            }
        }
    }
    (recipes, skipped)
}

/// Scan and hydrate MySQL rows.
pub fn hydrate_rows(rows: &[MySqlRow]) -> (Vec<Recipe>, usize) {
    hydrate_scanned(rows.iter().map(RecipeRow::from_row))
}
