//! System prompt for query translation.
//!
//! The prompt is generated from the same whitelists the adapters enforce, so
//! the model is only ever told about parameters that will be honored.

use recipe_core::adapters::params;
use recipe_core::{DietPresetTable, NumericField, NumericKind, SortColumn};

/// Build the system prompt listing the parameter vocabulary and preset keys.
pub fn system_prompt(presets: &DietPresetTable) -> String {
    let diets = presets.keys().collect::<Vec<_>>().join(", ");

    let mut ranges = String::new();
    for field in NumericField::ALL {
        let kind = match field.kind() {
            NumericKind::Integer => "integer",
            NumericKind::Real => "number",
        };
        ranges.push_str(&format!(
            "- min_{stem}, max_{stem} ({kind})\n",
            stem = field.param_stem()
        ));
    }

    let sortable = SortColumn::all()
        .map(SortColumn::column)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You convert recipe requests into URL query strings for a recipe search API.\n\
         Reply with the query string only, for example: diet=keto&max_calories=500\n\
         No explanation, no code fences, no leading '?'.\n\
         \n\
         Parameters:\n\
         - {search}: words to match in the recipe name or description\n\
         - {diet}: one of {diets}\n\
         - {include}: comma-separated ingredients that must appear\n\
         - {exclude}: comma-separated ingredients that must not appear\n\
         {ranges}\
         - {sort_by}: one of {sortable}\n\
         - {sort_order}: asc or desc\n\
         \n\
         Use only these parameters. Omit anything the request does not ask for.",
        search = params::SEARCH,
        diet = params::DIET,
        include = params::INCLUDE_INGREDIENTS,
        exclude = params::EXCLUDE_INGREDIENTS,
        sort_by = params::SORT_BY,
        sort_order = params::SORT_ORDER,
    )
}
