//! Tests that the three request surfaces agree.
//!
//! The REST query string, JSON-RPC tool arguments and translated free text
//! must produce the same `RecipeQuery` for the same logical request, and must
//! drop the same malformed input.

use async_trait::async_trait;
use recipe_core::{
    translate_query, DietPresetTable, Error, NumericField, QueryTranslator, RecipeQuery, Result,
    SortColumn, SortOrder, TOOL_SEARCH_LIMIT,
};
use serde_json::json;

struct EchoTranslator;

#[async_trait]
impl QueryTranslator for EchoTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        Ok(format!("`?{text}`"))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

const REQUEST: &str = "diet=vegan&include_ingredients=tofu&max_calories=550&min_fiber=6.5\
                       &max_total_time=40&sort_by=rating&sort_order=desc";

#[tokio::test]
async fn test_three_surfaces_produce_identical_queries() {
    let rest = RecipeQuery::from_query_string(REQUEST, TOOL_SEARCH_LIMIT);

    let args = json!({
        "diet": "vegan",
        "include_ingredients": "tofu",
        "max_calories": 550,
        "min_fiber": "6.5",
        "max_total_time": 40,
        "sort_by": "rating",
        "sort_order": "desc"
    });
    let rpc = RecipeQuery::from_rpc_arguments(args.as_object().unwrap(), TOOL_SEARCH_LIMIT);

    let translated = translate_query(&EchoTranslator, REQUEST, TOOL_SEARCH_LIMIT)
        .await
        .unwrap();

    assert_eq!(rest, rpc);
    assert_eq!(rest, translated.query);
}

#[tokio::test]
async fn test_three_surfaces_drop_the_same_bad_input() {
    let bad = "min_calories=abc&sort_by=1%3D1%3BDROP%20TABLE%20recipes&shoe_size=9";
    let rest = RecipeQuery::from_query_string(bad, TOOL_SEARCH_LIMIT);

    let args = json!({
        "min_calories": "abc",
        "sort_by": "1=1;DROP TABLE recipes",
        "shoe_size": 9
    });
    let rpc = RecipeQuery::from_rpc_arguments(args.as_object().unwrap(), TOOL_SEARCH_LIMIT);

    let translated = translate_query(&EchoTranslator, bad, TOOL_SEARCH_LIMIT)
        .await
        .unwrap();

    for query in [&rest, &rpc, &translated.query] {
        assert!(!query.filter.has_constraints());
        assert_eq!(query.filter.sort_by, None);
        assert_eq!(query.filter.sort_order, SortOrder::Asc);
    }
}

#[test]
fn test_keto_preset_matches_equivalent_caller_filter() {
    let table = DietPresetTable::builtin();
    let keto = &table.lookup("keto").unwrap().constraints;

    let caller =
        RecipeQuery::from_query_string("max_carbs=20&min_fat=15&sort_by=fat&sort_order=desc", 100);

    assert_eq!(keto.ranges, caller.filter.ranges);
    assert_eq!(keto.sort_by, Some(SortColumn::Field(NumericField::Fat)));
    assert_eq!(keto.sort_by, caller.filter.sort_by);
    assert_eq!(keto.sort_order, caller.filter.sort_order);
}

#[tokio::test]
async fn test_translator_without_pairs_is_an_error() {
    struct Apologetic;

    #[async_trait]
    impl QueryTranslator for Apologetic {
        async fn translate(&self, _text: &str) -> Result<String> {
            Ok("Sorry, I can only help with recipes.".to_string())
        }

        fn model_name(&self) -> &str {
            "apologetic"
        }
    }

    let err = translate_query(&Apologetic, "what's the weather", TOOL_SEARCH_LIMIT)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Translator(_)));
}
