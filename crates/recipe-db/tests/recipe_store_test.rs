//! Live MySQL tests for the recipe repository.
//!
//! Skipped unless `RUN_DATABASE_TESTS` is set. Uses `DATABASE_URL` (or the
//! `DB_*` variables) and works on a reserved id range so it can share a
//! database with real data.

use recipe_db::{
    database_url_from_env, Database, Error, FilterSpec, NumericField, RecipeQuery, RecipeStore,
    DIRECT_SEARCH_LIMIT, TOOL_SEARCH_LIMIT,
};

const ID_BASE: i64 = 9_100_000;

async fn setup() -> Option<Database> {
    if std::env::var("RUN_DATABASE_TESTS").is_err() {
        eprintln!("skipping: RUN_DATABASE_TESTS not set");
        return None;
    }
    let _ = dotenvy::dotenv();
    let url = database_url_from_env().expect("database url");
    let db = Database::connect(&url).await.expect("Failed to connect");

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS recipes (
            id BIGINT PRIMARY KEY,
            name VARCHAR(255),
            description TEXT,
            image VARCHAR(512),
            prep_time_minutes INT,
            cook_time_minutes INT,
            total_time_minutes INT,
            servings INT,
            rating DOUBLE,
            ingredients TEXT,
            instructions TEXT,
            calories INT,
            protein DOUBLE,
            fat DOUBLE,
            carbs DOUBLE,
            fiber DOUBLE,
            sodium DOUBLE
        )"#,
    )
    .execute(db.pool())
    .await
    .expect("Failed to create table");

    Some(db)
}

/// Each test owns ids `ID_BASE + block * 1000 ..` and tags rows with its own
/// description marker, so tests can run in parallel.
async fn cleanup(db: &Database, block: i64) {
    sqlx::query("DELETE FROM recipes WHERE id >= ? AND id < ?")
        .bind(ID_BASE + block * 1_000)
        .bind(ID_BASE + (block + 1) * 1_000)
        .execute(db.pool())
        .await
        .expect("Failed to clean up");
}

async fn insert(
    db: &Database,
    id: i64,
    marker: &str,
    name: &str,
    ingredients: &str,
    fiber: f64,
    calories: i32,
) {
    sqlx::query(
        "INSERT INTO recipes (id, name, description, ingredients, instructions, fiber, calories) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(ID_BASE + id)
    .bind(name)
    .bind(format!("test recipe {marker}"))
    .bind(ingredients)
    .bind("[]")
    .bind(fiber)
    .bind(calories)
    .execute(db.pool())
    .await
    .expect("Failed to insert recipe");
}

#[tokio::test]
async fn test_fetch_hydrates_lists_and_reports_missing() {
    let Some(db) = setup().await else { return };
    cleanup(&db, 0).await;
    insert(&db, 1, "fetchmark", "Tofu Stir Fry", r#"["tofu", "broccoli"]"#, 6.0, 420).await;

    let recipe = db.recipes.fetch(ID_BASE + 1).await.expect("fetch");
    assert_eq!(recipe.name, "Tofu Stir Fry");
    assert_eq!(recipe.ingredients, vec!["tofu", "broccoli"]);
    assert!(recipe.instructions.is_empty());
    assert_eq!(recipe.rating, None);

    let err = db.recipes.fetch(ID_BASE + 999).await.unwrap_err();
    assert!(matches!(err, Error::RecipeNotFound(_)));

    cleanup(&db, 0).await;
}

#[tokio::test]
async fn test_search_applies_preset_and_caller_filters() {
    let Some(db) = setup().await else { return };
    cleanup(&db, 1).await;
    let m = "searchmark";
    insert(&db, 1010, m, "Tofu Bowl", r#"["tofu", "rice"]"#, 9.0, 500).await;
    insert(&db, 1011, m, "Tofu Omelette", r#"["tofu", "egg"]"#, 3.0, 350).await;
    insert(&db, 1012, m, "Lentil Stew", r#"["lentils"]"#, 12.0, 450).await;
    insert(&db, 1013, m, "Bad Lists", "not json", 1.0, 200).await;

    let presets = recipe_db::DietPresetTable::builtin();
    let query = RecipeQuery::from_query_string(
        "diet=vegan&include_ingredients=tofu&search=searchmark",
        DIRECT_SEARCH_LIMIT,
    );
    let recipes = db
        .recipes
        .search(presets.lookup("vegan"), &query.filter)
        .await
        .expect("search");
    let names: Vec<_> = recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Tofu Bowl"]);

    let filter = FilterSpec::new(TOOL_SEARCH_LIMIT)
        .with_text_search(m)
        .with_max(NumericField::Calories, 450.0);
    let recipes = db.recipes.search(None, &filter).await.expect("search");
    let ids: Vec<_> = recipes.iter().map(|r| r.id - ID_BASE).collect();
    assert_eq!(ids, vec![1011, 1012, 1013]);
    assert!(recipes[2].ingredients.is_empty());

    cleanup(&db, 1).await;
}

#[tokio::test]
async fn test_search_respects_row_cap() {
    let Some(db) = setup().await else { return };
    cleanup(&db, 2).await;
    for i in 0..25 {
        insert(&db, 2000 + i, "capmark", "Capped", "[]", 1.0, 100).await;
    }

    let filter = FilterSpec::new(TOOL_SEARCH_LIMIT).with_text_search("capmark");
    let recipes = db.recipes.search(None, &filter).await.expect("search");
    assert_eq!(recipes.len(), TOOL_SEARCH_LIMIT as usize);

    cleanup(&db, 2).await;
}
