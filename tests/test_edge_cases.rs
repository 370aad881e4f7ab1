use pretty_assertions::assert_eq;
use recipe_intelligence::{parse_recipe, FieldProblem, RecipeError, SchemaViolations};
use serde_json::{json, Value};

fn schema_violations(text: &str) -> SchemaViolations {
    match parse_recipe(text) {
        Err(RecipeError::SchemaValidation(violations)) => violations,
        other => panic!("Expected schema validation error, got {:?}", other),
    }
}

fn sample_recipes() -> Vec<Value> {
    vec![
        json!({
            "name": "Tomato Soup",
            "ingredients": ["2 tomatoes"],
            "steps": ["Boil tomatoes."],
            "prep_time_minutes": 10,
            "calories": 80
        }),
        json!({
            "name": "Lentil Soup",
            "ingredients": ["1 cup red lentils", "1 onion", "2 carrots"],
            "steps": ["Dice.", "Sauté.", "Simmer 20 minutes."],
            "prep_time_minutes": 480,
            "calories": 0
        }),
        json!({
            "name": "Crème brûlée \u{1F36E}",
            "ingredients": [],
            "steps": ["Bake.", "Torch the sugar."],
            "prep_time_minutes": 1,
            "calories": 5000
        }),
    ]
}

#[test]
fn test_recipe_round_trips_through_every_wrapping() {
    for recipe in sample_recipes() {
        let compact = recipe.to_string();
        let pretty = serde_json::to_string_pretty(&recipe).unwrap();

        let wrappings = [
            format!("```json\n{}\n```", pretty),
            format!("```\n{}\n```", compact),
            format!("Here is your recipe:\n\n{}\n\nBon appétit!", pretty),
            compact.clone(),
            format!("\n\n   {}   \n", pretty),
        ];

        for text in wrappings {
            let parsed = parse_recipe(&text)
                .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", text, e));
            assert_eq!(serde_json::to_value(&parsed).unwrap(), recipe);
        }
    }
}

#[test]
fn test_scenario_fenced_block() {
    let text = "Here you go:\n```json\n{\"name\":\"Tomato Soup\",\"ingredients\":[\"2 tomatoes\"],\"steps\":[\"Boil tomatoes.\"],\"prep_time_minutes\":10,\"calories\":80}\n```";

    let recipe = parse_recipe(text).unwrap();
    assert_eq!(recipe.name(), "Tomato Soup");
    assert_eq!(recipe.ingredients(), ["2 tomatoes"]);
    assert_eq!(recipe.steps(), ["Boil tomatoes."]);
    assert_eq!(recipe.prep_time_minutes(), 10);
    assert_eq!(recipe.calories(), 80);
}

#[test]
fn test_scenario_bare_braces_with_prose() {
    let text = "Sure! {\"name\":\"Egg Scramble\",\"ingredients\":[\"2 eggs\"],\"steps\":[\"Whisk.\",\"Cook.\"],\"prep_time_minutes\":5,\"calories\":150} Enjoy!";

    let recipe = parse_recipe(text).unwrap();
    assert_eq!(
        serde_json::to_value(&recipe).unwrap(),
        json!({
            "name": "Egg Scramble",
            "ingredients": ["2 eggs"],
            "steps": ["Whisk.", "Cook."],
            "prep_time_minutes": 5,
            "calories": 150
        })
    );
}

#[test]
fn test_scenario_refusal_is_malformed() {
    let result = parse_recipe("I cannot help with that.");
    assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
}

#[test]
fn test_scenario_prep_time_out_of_range() {
    let text = r#"{"name":"Slow Roast","ingredients":["1 pork shoulder"],"steps":["Roast."],"prep_time_minutes":999,"calories":900}"#;

    let violations = schema_violations(text);
    assert_eq!(violations.fields(), vec!["prep_time_minutes"]);
    assert_eq!(
        violations.problem("prep_time_minutes"),
        Some(&FieldProblem::OutOfRange {
            value: 999,
            min: 1,
            max: 480
        })
    );
}

#[test]
fn test_text_without_braces_is_malformed() {
    for text in [
        "",
        "   ",
        "No recipe today.",
        "```json\n```",
        "name: Soup\ncalories: 80",
        "} backwards {",
    ] {
        let result = parse_recipe(text);
        assert!(
            matches!(result, Err(RecipeError::MalformedOutput(_))),
            "{:?} gave {:?}",
            text,
            result
        );
    }
}

#[test]
fn test_missing_field_is_named() {
    let full = sample_recipes().remove(0);
    for field in [
        "name",
        "ingredients",
        "steps",
        "prep_time_minutes",
        "calories",
    ] {
        let mut recipe = full.clone();
        recipe.as_object_mut().unwrap().remove(field);

        let violations = schema_violations(&recipe.to_string());
        assert!(violations.contains_field(field), "{} not reported", field);
    }
}

#[test]
fn test_calorie_boundaries() {
    let template = |calories: i64| {
        format!(
            r#"{{"name":"Toast","ingredients":["1 slice bread"],"steps":["Toast."],"prep_time_minutes":3,"calories":{}}}"#,
            calories
        )
    };

    assert_eq!(parse_recipe(&template(0)).unwrap().calories(), 0);
    assert_eq!(parse_recipe(&template(5000)).unwrap().calories(), 5000);
    assert_eq!(schema_violations(&template(-1)).fields(), vec!["calories"]);
    assert_eq!(schema_violations(&template(5001)).fields(), vec!["calories"]);
}

#[test]
fn test_broken_fenced_json_fails_without_fallthrough() {
    let text = "```json\n{\"name\": \"Soup\",}\n```\nOr, if you prefer: {\"name\":\"Tomato Soup\",\"ingredients\":[\"2 tomatoes\"],\"steps\":[\"Boil tomatoes.\"],\"prep_time_minutes\":10,\"calories\":80}";

    let result = parse_recipe(text);
    assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
}

#[test]
fn test_prose_with_stray_braces_is_malformed() {
    // First '{' to last '}' spans both objects, which is not one JSON value
    let text = "Option A: {\"name\": \"A\"} or option B: {\"name\": \"B\"}";
    let result = parse_recipe(text);
    assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
}

#[test]
fn test_fenced_nested_object_is_parsed_whole() {
    let text = "```json\n{\"name\": \"Soup\", \"extra\": {\"a\": 1}}\n```";

    let violations = schema_violations(text);
    assert_eq!(
        violations.fields(),
        vec!["ingredients", "steps", "prep_time_minutes", "calories"]
    );
}

#[test]
fn test_json_array_reply_is_schema_error() {
    let violations = schema_violations("[\"2 eggs\", \"1 onion\"]");
    assert_eq!(violations.fields(), vec!["(root)"]);
}
