use recipe_intelligence::{AppConfig, Mode, RecipeError, RecipeRequest};
use serde_json::json;

fn completion(content: &str) -> String {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

/// Ingredients text → Recipe against a local backend
#[tokio::test]
async fn test_builder_local_recipe() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::Regex(
            "Generate one recipe using these ingredients: Egg, Onions".to_string(),
        ))
        .with_status(200)
        .with_body(completion(
            "Sure! {\"name\":\"Egg Scramble\",\"ingredients\":[\"2 eggs\",\"1 onion\"],\"steps\":[\"Whisk.\",\"Cook.\"],\"prep_time_minutes\":5,\"calories\":150} Enjoy!",
        ))
        .create_async()
        .await;

    let recipe = RecipeRequest::builder()
        .ingredients_text("Egg, Onions")
        .mode(Mode::Local)
        .base_url(server.url())
        .config(AppConfig::default())
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.name(), "Egg Scramble");
    assert_eq!(recipe.steps().len(), 2);
    assert!(recipe.to_markdown().starts_with("## Egg Scramble"));
    mock.assert_async().await;
}

/// Model override reaches the request body
#[tokio::test]
async fn test_builder_openai_with_overrides() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model": "gpt-4o-mini"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(completion(
            "```json\n{\"name\":\"Tomato Soup\",\"ingredients\":[\"2 tomatoes\"],\"steps\":[\"Boil tomatoes.\"],\"prep_time_minutes\":10,\"calories\":80}\n```",
        ))
        .create_async()
        .await;

    let recipe = RecipeRequest::builder()
        .ingredient("Tomato")
        .mode(Mode::OpenAI)
        .api_key("sk-test")
        .model("gpt-4o-mini")
        .base_url(server.url())
        .config(AppConfig::default())
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.calories(), 80);
    mock.assert_async().await;
}

/// A malformed reply is reported, not retried
#[tokio::test]
async fn test_builder_malformed_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("I cannot help with that."))
        .expect(1)
        .create_async()
        .await;

    let result = RecipeRequest::builder()
        .ingredient("Egg")
        .base_url(server.url())
        .config(AppConfig::default())
        .build()
        .await;

    assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
    mock.assert_async().await;
}

/// Missing ingredients are rejected before any backend is contacted
#[tokio::test]
async fn test_builder_missing_ingredients() {
    let result = RecipeRequest::builder()
        .ingredients_text(" , ,")
        .config(AppConfig::default())
        .build()
        .await;

    assert!(matches!(result, Err(RecipeError::InvalidRequest(_))));
}

/// Real Ollama round trip
/// This test is ignored by default since it requires a running Ollama server
#[tokio::test]
#[ignore]
async fn test_builder_real_ollama() {
    let recipe = RecipeRequest::builder()
        .ingredients_text("Egg, Onions")
        .mode(Mode::Local)
        .config(AppConfig::default())
        .build()
        .await
        .unwrap();

    assert!(!recipe.name().is_empty());
    assert!((1..=480).contains(&recipe.prep_time_minutes()));
}
