//! Chat request normalization through the public API.

use agent_cli_to_api::openai::{
    ChatCompletionRequest, ChatMessage, NormalizedRequest, Role, build_prompt, content_text,
    extract_image_urls, image_urls,
};
use serde_json::json;

#[test]
fn content_text_examples() {
    assert_eq!(content_text(&json!("")), "");
    assert_eq!(content_text(&json!("hello")), "hello");
    assert_eq!(
        content_text(&json!([
            {"type": "text", "text": "a"},
            {"type": "other"},
            {"type": "text", "text": "b"}
        ])),
        "ab"
    );
}

#[test]
fn image_urls_example() {
    let content = json!([
        {"type": "image_url", "image_url": {"url": "http://x/1.png"}},
        {"type": "text", "text": "ignored"},
        {"type": "input_image", "image_url": "http://x/2.png"}
    ]);
    assert_eq!(image_urls(&content), ["http://x/1.png", "http://x/2.png"]);
}

#[test]
fn build_prompt_example() {
    let messages = [
        ChatMessage::new(Role::System, "Be terse."),
        ChatMessage::new(Role::User, "Hi"),
    ];
    assert_eq!(build_prompt(&messages), "SYSTEM: Be terse.\n\nUSER: Hi");
}

#[test]
fn vision_request_end_to_end() {
    let body = r#"{
        "model": "claude-sonnet",
        "stream": true,
        "temperature": 0.1,
        "messages": [
            {"role": "system", "content": "You describe images."},
            {"role": "user", "content": [
                {"type": "text", "text": "What is in "},
                {"type": "text", "text": "these pictures?"},
                {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA", "detail": "low"}},
                {"type": "image_url", "image_url": {"url": "https://example.com/cat.jpg"}}
            ]}
        ]
    }"#;
    let request = ChatCompletionRequest::from_json(body).unwrap();
    assert!(request.stream);
    assert!(request.extra.contains_key("temperature"));

    let normalized = NormalizedRequest::from_request(&request);
    assert_eq!(
        normalized.prompt,
        "SYSTEM: You describe images.\n\nUSER: What is in these pictures?"
    );
    assert_eq!(
        normalized.image_urls,
        ["data:image/png;base64,AAAA", "https://example.com/cat.jpg"]
    );
}

#[test]
fn tool_and_developer_roles() {
    let messages = [
        ChatMessage::new(Role::Developer, "Use tools sparingly."),
        ChatMessage::new(Role::Assistant, serde_json::Value::Null),
        ChatMessage::new(Role::Tool, json!({"result": 42})),
    ];
    let prompt = build_prompt(&messages);
    assert!(prompt.starts_with("DEVELOPER: Use tools sparingly.\n\nASSISTANT: \n\nTOOL: {"));
    assert!(prompt.contains("\"result\":42"));
    assert!(extract_image_urls(&messages).is_empty());
}

#[test]
fn malformed_parts_never_error() {
    let weird = [
        json!(null),
        json!(0),
        json!([null, 1, "x", [], {}]),
        json!({"type": 5}),
        json!([{"type": "image_url", "image_url": null}]),
    ];
    for content in &weird {
        let _ = content_text(content);
        assert!(image_urls(content).iter().all(|u| !u.is_empty()));
    }
}
