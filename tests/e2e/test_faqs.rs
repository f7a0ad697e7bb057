use crate::e2e::helpers;

use helpers::{is_generated_url, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_faq_for_existing_topic(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Data Science", "Data science is a field.", "en", None)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/faqs",
            &json!({
                "topic_id": topic.id,
                "question": "What is data science?",
                "answer": "Data science extracts knowledge from data.",
                "language": "en"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.str_field("topic_id"), Some(topic.id.to_string().as_str()));
    assert_eq!(response.str_field("question"), Some("What is data science?"));

    let audio_url = response.str_field("answer_audio_url").unwrap();
    assert!(is_generated_url(audio_url, "faq"), "unexpected url {}", audio_url);

    assert_eq!(ctx.fixtures.get_faq_count(topic.id).await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_faq_for_unknown_topic(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/faqs",
            &json!({
                "topic_id": Uuid::new_v4(),
                "question": "Orphan?",
                "answer": "No parent."
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_error_message("not found");
    assert_eq!(ctx.synthesis_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_faq_with_blank_answer(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Data Science", "Data science is a field.", "en", None)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/faqs",
            &json!({ "topic_id": topic.id, "question": "Why?", "answer": "  " }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("answer cannot be empty");
    assert_eq!(ctx.fixtures.get_faq_count(topic.id).await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resolve_faq_audio_on_read(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("डेटा साइंस", "डेटा साइंस एक क्षेत्र है।", "hi", None)
        .await
        .unwrap();
    let faq = ctx
        .fixtures
        .create_faq(topic.id, "डेटा साइंस क्या है?", "डेटा साइंस एक बहु-विषयक क्षेत्र है।", "hi", None)
        .await
        .unwrap();

    let response = ctx.client.get(&format!("/api/faqs/{}", faq.id)).await.unwrap();
    response.assert_status(StatusCode::OK);

    let audio_url = response.str_field("answer_audio_url").unwrap().to_string();
    assert!(is_generated_url(&audio_url, "faq"), "unexpected url {}", audio_url);
    assert_eq!(
        ctx.fixtures.get_faq_audio_url(faq.id).await.unwrap().as_deref(),
        Some(audio_url.as_str())
    );
    assert_eq!(ctx.synthesis_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_faq(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/faqs/{}", Uuid::new_v4()))
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.get("/api/faqs/42").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_resolve_faq_audio_when_reading_topic(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a language.", "en", Some("/static/media/audio/topic_1.mp3"))
        .await
        .unwrap();
    ctx.fixtures
        .create_faq(topic.id, "What is Python?", "A language.", "en", None)
        .await
        .unwrap();

    let response = ctx.client.get(&format!("/api/topics/{}", topic.id)).await.unwrap();
    response.assert_status(StatusCode::OK);

    let faqs = &response.body.as_ref().unwrap()["faqs"];
    assert_eq!(faqs[0]["answer_audio_url"], json!(null));
    assert_eq!(ctx.synthesis_calls(), 0);
}
