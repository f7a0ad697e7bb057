use crate::e2e::helpers;

use helpers::{aws_mocks, is_fallback_url, is_generated_url, Synthesis, TestContext, FALLBACK_FILES};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_and_persist_audio_on_first_read(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a high-level programming language.", "en", None)
        .await
        .unwrap();

    let response = ctx.client.get(&format!("/api/topics/{}", topic.id)).await.unwrap();
    response.assert_status(StatusCode::OK);

    let audio_url = response.str_field("audio_url").unwrap().to_string();
    assert!(is_generated_url(&audio_url, "topic"), "unexpected url {}", audio_url);

    let stored = ctx.fixtures.get_topic_audio_url(topic.id).await.unwrap();
    assert_eq!(stored.as_deref(), Some(audio_url.as_str()));

    let filename = audio_url.rsplit('/').next().unwrap().to_string();
    assert_eq!(ctx.generated_files(), vec![filename]);
    assert_eq!(ctx.synthesis_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_regenerate_on_later_reads(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a high-level programming language.", "en", None)
        .await
        .unwrap();
    let path = format!("/api/topics/{}", topic.id);

    let first = ctx.client.get(&path).await.unwrap();
    let second = ctx.client.get(&path).await.unwrap();

    assert_eq!(first.str_field("audio_url"), second.str_field("audio_url"));
    assert_eq!(ctx.synthesis_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_one_asset_between_records_with_identical_text(ctx: &TestContext) {
    let text = "Machine learning lets computers learn from data.";
    let first = ctx.fixtures.create_topic("ML", text, "en", None).await.unwrap();
    let second = ctx.fixtures.create_topic("ML again", text, "en", None).await.unwrap();

    let a = ctx.client.get(&format!("/api/topics/{}", first.id)).await.unwrap();
    let b = ctx.client.get(&format!("/api/topics/{}", second.id)).await.unwrap();

    assert_eq!(a.str_field("audio_url"), b.str_field("audio_url"));
    assert_eq!(ctx.generated_files().len(), 1);
    // The second read is a content-addressed cache hit
    assert_eq!(ctx.synthesis_calls(), 1);
    assert_eq!(
        ctx.fixtures.get_topic_audio_url(second.id).await.unwrap().as_deref(),
        b.str_field("audio_url")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_agree_on_one_url_under_concurrent_reads(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Concurrency is not parallelism.", "en", None)
        .await
        .unwrap();
    let path = format!("/api/topics/{}", topic.id);

    let mut futures = Vec::new();
    for _ in 0..8 {
        let client = ctx.client.clone();
        let path = path.clone();
        futures.push(async move { client.get(&path).await });
    }
    let results = futures::future::join_all(futures).await;

    let urls: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().str_field("audio_url").unwrap().to_string())
        .collect();
    assert!(urls.windows(2).all(|w| w[0] == w[1]), "urls differ: {:?}", urls);
    assert_eq!(ctx.generated_files().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_generated_audio_as_static_file(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a high-level programming language.", "en", None)
        .await
        .unwrap();

    let response = ctx.client.get(&format!("/api/topics/{}", topic.id)).await.unwrap();
    let audio_url = response.str_field("audio_url").unwrap().to_string();

    let audio = ctx.client.get(&audio_url).await.unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(audio.body_bytes, aws_mocks::mock_audio_bytes());
}

#[tokio::test]
async fn it_should_fall_back_when_no_backend_is_configured() {
    let ctx = TestContext::with_synthesis(Synthesis::Disabled).await.unwrap();
    let topic = ctx
        .fixtures
        .create_topic("Intro to X", "Intro to X", "en", None)
        .await
        .unwrap();
    let path = format!("/api/topics/{}", topic.id);

    let response = ctx.client.get(&path).await.unwrap();
    response.assert_status(StatusCode::OK);

    let audio_url = response.str_field("audio_url").unwrap().to_string();
    assert!(is_fallback_url(&audio_url, "topic"), "unexpected url {}", audio_url);

    // Fallback selections are persisted like generated ones
    let stored = ctx.fixtures.get_topic_audio_url(topic.id).await.unwrap();
    assert_eq!(stored.as_deref(), Some(audio_url.as_str()));
    assert!(ctx.generated_files().is_empty());
}

#[tokio::test]
async fn it_should_pick_the_same_fallback_for_the_same_text() {
    let ctx = TestContext::with_synthesis(Synthesis::Disabled).await.unwrap();
    let answer = "डेटा साइंस एक बहु-विषयक क्षेत्र है।";
    let topic = ctx
        .fixtures
        .create_topic("डेटा साइंस", "डेटा साइंस एक क्षेत्र है।", "hi", None)
        .await
        .unwrap();
    let first = ctx.fixtures.create_faq(topic.id, "Q1", answer, "hi", None).await.unwrap();
    let second = ctx.fixtures.create_faq(topic.id, "Q2", answer, "hi", None).await.unwrap();

    let a = ctx.client.get(&format!("/api/faqs/{}", first.id)).await.unwrap();
    let b = ctx.client.get(&format!("/api/faqs/{}", second.id)).await.unwrap();

    let url = a.str_field("answer_audio_url").unwrap();
    assert!(is_fallback_url(url, "faq"), "unexpected url {}", url);
    assert_eq!(b.str_field("answer_audio_url"), Some(url));
}

#[tokio::test]
async fn it_should_fall_back_when_the_backend_fails() {
    let ctx = TestContext::with_synthesis(Synthesis::Unreachable).await.unwrap();

    let response = ctx
        .client
        .post(
            "/api/topics",
            &json!({ "title": "Python", "content_text": "Python is a language." }),
        )
        .await
        .unwrap();

    // Synthesis failure never fails the request
    response.assert_status(StatusCode::CREATED);
    let audio_url = response.str_field("audio_url").unwrap();
    assert!(is_fallback_url(audio_url, "topic"), "unexpected url {}", audio_url);
    assert!(ctx.generated_files().is_empty());

    let ready = ctx.client.get("/health/ready").await.unwrap();
    assert_eq!(ready.str_field("tts"), Some("polly"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_purge_generated_audio_and_keep_fallbacks(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a language.", "en", None)
        .await
        .unwrap();
    let faq = ctx
        .fixtures
        .create_faq(topic.id, "What is Python?", "A language.", "en", None)
        .await
        .unwrap();
    ctx.client.get(&format!("/api/topics/{}", topic.id)).await.unwrap();
    ctx.client.get(&format!("/api/faqs/{}", faq.id)).await.unwrap();
    assert_eq!(ctx.generated_files().len(), 2);

    let response = ctx.client.post_empty("/api/admin/audio/purge").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "deleted": 2 })));
    assert!(ctx.generated_files().is_empty());
    let mut fallbacks: Vec<String> = FALLBACK_FILES.iter().map(|s| s.to_string()).collect();
    fallbacks.sort();
    assert_eq!(ctx.audio_files(), fallbacks);

    // Stored URLs pointing at purged assets are forgotten
    assert_eq!(ctx.fixtures.get_topic_audio_url(topic.id).await.unwrap(), None);
    assert_eq!(ctx.fixtures.get_faq_audio_url(faq.id).await.unwrap(), None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_regenerate_after_purge(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a language.", "en", None)
        .await
        .unwrap();
    let path = format!("/api/topics/{}", topic.id);

    let before = ctx.client.get(&path).await.unwrap();
    ctx.client
        .post_empty("/api/admin/audio/purge")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    let after = ctx.client.get(&path).await.unwrap();

    // Same content, same key
    assert_eq!(before.str_field("audio_url"), after.str_field("audio_url"));
    assert_eq!(ctx.synthesis_calls(), 2);
    assert_eq!(ctx.generated_files().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_leave_manual_urls_alone_on_purge(ctx: &TestContext) {
    let topic = ctx
        .fixtures
        .create_topic("Python", "Python is a language.", "en", Some("/static/media/audio/topic_2.mp3"))
        .await
        .unwrap();

    let response = ctx.client.post_empty("/api/admin/audio/purge").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "deleted": 0 })));
    assert_eq!(
        ctx.fixtures.get_topic_audio_url(topic.id).await.unwrap().as_deref(),
        Some("/static/media/audio/topic_2.mp3")
    );
}
