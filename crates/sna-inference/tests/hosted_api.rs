//! Facility tests against a local stand-in for the hosted inference API
//!
//! Author: hephaex@gmail.com

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use sna_core::{EntityRecognizer, QuestionAnswerer, SnaError, SummaryBounds, Summarizer};
use sna_inference::{HfClient, HfEntityRecognizer, HfQuestionAnswerer, HfSummarizer};

async fn fake_model(
    Path(model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-token") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }

    match model.as_str() {
        "summarizer" => {
            // Echo the decoding parameters back so the test can check them
            let params = &body["parameters"];
            let text = format!(
                "min={} max={} sample={} gpu={}",
                params["min_length"], params["max_length"], params["do_sample"], body["options"]["use_gpu"]
            );
            (StatusCode::OK, Json(json!([{ "summary_text": text }])))
        }
        "ner" => {
            assert_eq!(body["parameters"]["aggregation_strategy"], "simple");
            (
                StatusCode::OK,
                Json(json!([
                    {"entity_group": "ORG", "score": 0.97, "word": "FC Barcelona", "start": 4, "end": 16},
                    {"entity_group": "LOC", "score": 0.88, "word": "Madrid", "start": 30, "end": 36}
                ])),
            )
        }
        "qa" => {
            assert_eq!(body["inputs"]["question"], "Who won the match?");
            (
                StatusCode::OK,
                Json(json!({"answer": "FC Barcelona", "score": 0.73, "start": 4, "end": 16})),
            )
        }
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "Model is currently loading"})),
        ),
    }
}

async fn spawn_server() -> HfClient {
    let app = Router::new().route("/:model", post(fake_model));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HfClient::new(format!("http://{addr}"), Some("test-token".to_string()))
}

#[tokio::test]
async fn test_summarizer_sends_bounds_and_greedy_flag() {
    let client = spawn_server().await;
    let summarizer = HfSummarizer::new(client, "summarizer");

    let summary = summarizer
        .summarize("some long article", SummaryBounds::default())
        .await
        .unwrap();

    assert_eq!(summary.text, "min=20 max=50 sample=false gpu=false");
}

#[tokio::test]
async fn test_recognizer_preserves_order() {
    let client = spawn_server().await;
    let recognizer = HfEntityRecognizer::new(client, "ner");

    let entities = recognizer
        .recognize("The FC Barcelona squad flew to Madrid")
        .await
        .unwrap();

    let words: Vec<&str> = entities.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["FC Barcelona", "Madrid"]);
    assert_eq!(entities[0].to_string(), "FC Barcelona → ORG (score=0.97)");
}

#[tokio::test]
async fn test_answerer_returns_span_and_score() {
    let client = spawn_server().await;
    let answerer = HfQuestionAnswerer::new(client, "qa");

    let answer = answerer
        .answer("FC Barcelona beat Real Madrid.", "Who won the match?")
        .await
        .unwrap();

    assert_eq!(answer.answer, "FC Barcelona");
    assert!((0.0..=1.0).contains(&answer.score));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let client = spawn_server().await;
    let summarizer = HfSummarizer::new(client, "cold-model");

    let err = summarizer
        .summarize("text", SummaryBounds::default())
        .await
        .unwrap_err();

    match err {
        SnaError::Inference(msg) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("currently loading"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
