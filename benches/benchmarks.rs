use ask_relay::{
    build_app,
    config::Config,
    types::{first_choice_content, AskRequest, ChatCompletionRequest},
};
use axum::{body::Body, http::Request};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use secrecy::SecretString;
use serde_json::json;
use tokio::runtime::Runtime;
use tower::ServiceExt;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

fn bench_request_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_normalization");

    let short_request = json!({"text": "  What is ASIL B?  "}).to_string();
    let long_request = json!({
        "text": "Summarize the hazard analysis steps of ISO 26262 part 3. ".repeat(40),
        "model": " llama-3.3-70b-versatile "
    })
    .to_string();

    group.bench_function("short_request", |b| {
        b.iter(|| {
            let request = AskRequest::from_json(black_box(short_request.as_bytes())).unwrap();
            black_box(request.resolve_model("llama-3.1-8b-instant"))
        })
    });

    group.bench_function("long_request", |b| {
        b.iter(|| {
            let request = AskRequest::from_json(black_box(long_request.as_bytes())).unwrap();
            black_box(ChatCompletionRequest::for_prompt(
                request.resolve_model("llama-3.1-8b-instant"),
                request.text,
            ))
        })
    });

    group.finish();
}

fn bench_answer_extraction(c: &mut Criterion) {
    let body = json!({
        "id": "chatcmpl-bench",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hazard analysis and risk assessment."},
            "finish_reason": "stop"
        }]
    });

    c.bench_function("first_choice_content", |b| {
        b.iter(|| black_box(first_choice_content(black_box(&body))))
    });
}

fn bench_relay_round_trip(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("relay_round_trip");
    group.sample_size(50);

    let (app, _mock_server) = rt.block_on(async {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .mount(&mock_server)
            .await;

        let mut config = Config::default();
        config.upstream.base_url = mock_server.uri();
        config.relay.api_key = Some(SecretString::new("gsk-bench".to_string()));

        (build_app(&config).unwrap(), mock_server)
    });

    group.bench_function("post_ask", |b| {
        b.to_async(&rt).iter(|| {
            let app = app.clone();
            async move {
                let request = Request::builder()
                    .method("POST")
                    .uri("/v1/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hello"}"#))
                    .unwrap();
                black_box(app.oneshot(request).await.unwrap())
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_request_normalization,
    bench_answer_extraction,
    bench_relay_round_trip
);
criterion_main!(benches);
