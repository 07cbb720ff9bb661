//! Fetcher behavior against a local mock HTTP server.

mod common;

use common::minimal_pdf_with_text;
use httpmock::prelude::*;
use pdfsheet::batch::BatchJob;
use pdfsheet::fetch::{build_client, fetch_pdf, FetchError, RetryPolicy};
use pdfsheet::models::{Origin, SourceTask, Stage};
use pdfsheet::progress::NoProgress;

fn remote_task(url: &str) -> SourceTask {
    SourceTask {
        identity: url.to_string(),
        origin: Origin::Remote(url.to_string()),
    }
}

#[tokio::test]
async fn http_500_on_both_attempts_yields_one_error_after_two_tries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/doc.pdf");
            then.status(500);
        })
        .await;

    let client = build_client().unwrap();
    let url = server.url("/doc.pdf");
    let err = fetch_pdf(&client, &url, RetryPolicy::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn html_response_with_200_is_a_content_kind_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/doc.pdf");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html>not a pdf</html>");
        })
        .await;

    let client = build_client().unwrap();
    let url = server.url("/doc.pdf");
    let err = fetch_pdf(&client, &url, RetryPolicy::default())
        .await
        .unwrap_err();

    match err {
        FetchError::ContentKind(ct) => assert!(ct.contains("text/html")),
        other => panic!("expected content-kind error, got {:?}", other),
    }
}

#[tokio::test]
async fn wrong_content_kind_never_reaches_extraction() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/doc.pdf");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html></html>");
        })
        .await;

    let client = build_client().unwrap();
    let result = BatchJob::new(vec![remote_task(&server.url("/doc.pdf"))])
        .run(&client, RetryPolicy::default(), &NoProgress)
        .await;

    assert!(result.rows.is_empty());
    assert_eq!(result.errors.len(), 1);
    // Fetch stage, not Extract: the HTML bytes were discarded.
    assert_eq!(result.errors[0].stage, Stage::Fetch);
    assert!(result.errors[0].identity.contains("/doc.pdf"));
}

#[tokio::test]
async fn pdf_response_flows_through_to_rows() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/report.pdf");
            then.status(200)
                .header("content-type", "application/pdf")
                .body(minimal_pdf_with_text("remote document body"));
        })
        .await;

    let client = build_client().unwrap();
    let url = server.url("/report.pdf");
    let result = BatchJob::new(vec![remote_task(&url)])
        .run(&client, RetryPolicy::default(), &NoProgress)
        .await;

    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].identity, url);
    assert_eq!(result.rows[0].part, 1);
    assert!(result.rows[0].content.contains("remote document body"));
}

#[tokio::test]
async fn failure_then_success_recovers_on_the_second_attempt() {
    let server = MockServer::start_async().await;
    // First attempt hits the 500 mock; deleting it lets the retry succeed.
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/flaky.pdf");
            then.status(500);
        })
        .await;

    let client = build_client().unwrap();
    let url = server.url("/flaky.pdf");

    // Exhaust the first attempt against the failing mock.
    let err = fetch_pdf(&client, &url, RetryPolicy { max_attempts: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status(500)));
    failing.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/flaky.pdf");
            then.status(200)
                .header("content-type", "application/pdf")
                .body(minimal_pdf_with_text("recovered"));
        })
        .await;

    let bytes = fetch_pdf(&client, &url, RetryPolicy::default())
        .await
        .unwrap();
    assert!(!bytes.is_empty());
}
