//! `GitHubTracker` against a local HTTP server with scripted replies.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use issue_batch::{
    Credentials, ErrorDetail, GitHubTracker, IssueRecord, IssueTracker, Submitter,
    SubmitterConfig, TrackerError,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// One canned HTTP reply.
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Reply {
    fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

/// Local server answering each connection with the next scripted reply.
struct FakeGitHub {
    api_base: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGitHub {
    async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            for reply in replies {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                serve(stream, reply, &seen).await;
            }
        });

        Self {
            api_base: Url::parse(&format!("http://{addr}/api/v3")).unwrap(),
            requests,
        }
    }

    fn config(&self) -> SubmitterConfig {
        SubmitterConfig::new(Credentials::new("ghp_test", "octo", "hello-world"))
            .with_api_base(self.api_base.clone())
            .with_delay(Duration::ZERO)
    }

    fn tracker(&self) -> GitHubTracker {
        install_crypto_provider();
        GitHubTracker::new(&self.config()).unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn install_crypto_provider() {
    // Fails harmlessly when another test already installed it.
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Reads one request, records "METHOD path", and writes the reply.
async fn serve(mut stream: TcpStream, reply: Reply, seen: &Mutex<Vec<String>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = head.lines().next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    seen.lock().unwrap().push(format!("{method} {path}"));

    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

fn record() -> IssueRecord {
    IssueRecord::new("Setup CI", "").with_labels(["infra"])
}

#[tokio::test]
async fn created_response_yields_number_and_url() {
    let server = FakeGitHub::start(vec![Reply::json(
        201,
        json!({"number": 7, "html_url": "https://example/issues/7", "state": "open"}),
    )])
    .await;

    let issue = server.tracker().create_issue(&record()).await.unwrap();

    assert_eq!(issue.number, 7);
    assert_eq!(issue.url, "https://example/issues/7");
    assert_eq!(
        server.requests(),
        vec!["POST /api/v3/repos/octo/hello-world/issues"]
    );
}

#[tokio::test]
async fn rejected_response_keeps_status_and_json_body() {
    let payload = json!({"message": "Validation Failed", "errors": [{"field": "title"}]});
    let server = FakeGitHub::start(vec![Reply::json(422, payload.clone())]).await;

    let err = server.tracker().create_issue(&record()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(422));
    assert_eq!(err.into_detail(), ErrorDetail::Json(payload));
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = FakeGitHub::start(vec![
        Reply::text(500, "oops"),
        Reply::json(201, json!({"number": 1, "html_url": "https://example/issues/1"})),
    ])
    .await;

    let err = server.tracker().create_issue(&record()).await.unwrap_err();

    assert!(matches!(
        err,
        TrackerError::UnexpectedStatus {
            status_code: 500,
            detail: ErrorDetail::Text(ref text),
        } if text == "oops"
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn ok_status_on_create_is_a_failure() {
    let server = FakeGitHub::start(vec![Reply::json(
        200,
        json!({"number": 3, "html_url": "https://example/issues/3"}),
    )])
    .await;

    let err = server.tracker().create_issue(&record()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn current_user_accepts_only_ok() {
    let server = FakeGitHub::start(vec![
        Reply::json(200, json!({"login": "octocat", "id": 1})),
        Reply::json(401, json!({"message": "Bad credentials"})),
    ])
    .await;
    let tracker = server.tracker();

    assert_eq!(tracker.current_user().await.unwrap(), "octocat");
    let err = tracker.current_user().await.unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert_eq!(
        server.requests(),
        vec!["GET /api/v3/user", "GET /api/v3/user"]
    );
}

#[tokio::test]
async fn submitter_runs_batch_against_endpoint() {
    let server = FakeGitHub::start(vec![
        Reply::json(200, json!({"login": "octocat"})),
        Reply::json(422, json!({"message": "Validation Failed"})),
        Reply::json(201, json!({"number": 8, "html_url": "https://example/issues/8"})),
        Reply::text(502, "Bad Gateway"),
    ])
    .await;
    install_crypto_provider();
    let submitter = Submitter::github(&server.config()).unwrap();
    let records = vec![
        IssueRecord::new("First", "a"),
        IssueRecord::new("Second", "b"),
        IssueRecord::new("Third", "c"),
    ];

    let summary = submitter.run(&records).await.unwrap();

    assert_eq!(
        (summary.created, summary.failed, summary.total_attempted),
        (1, 2, 3)
    );
    assert_eq!(summary.results[0].status_code(), Some(422));
    assert_eq!(summary.results[1].issue_number(), Some(8));
    assert_eq!(summary.results[2].status_code(), Some(502));
    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn rejected_token_stops_before_any_post() {
    let server = FakeGitHub::start(vec![Reply::json(
        401,
        json!({"message": "Bad credentials"}),
    )])
    .await;
    install_crypto_provider();
    let submitter = Submitter::github(&server.config()).unwrap();

    let result = submitter.run(&[record()]).await;

    assert!(result.is_err());
    assert_eq!(server.requests(), vec!["GET /api/v3/user"]);
}
