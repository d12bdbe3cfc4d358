//! `HttpStore` / `HttpMailer` against a scripted local HTTP server.

use agency_content::mail::OutgoingEmail;
use agency_content::store::Operation;
use agency_content::{
    Collection, DocumentStore, HttpMailer, HttpStore, MailConfig, MailError, Mailer, Seeder,
    StoreError, WriteMode, send_contact,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

#[derive(Debug)]
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Value,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve one scripted `(status, body)` per connection, in order.
async fn scripted_server(responses: Vec<(u16, Value)>) -> (String, mpsc::UnboundedReceiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.expect("read");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                assert!(n > 0, "client closed before headers");
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let mut lines = head.lines();
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|l| l.split_once(':'))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
            let length = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + length {
                let n = socket.read(&mut chunk).await.expect("read body");
                assert!(n > 0, "client closed before body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let raw_body = &buf[header_end..header_end + length];
            let body_json = serde_json::from_slice(raw_body).unwrap_or(Value::Null);
            tx.send(Captured {
                request_line,
                headers,
                body: body_json,
            })
            .expect("capture");

            let payload = body.to_string();
            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
                payload.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
        }
    });

    (base, rx)
}

fn store(base: &str) -> HttpStore {
    HttpStore::new(reqwest::Client::new(), base, "2024-01-01", "production", "sk-test")
}

#[tokio::test]
async fn upsert_posts_mutation_with_bearer_token() {
    let (base, mut requests) = scripted_server(vec![(
        200,
        json!({"transactionId": "t1", "results": [{"id": "job-designer", "operation": "update"}]}),
    )])
    .await;

    let docs = Collection::Jobs
        .parse_seed(r#"[{"title": "Designer", "slug": "designer"}]"#)
        .expect("parse");
    let receipt = store(&base).create_or_replace(&docs[0]).await.expect("upsert");
    assert_eq!(receipt.operation, Operation::Replaced);
    assert_eq!(receipt.id, "job-designer");

    let captured = requests.recv().await.expect("request");
    assert_eq!(
        captured.request_line,
        "POST /v2024-01-01/data/mutate/production?returnIds=true HTTP/1.1"
    );
    assert_eq!(captured.header("authorization"), Some("Bearer sk-test"));
    let mutation = &captured.body["mutations"][0]["createOrReplace"];
    assert_eq!(mutation["_id"], "job-designer");
    assert_eq!(mutation["_type"], "job");
}

#[tokio::test]
async fn conflict_and_auth_statuses_map_to_errors() {
    let (base, _requests) = scripted_server(vec![
        (409, json!({"error": {"description": "Document already exists"}})),
        (401, json!({"error": {"description": "Unauthorized"}})),
        (500, json!({"error": {"description": "boom"}})),
    ])
    .await;
    let store = store(&base);
    let docs = Collection::CaseStudies
        .parse_seed(r#"[{"title": "T", "slug": "t", "client": "C"}]"#)
        .expect("parse");

    let err = store.create(&docs[0]).await.expect_err("409");
    assert!(err.is_conflict());
    let err = store.create(&docs[0]).await.expect_err("401");
    assert!(matches!(err, StoreError::Unauthorized { status: 401 }));
    let err = store.create(&docs[0]).await.expect_err("500");
    assert!(matches!(err, StoreError::Rejected { status: 500, ref message } if message == "boom"));
}

#[tokio::test]
async fn seeder_continues_past_a_conflict() {
    let (base, _requests) = scripted_server(vec![
        (409, json!({"error": {"description": "exists"}})),
        (200, json!({"results": [{"id": "job-b", "operation": "create"}]})),
    ])
    .await;
    let docs = Collection::Jobs
        .parse_seed(r#"[{"title": "A", "slug": "a"}, {"title": "B", "slug": "b"}]"#)
        .expect("parse");

    let report = Seeder::new(store(&base)).run(&docs, WriteMode::Create).await;
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, "job-a");
    assert_eq!(report.created(), 1);
}

#[tokio::test]
async fn mailer_posts_payload_and_surfaces_rejection() {
    let (base, mut requests) = scripted_server(vec![
        (200, json!({"id": "email_123"})),
        (422, json!({"message": "invalid from"})),
    ])
    .await;
    let mailer = HttpMailer::new(reqwest::Client::new(), format!("{base}/emails"), "re_key");

    let email = OutgoingEmail {
        from: "Studio <hello@northlight.studio>".into(),
        to: vec!["hello@northlight.studio".into()],
        reply_to: "dana@example.com".into(),
        subject: "Hi".into(),
        html: "<p>Hi</p>".into(),
        text: "Hi".into(),
    };
    assert_eq!(mailer.send(&email).await.expect("sent"), "email_123");
    let captured = requests.recv().await.expect("request");
    assert_eq!(captured.request_line, "POST /emails HTTP/1.1");
    assert_eq!(captured.header("authorization"), Some("Bearer re_key"));
    assert_eq!(captured.body["reply_to"], "dana@example.com");
    assert_eq!(captured.body["to"], json!(["hello@northlight.studio"]));

    let submission = serde_json::from_value(json!({
        "name": "Dana", "email": "dana@example.com", "message": "Hello"
    }))
    .expect("submission");
    let err = send_contact(&mailer, &MailConfig::default(), &submission)
        .await
        .expect_err("rejected");
    assert!(matches!(err, MailError::Rejected { status: 422, .. }));
}
