#![allow(missing_docs)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use cadence_core::FailureKind;
use cadence_uploader::{
    Credentials, KIND_TRANSPORT, KIND_UPLOAD, MetricClient, MetricPoint, MetricSink, UploadError,
    metric_endpoint,
};
use reqwest::Url;

#[derive(Debug, Clone)]
struct Captured {
    metric: String,
    authorization: Option<String>,
    body: String,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn record_metric(
    State((log, status)): State<(Log, StatusCode)>,
    Path(metric): Path<String>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    log.lock().expect("log lock").push(Captured {
        metric,
        authorization,
        body,
    });
    status
}

fn spawn_metrics_server(status: StatusCode) -> (SocketAddr, Log) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("mock server addr");
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let state = (Arc::clone(&log), status);
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("server runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            let app = Router::new()
                .route("/grok/_metrics/custom/{metric}", post(record_metric))
                .with_state(state);
            axum::serve(listener, app).await.expect("serve mock metrics");
        });
    });
    (addr, log)
}

fn credentials() -> Credentials {
    Credentials {
        username: "ops".to_string(),
        password: "secret".to_string(),
    }
}

fn client_for(addr: SocketAddr) -> MetricClient {
    let base = Url::parse(&format!("http://{addr}/grok/")).expect("base url");
    let endpoint = metric_endpoint(&base, "squares").expect("endpoint");
    MetricClient::new(endpoint, credentials(), Duration::from_secs(5), false).expect("client")
}

#[test]
fn posts_json_point_with_basic_auth() {
    let (addr, log) = spawn_metrics_server(StatusCode::OK);
    let client = client_for(addr);

    let status = client
        .send(&MetricPoint {
            timestamp: 1_507_389_770,
            value: 49,
        })
        .expect("upload accepted");
    assert_eq!(status, 200);

    let captured = log.lock().expect("log lock").clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].metric, "squares");
    assert_eq!(
        captured[0].authorization.as_deref(),
        Some("Basic b3BzOnNlY3JldA==")
    );
    let body: serde_json::Value = serde_json::from_str(&captured[0].body).expect("json body");
    assert_eq!(body, serde_json::json!({"timestamp": 1_507_389_770, "value": 49}));
}

#[test]
fn non_ok_status_is_a_retryable_rejection() {
    let (addr, _log) = spawn_metrics_server(StatusCode::SERVICE_UNAVAILABLE);
    let client = client_for(addr);

    let error = client
        .send(&MetricPoint {
            timestamp: 0,
            value: 1,
        })
        .expect_err("503 is rejected");
    assert!(matches!(error, UploadError::Rejected(503)));
    assert_eq!(error.kind(), KIND_UPLOAD);
}

#[test]
fn refused_connection_is_a_transport_failure() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let client = client_for(addr);

    let error = client
        .send(&MetricPoint {
            timestamp: 0,
            value: 1,
        })
        .expect_err("nothing listening");
    assert!(matches!(error, UploadError::Transport(_)));
    assert_eq!(error.kind(), KIND_TRANSPORT);
}
