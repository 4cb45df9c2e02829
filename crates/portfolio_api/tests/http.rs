use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use portfolio_api::{PortfolioApiClient, PortfolioApiConfig, PortfolioApiError};
use portfolio_source::{PortfolioSource, ProjectStatus, SourceError};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
    delay_ms: u64,
}

fn route(status: u16, body: serde_json::Value) -> Route {
    Route {
        status,
        body: body.to_string(),
        delay_ms: 0,
    }
}

fn raw_route(status: u16, body: &str) -> Route {
    Route {
        status,
        body: body.to_string(),
        delay_ms: 0,
    }
}

struct RoutedServer {
    base_url: String,
    requested_paths: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl RoutedServer {
    async fn new(routes: Vec<(&str, Route)>) -> Self {
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requested_paths = Arc::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local TCP listener should bind");
        let addr = listener
            .local_addr()
            .expect("resolved local listener address");
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn({
            let routes = Arc::clone(&routes);
            let requested_paths = Arc::clone(&requested_paths);

            async move {
                loop {
                    let (socket, _) = match listener.accept().await {
                        Ok(pair) => pair,
                        Err(_) => break,
                    };
                    let routes = Arc::clone(&routes);
                    let requested_paths = Arc::clone(&requested_paths);
                    tokio::spawn(async move {
                        serve_one(socket, routes, requested_paths).await;
                    });
                }
            }
        });

        Self {
            base_url,
            requested_paths,
            handle,
        }
    }

    fn requested_paths(&self) -> Vec<String> {
        self.requested_paths
            .lock()
            .expect("paths lock poisoned")
            .clone()
    }

    fn client(&self) -> PortfolioApiClient {
        PortfolioApiClient::new(PortfolioApiConfig::new(&self.base_url)).expect("client")
    }

    fn shutdown(&self) {
        self.handle.abort();
    }
}

async fn serve_one(
    mut socket: TcpStream,
    routes: Arc<HashMap<String, Route>>,
    requested_paths: Arc<Mutex<Vec<String>>>,
) {
    let Ok(path) = read_request_path(&mut socket).await else {
        return;
    };
    requested_paths
        .lock()
        .expect("paths lock poisoned")
        .push(path.clone());

    let matched = routes.get(&path).cloned().unwrap_or_else(|| {
        route(
            404,
            json!({"error": "Not Found", "message": "no route", "statusCode": 404}),
        )
    });

    if matched.delay_ms > 0 {
        sleep(Duration::from_millis(matched.delay_ms)).await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        matched.status,
        status_reason(matched.status),
        matched.body.len(),
        matched.body,
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_path(socket: &mut TcpStream) -> std::io::Result<String> {
    let mut request = Vec::new();
    let mut buffer = [0_u8; 2048];

    loop {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..n]);
        if request.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    let text = String::from_utf8_lossy(&request);
    let path = text
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    Ok(path)
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn project_json(slug: &str, status: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Termfolio",
        "slug": slug,
        "description": "terminal portfolio",
        "url": "https://termfolio.example.dev",
        "techStack": ["rust", "tokio"],
        "status": status,
        "featured": true,
    })
}

#[tokio::test]
async fn list_projects_unwraps_the_projects_envelope() {
    let server = RoutedServer::new(vec![(
        "/api/projects",
        route(
            200,
            json!({"projects": [project_json("termfolio", "active"), project_json("ledger", "wip")]}),
        ),
    )])
    .await;

    let projects = server
        .client()
        .list_projects()
        .await
        .expect("projects should load");

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].slug, "termfolio");
    assert_eq!(projects[1].status, ProjectStatus::Wip);
    assert_eq!(server.requested_paths(), vec!["/api/projects".to_string()]);

    server.shutdown();
}

#[tokio::test]
async fn get_project_unwraps_the_project_envelope() {
    let server = RoutedServer::new(vec![(
        "/api/projects/termfolio",
        route(200, json!({"project": project_json("termfolio", "archived")})),
    )])
    .await;

    let project = server
        .client()
        .get_project("termfolio")
        .await
        .expect("project should load");

    assert_eq!(project.status, ProjectStatus::Archived);
    assert_eq!(project.tech_stack, vec!["rust", "tokio"]);

    server.shutdown();
}

#[tokio::test]
async fn get_project_maps_404_envelope_to_not_found() {
    let server = RoutedServer::new(vec![(
        "/api/projects/ghost",
        route(
            404,
            json!({"error": "Not Found", "message": "Project not found", "statusCode": 404}),
        ),
    )])
    .await;
    let client = server.client();

    let error = client
        .project("ghost")
        .await
        .expect_err("missing project should fail");
    match &error {
        PortfolioApiError::Status(status, message) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Project not found");
        }
        other => panic!("unexpected error: {other}"),
    }

    let source_error = client
        .get_project("ghost")
        .await
        .expect_err("facade should report not found");
    assert_eq!(
        source_error,
        SourceError::NotFound {
            slug: "ghost".to_string()
        }
    );

    server.shutdown();
}

#[tokio::test]
async fn server_errors_become_unavailable() {
    let server = RoutedServer::new(vec![(
        "/api/projects",
        route(
            500,
            json!({"error": "Internal Server Error", "message": "database locked", "statusCode": 500}),
        ),
    )])
    .await;

    let error = server
        .client()
        .list_projects()
        .await
        .expect_err("500 should fail");

    assert!(matches!(error, SourceError::Unavailable(message) if message.contains("database locked")));
    assert_eq!(server.requested_paths().len(), 1, "no retry at this layer");

    server.shutdown();
}

#[tokio::test]
async fn malformed_body_becomes_malformed_error() {
    let server = RoutedServer::new(vec![("/api/about", raw_route(200, "{\"name\": 3}"))]).await;

    let error = server
        .client()
        .get_about()
        .await
        .expect_err("bad about payload should fail");

    assert!(matches!(error, SourceError::Malformed(_)));

    server.shutdown();
}

#[tokio::test]
async fn about_is_served_without_an_envelope() {
    let server = RoutedServer::new(vec![(
        "/api/about",
        route(
            200,
            json!({
                "name": "Alex Doe",
                "title": "Software Engineer",
                "bio": "Builds things.",
                "email": "alex@example.dev",
                "social": {"github": "https://github.com/example"},
            }),
        ),
    )])
    .await;

    let about = server.client().get_about().await.expect("about should load");

    assert_eq!(about.name, "Alex Doe");
    assert_eq!(about.social.get("github"), Some("https://github.com/example"));

    server.shutdown();
}

#[tokio::test]
async fn health_reports_liveness_payload() {
    let server = RoutedServer::new(vec![(
        "/health",
        route(200, json!({"status": "ok", "timestamp": "2026-01-01T00:00:00Z"})),
    )])
    .await;

    let health = server.client().health().await.expect("health should load");

    assert!(health.is_ok());
    assert_eq!(health.timestamp.as_deref(), Some("2026-01-01T00:00:00Z"));

    server.shutdown();
}

#[tokio::test]
async fn configured_timeout_bounds_slow_responses() {
    let server = RoutedServer::new(vec![(
        "/api/about",
        Route {
            status: 200,
            body: "{}".to_string(),
            delay_ms: 2_000,
        },
    )])
    .await;
    let client = PortfolioApiClient::new(
        PortfolioApiConfig::new(&server.base_url).with_timeout(Duration::from_millis(100)),
    )
    .expect("client");

    let error = client.about().await.expect_err("slow response should time out");

    assert!(matches!(error, PortfolioApiError::Request(ref inner) if inner.is_timeout()));

    server.shutdown();
}
