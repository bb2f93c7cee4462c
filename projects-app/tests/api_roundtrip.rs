//! End-to-end tests: a real server on a local port driven by the client SDK.

use std::time::Duration;

use projects_client::{ClientError, ProjectsClient};
use projects_hex::{ProjectService, inbound::HttpServer};
use projects_repo::{DEFAULT_TIMEOUT, build_repo};
use projects_types::{ErrorKind, Money, Project, ProjectRepository, TimeUnit};

/// Binds an ephemeral port, serves the API on it in the background and
/// returns a client pointed at it.
async fn spawn_server<R: ProjectRepository>(repo: R) -> ProjectsClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(ProjectService::new(repo));
    tokio::spawn(server.serve(listener));

    let client = ProjectsClient::new(format!("http://{}", addr));
    for _ in 0..50 {
        if client.health().await.unwrap_or(false) {
            return client;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server did not become healthy");
}

fn website() -> Project {
    Project::new("Website", Money::new(5000, "USD"), TimeUnit::Hour)
}

fn assert_api_error(err: ClientError, status: u16, expected: ErrorKind) {
    match err {
        ClientError::Api { status: s, kind, .. } => {
            assert_eq!(s, status);
            assert_eq!(kind, Some(expected));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

async fn exercise_lifecycle(client: &ProjectsClient) {
    assert!(client.health().await.unwrap());

    // Create
    let created = client.create_project(&website()).await.unwrap();
    let id = created.id.unwrap().to_string();
    assert!(created.date_created.is_some());

    // Get
    let fetched = client.get_project(&id).await.unwrap();
    assert_eq!(fetched, created);

    // Update
    let mut changed = fetched.clone();
    changed.name = "Website relaunch".into();
    changed.unit_price = Money::new(7500, "USD");
    let updated = client.update_project(&id, &changed).await.unwrap();
    assert_eq!(updated.name, "Website relaunch");
    assert_eq!(updated.date_created, created.date_created);
    assert!(updated.date_updated.is_some());

    // List
    for name in ["Audit", "Support"] {
        let mut p = website();
        p.name = name.into();
        client.create_project(&p).await.unwrap();
    }
    let first = client.list_projects(None, Some(2)).await.unwrap();
    assert_eq!(first.len(), 2);
    let cursor = first[1].id.unwrap().to_string();
    let second = client.list_projects(Some(&cursor), Some(2)).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "Support");

    // Delete
    client.delete_project(&id).await.unwrap();
    let err = client.get_project(&id).await.unwrap_err();
    assert_api_error(err, 404, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_lifecycle_in_memory() {
    let repo = build_repo("memory://", DEFAULT_TIMEOUT).await.unwrap();
    let client = spawn_server(repo).await;

    exercise_lifecycle(&client).await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_lifecycle_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("nested").join("projects.db").display()
    );
    let repo = build_repo(&url, DEFAULT_TIMEOUT).await.unwrap();
    assert_eq!(repo.backend(), "sqlite");
    let client = spawn_server(repo).await;

    exercise_lifecycle(&client).await;
}

#[tokio::test]
async fn test_error_responses_reach_the_client() {
    let repo = build_repo("memory://", DEFAULT_TIMEOUT).await.unwrap();
    let client = spawn_server(repo).await;

    let mut invalid = website();
    invalid.name = String::new();
    let err = client.create_project(&invalid).await.unwrap_err();
    assert_api_error(err, 400, ErrorKind::ConstraintViolation);

    let err = client.get_project("zzz").await.unwrap_err();
    assert_api_error(err, 400, ErrorKind::InvalidIdentifier);

    let created = client.create_project(&website()).await.unwrap();
    let err = client.create_project(&created).await.unwrap_err();
    assert_api_error(err, 412, ErrorKind::PreconditionFailed);

    let err = client.list_projects(None, Some(0)).await.unwrap_err();
    assert_api_error(err, 400, ErrorKind::ConstraintViolation);
}
