//
//  gerrit-client
//  tests/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use gerrit_client::auth::MemoryStore;
use gerrit_client::{Connection, ConnectionOptions, GerritError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn connect(server: &ServerGuard) -> Connection {
    let options = ConnectionOptions::new(server.url()).with_credentials("u", "p");
    Connection::with_store(&options, &MemoryStore::new()).unwrap()
}

#[tokio::test]
async fn test_create_then_fetch_project() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("PUT", "/a/projects/demo")
        .match_header("authorization", "Basic dTpw")
        .match_body(Matcher::Json(json!({})))
        .with_status(201)
        .with_body(")]}'\n{\"id\": \"demo\", \"name\": \"demo\", \"parent\": \"All-Projects\"}")
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/a/projects/demo")
        .with_status(200)
        .with_body(
            ")]}'\n{\"id\": \"demo\", \"name\": \"demo\", \"parent\": \"All-Projects\", \"state\": \"ACTIVE\"}",
        )
        .create_async()
        .await;

    let conn = connect(&server);
    let project = conn.create_project("demo", None).await.unwrap();
    let info = project.info().await.unwrap();

    assert_eq!(project.name(), "demo");
    assert_eq!(info.name.as_deref(), Some("demo"));
    assert_eq!(info.parent.as_deref(), Some("All-Projects"));
    assert_eq!(info.state.as_deref(), Some("ACTIVE"));
    create.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn test_create_project_with_options() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("PUT", "/a/projects/demo")
        .match_body(Matcher::Json(json!({"parent": "Public-Projects", "create_empty_commit": true})))
        .with_status(201)
        .create_async()
        .await;

    let conn = connect(&server);
    let options = json!({"parent": "Public-Projects", "create_empty_commit": true});
    conn.create_project("demo", Some(&options)).await.unwrap();

    create.assert_async().await;
}

#[tokio::test]
async fn test_create_project_conflict() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/a/projects/demo")
        .with_status(409)
        .with_body("Project already exists")
        .create_async()
        .await;

    let conn = connect(&server);
    match conn.create_project("demo", None).await {
        Err(GerritError::AlreadyExists(body)) => assert_eq!(body, "Project already exists"),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_project_unexpected_status() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/a/projects/demo")
        .with_status(500)
        .with_body("Internal server error")
        .create_async()
        .await;

    let conn = connect(&server);
    match conn.create_project("demo", None).await {
        Err(GerritError::Unhandled { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal server error");
        }
        other => panic!("expected Unhandled, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let mut server = Server::new_async().await;
    let any = server.mock("PUT", Matcher::Any).expect(0).create_async().await;

    let conn = connect(&server);
    assert!(matches!(
        conn.create_project("", None).await,
        Err(GerritError::InvalidArgument(_))
    ));
    any.assert_async().await;
}

#[tokio::test]
async fn test_project_info_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/a/projects/ghost")
        .with_status(404)
        .with_body("Not found: ghost")
        .create_async()
        .await;

    let conn = connect(&server);
    let result = conn.get_project("ghost").unwrap().info().await;
    assert!(matches!(result, Err(GerritError::NotFound(body)) if body == "Not found: ghost"));
}
