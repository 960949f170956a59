use activity_log::error::PersistError;
use activity_log::services::github::GitHubClient;
use activity_log::services::persister::{RemoteTarget, append_remote};
use base64::{Engine as _, engine::general_purpose};
use mockito::Matcher;
use serde_json::json;

const CONTENTS_PATH: &str = "/repos/octo/log/contents/README.md";

fn target() -> RemoteTarget {
    RemoteTarget {
        repo: "octo/log".to_string(),
        path: "README.md".to_string(),
        branch: "main".to_string(),
        commit_message: "Updated Activity Log with new commit details".to_string(),
    }
}

fn encode(text: &str) -> String {
    general_purpose::STANDARD.encode(text)
}

async fn serve_existing(server: &mut mockito::Server, content: &str, sha: &str) -> mockito::Mock {
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "path": "README.md",
                "sha": sha,
                "encoding": "base64",
                "content": format!("{}\n", encode(content)),
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn appends_below_existing_content_with_version_tag() {
    let mut server = mockito::Server::new_async().await;
    serve_existing(&mut server, "A", "T1").await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .match_body(Matcher::PartialJson(json!({
            "content": encode("A\nnew entry\n"),
            "branch": "main",
            "sha": "T1",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":{"path":"README.md","sha":"T2"}}"#)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let new_sha = append_remote(&client, &target(), "new entry\n").await.unwrap();

    put.assert_async().await;
    assert_eq!(new_sha.as_deref(), Some("T2"));
}

#[tokio::test]
async fn creates_missing_file_without_version_tag() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .match_body(Matcher::PartialJson(json!({ "content": encode("first\n") })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":{"path":"README.md","sha":"T1"}}"#)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    append_remote(&client, &target(), "first\n").await.unwrap();

    put.assert_async().await;
}

#[tokio::test]
async fn stale_version_tag_is_a_conflict() {
    let mut server = mockito::Server::new_async().await;
    serve_existing(&mut server, "A", "T1").await;
    // someone else already moved the file to T2
    server
        .mock("PUT", CONTENTS_PATH)
        .match_body(Matcher::PartialJson(json!({ "sha": "T1" })))
        .with_status(409)
        .with_body(r#"{"message":"README.md does not match T1"}"#)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let err = append_remote(&client, &target(), "new\n").await.unwrap_err();

    assert!(err.is_conflict(), "expected conflict, got {err:?}");
    match err {
        PersistError::Conflict { path, expected } => {
            assert_eq!(path, "README.md");
            assert_eq!(expected, "T1");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn other_write_failures_are_not_conflicts() {
    let mut server = mockito::Server::new_async().await;
    serve_existing(&mut server, "A", "T1").await;
    server
        .mock("PUT", CONTENTS_PATH)
        .with_status(403)
        .with_body(r#"{"message":"Resource not accessible"}"#)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let err = append_remote(&client, &target(), "new\n").await.unwrap_err();

    assert!(matches!(err, PersistError::Rejected(_)));
}

#[tokio::test]
async fn unreadable_log_aborts_before_writing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let err = append_remote(&client, &target(), "new\n").await.unwrap_err();

    assert!(matches!(err, PersistError::Fetch(_)));
    put.assert_async().await;
}

#[tokio::test]
async fn large_log_is_read_through_its_blob() {
    let mut server = mockito::Server::new_async().await;
    // the contents API leaves files over 1 MB empty with encoding "none"
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"path":"README.md","sha":"T1","encoding":"none","content":""}"#)
        .create_async()
        .await;
    let blob = server
        .mock("GET", "/repos/octo/log/git/blobs/T1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "sha": "T1", "encoding": "base64", "content": format!("{}\n", encode("huge log")) })
                .to_string(),
        )
        .create_async()
        .await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .match_body(Matcher::PartialJson(json!({
            "content": encode("huge log\nnew\n"),
            "sha": "T1",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":{"path":"README.md","sha":"T2"}}"#)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    append_remote(&client, &target(), "new\n").await.unwrap();

    blob.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn unreadable_large_log_is_never_replaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"path":"README.md","sha":"T1","encoding":"none","content":""}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/octo/log/git/blobs/T1")
        .with_status(403)
        .with_body(r#"{"message":"Resource not accessible"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let err = append_remote(&client, &target(), "new\n").await.unwrap_err();

    assert!(matches!(err, PersistError::Fetch(_)));
    put.assert_async().await;
}

#[tokio::test]
async fn unknown_encoding_is_never_replaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"path":"README.md","sha":"T1","encoding":"utf-16","content":""}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", CONTENTS_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::with_base_url(Some("t"), &server.url()).unwrap();
    let err = append_remote(&client, &target(), "new\n").await.unwrap_err();

    assert!(matches!(err, PersistError::Decode(_)));
    put.assert_async().await;
}
