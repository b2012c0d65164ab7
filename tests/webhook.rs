mod common;

use mockito::Matcher;
use serde_json::json;

use common::{STOP_EVENT, processed_dir, run_cli, write_trigger};

const TRIGGER: &str = r#"{
    "from_agent": "senior-engineer",
    "to_agent": "tpm",
    "message": "5 subtasks ready",
    "command": "Use tpm."
}"#;

#[test]
fn posts_embed_when_configured() {
    let project = tempfile::tempdir().unwrap();
    write_trigger(project.path(), "next.trigger", TRIGGER);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/webhook")
        .match_header("content-type", "application/json")
        .match_header("user-agent", Matcher::Regex("^agent-handoff/".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""title":"🤖 Agent Handoff: tpm""#.into()),
            Matcher::Regex(r#""description":"5 subtasks ready""#.into()),
            Matcher::Regex(r#""value":"senior-engineer""#.into()),
        ]))
        .with_status(204)
        .expect(1)
        .create();

    let url = format!("{}/webhook", server.url());
    let (code, stdout, _) = run_cli(project.path(), STOP_EVENT, Some(&url));

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    mock.assert();
}

#[test]
fn server_error_is_swallowed() {
    let project = tempfile::tempdir().unwrap();
    write_trigger(project.path(), "next.trigger", TRIGGER);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/webhook")
        .with_status(500)
        .with_body(json!({"message": "boom"}).to_string())
        .create();

    let url = format!("{}/webhook", server.url());
    let (code, stdout, stderr) = run_cli(project.path(), STOP_EVENT, Some(&url));

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(!stderr.contains("500"), "failure should be silent, got: {stderr}");
    assert!(stderr.contains("AGENT HANDOFF READY"));
    assert!(processed_dir(project.path()).join("next.trigger").exists());
    mock.assert();
}

#[test]
fn no_request_when_unset_or_blank() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/webhook").with_status(204).expect(0).create();

    for url in [None, Some("  ")] {
        let project = tempfile::tempdir().unwrap();
        write_trigger(project.path(), "next.trigger", TRIGGER);

        let (code, _, stderr) = run_cli(project.path(), STOP_EVENT, url);
        assert_eq!(code, 0);
        assert!(stderr.contains("AGENT HANDOFF READY"), "got: {stderr}");
        assert!(processed_dir(project.path()).join("next.trigger").exists());
    }

    // Sanity check that the endpoint was live: a configured run hits it.
    let hit = server.mock("POST", "/live").with_status(204).expect(1).create();
    let project = tempfile::tempdir().unwrap();
    write_trigger(project.path(), "next.trigger", TRIGGER);
    let url = format!("{}/live", server.url());
    let (code, _, _) = run_cli(project.path(), STOP_EVENT, Some(&url));
    assert_eq!(code, 0);

    hit.assert();
    mock.assert();
}
