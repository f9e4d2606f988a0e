// Integration tests for session, project and attachment actions on App.

mod common;

use chatstream::app::AttachError;
use chatstream::models::{AttachmentKind, MessageRole};
use common::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_attach_document_is_sent_inline() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("notes.md");
    std::fs::write(&notes, "# Groceries\n- eggs").unwrap();

    let mut fixture = TestAppBuilder::new()
        .with_response(stream_of(&["Eggs."]))
        .build();

    let attachment = fixture.app.attach_file(&notes).unwrap();
    assert_eq!(attachment.name(), "notes.md");
    assert_eq!(attachment.kind(), AttachmentKind::Document);
    assert_eq!(fixture.app.pending_attachments().len(), 1);

    let (session_id, exchange) = fixture.app.submit_message("What do I need?").unwrap();
    fixture.app.drive_exchange(&session_id, exchange, |_| {}).await;

    // Staged attachments go with exactly one message
    assert!(fixture.app.pending_attachments().is_empty());
    let user = &fixture.app.store.get_session(&session_id).unwrap().messages()[0];
    assert_eq!(user.role, MessageRole::User);
    assert_eq!(user.attachments.len(), 1);

    let body: serde_json::Value =
        serde_json::from_str(&fixture.http.get_requests()[0].body).unwrap();
    assert_eq!(
        body["messages"][0]["content"],
        "What do I need?\n\n[File: notes.md]\n# Groceries\n- eggs"
    );
}

#[tokio::test]
async fn test_attach_image_is_sent_as_data_url() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("dot.png");
    std::fs::write(&image, [0x89u8, b'P', b'N', b'G']).unwrap();

    let mut fixture = TestAppBuilder::new()
        .with_response(stream_of(&["A dot."]))
        .build();

    assert_eq!(
        fixture.app.attach_file(&image).unwrap().kind(),
        AttachmentKind::Image
    );
    let (session_id, exchange) = fixture.app.submit_message("What is it?").unwrap();
    fixture.app.drive_exchange(&session_id, exchange, |_| {}).await;

    let body: serde_json::Value =
        serde_json::from_str(&fixture.http.get_requests()[0].body).unwrap();
    let parts = body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[0]["text"], "What is it?");
    assert_eq!(parts[1]["type"], "image_url");
    assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,iVBORw==");
}

#[test]
fn test_attach_rejects_binary_non_image() {
    let temp_dir = TempDir::new().unwrap();
    let blob = temp_dir.path().join("blob.bin");
    std::fs::write(&blob, [0xffu8, 0xfe, 0x00]).unwrap();

    let mut fixture = TestAppBuilder::new().build();
    assert!(matches!(
        fixture.app.attach_file(&blob),
        Err(AttachError::Unsupported { .. })
    ));
    assert!(matches!(
        fixture.app.attach_file(&temp_dir.path().join("missing.txt")),
        Err(AttachError::Read { .. })
    ));
    assert!(fixture.app.pending_attachments().is_empty());
}

#[tokio::test]
async fn test_attachment_only_message_is_submitted() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("todo.txt");
    std::fs::write(&notes, "water plants").unwrap();

    let mut fixture = TestAppBuilder::new()
        .with_response(stream_of(&["Noted."]))
        .build();
    fixture.app.attach_file(&notes).unwrap();

    let (session_id, exchange) = fixture.app.submit_message("").unwrap();
    fixture.app.drive_exchange(&session_id, exchange, |_| {}).await;
    assert_eq!(contents(&fixture.app, &session_id)[1], "Noted.");
}

#[test]
fn test_switch_session_by_listing_index() {
    let mut fixture = TestAppBuilder::new().build();
    let first = fixture.app.new_session();
    let second = fixture.app.new_session();
    assert_eq!(fixture.app.store.current_session_id(), Some(second.as_str()));

    // Index 1 is the older session in activity order
    assert!(fixture.app.switch_session(1));
    assert_eq!(fixture.app.store.current_session_id(), Some(first.as_str()));
    assert!(!fixture.app.switch_session(5));
}

#[test]
fn test_use_project_files_current_and_new_sessions() {
    let mut fixture = TestAppBuilder::new().build();
    let before = fixture.app.new_session();

    let project_id = fixture.app.use_project("Travel").unwrap();
    assert_eq!(fixture.app.active_project(), Some(project_id.as_str()));
    assert_eq!(
        fixture.app.store.get_session(&before).unwrap().project_id.as_deref(),
        Some(project_id.as_str())
    );

    let after = fixture.app.new_session();
    assert_eq!(
        fixture.app.store.get_session(&after).unwrap().project_id.as_deref(),
        Some(project_id.as_str())
    );

    // Same name (any case) reuses the project
    assert_eq!(fixture.app.use_project("travel"), Some(project_id.clone()));
    assert_eq!(fixture.app.store.projects().len(), 1);
    assert_eq!(fixture.app.store.sessions_in_project(Some(&project_id)).len(), 2);
    assert!(fixture.app.use_project("   ").is_none());
}

#[test]
fn test_deleting_project_unfiles_sessions() {
    let mut fixture = TestAppBuilder::new().build();
    let session = fixture.app.new_session();
    let project_id = fixture.app.use_project("Scratch").unwrap();

    assert!(fixture.app.store.delete_project(&project_id));
    assert!(fixture
        .app
        .store
        .get_session(&session)
        .unwrap()
        .project_id
        .is_none());
    assert_eq!(fixture.app.store.sessions_in_project(None).len(), 1);
}

#[test]
fn test_actions_are_persisted() {
    let mut fixture = TestAppBuilder::new().build();
    fixture.app.new_session();
    fixture.app.use_project("Work");

    assert!(fixture.storage.get("projects").unwrap().contains("Work"));
    assert!(fixture.app.save_error().is_none());
}
