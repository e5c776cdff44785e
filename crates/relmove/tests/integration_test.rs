//! End-to-end moves against a vault on disk

use relmove::app::App;
use relmove::messages::{EN, ZH};
use relmove::settings::with_vault;
use relmove::TerminalPrompt;
use relmove_batch::AutoConfirm;
use relmove_core::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;

/// inbox/idea.md links topic, detail and sketch.png; topic and detail both
/// link shared.md
async fn create_test_vault() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    fs::create_dir_all(root.join("inbox")).await.unwrap();
    fs::create_dir_all(root.join("archive/2023")).await.unwrap();
    fs::create_dir_all(root.join(".obsidian")).await.unwrap();

    let files = [
        ("inbox/idea.md", "# Idea\n\nSee [[topic]] and [details](detail.md).\n\n![[sketch.png]]\n"),
        ("inbox/topic.md", "# Topic\n\nBuilds on [[shared#Background]].\n"),
        ("inbox/detail.md", "# Detail\n\nAlso [[shared|the shared note]].\n\n```\n[[not-a-link]]\n```\n"),
        ("inbox/shared.md", "# Shared\n"),
        ("inbox/sketch.png", "png"),
        ("inbox/unrelated.md", "[[idea]]"),
        ("archive/2023/old.md", "old"),
        (".obsidian/app.json", "{}"),
    ];
    for (path, content) in files {
        fs::write(root.join(path), content).await.unwrap();
    }

    temp_dir
}

async fn open(temp_dir: &TempDir) -> App {
    let config = with_vault(RelmoveConfig::default(), temp_dir.path()).unwrap();
    App::open(config).await.expect("Failed to open vault")
}

fn exists(root: &Path, path: &str) -> bool {
    root.join(path).exists()
}

#[tokio::test]
async fn test_move_with_initial_selection() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;
    let root = temp_dir.path();

    let report = app
        .move_file("inbox/idea.md", "projects", &app.options(), &AutoConfirm)
        .await;

    assert!(report.is_success());
    assert_eq!(report.result.moved_count, 4);
    assert_eq!(report.result.skipped_count, 1);
    assert_eq!(report.result.replaced_count, 0);
    assert_eq!(report.notice(&EN), "Moved: 4, Skipped: 1, Replaced: 0");

    assert!(exists(root, "projects/idea.md"));
    assert!(exists(root, "projects/topic.md"));
    assert!(exists(root, "projects/detail.md"));
    assert!(exists(root, "projects/assets/sketch.png"));
    // referenced twice, left for confirmation
    assert!(exists(root, "inbox/shared.md"));
    assert!(!exists(root, "projects/shared.md"));
    // links into the seed are not followed
    assert!(exists(root, "inbox/unrelated.md"));

    assert!(app.folders("proj").contains(&"projects/assets".to_string()));
}

#[tokio::test]
async fn test_move_without_inlinks() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;
    let options = app.options().include_inlinks(false);

    let report = app
        .move_file("inbox/idea.md", "/", &options, &AutoConfirm)
        .await;

    assert_eq!(report.result.moved_count, 1);
    assert_eq!(report.result.total(), 1);
    assert!(exists(temp_dir.path(), "idea.md"));
    assert!(exists(temp_dir.path(), "inbox/topic.md"));
}

#[tokio::test]
async fn test_existing_destination_skip_and_replace() {
    let temp_dir = create_test_vault().await;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("projects")).await.unwrap();
    fs::write(root.join("projects/topic.md"), "already here").await.unwrap();

    let app = open(&temp_dir).await;
    let report = app
        .move_file("inbox/idea.md", "projects", &app.options(), &AutoConfirm)
        .await;

    assert_eq!(report.result.moved_count, 3);
    assert_eq!(report.result.skipped_count, 2);
    assert_eq!(
        fs::read_to_string(root.join("projects/topic.md")).await.unwrap(),
        "already here"
    );
    assert!(exists(root, "inbox/topic.md"));

    let replace = app.options().skip_file_when_exist(false);
    let report = app
        .move_file("inbox/topic.md", "projects", &replace.include_inlinks(false), &AutoConfirm)
        .await;

    assert_eq!(report.result.moved_count, 1);
    assert_eq!(report.result.replaced_count, 1);
    assert!(!exists(root, "inbox/topic.md"));
    assert!(
        fs::read_to_string(root.join("projects/topic.md"))
            .await
            .unwrap()
            .contains("# Topic")
    );
}

#[tokio::test]
async fn test_terminal_prompt_select_all() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;

    let prompt = TerminalPrompt::new("a\ny\n".as_bytes(), Vec::new(), &EN, "projects");
    let report = app
        .move_file("inbox/idea.md", "projects", &app.options(), &prompt)
        .await;

    assert_eq!(report.result.moved_count, 5);
    assert_eq!(report.result.skipped_count, 0);
    assert!(exists(temp_dir.path(), "projects/shared.md"));

    let shown = String::from_utf8(prompt.into_writer()).unwrap();
    assert!(shown.contains("[ ] inbox/shared.md  (referenced by 2 files)"));
    assert!(shown.contains("Total: 5, Selected: 4, Needs confirmation: 1"));
    assert!(shown.contains("Total: 5, Selected: 5, Needs confirmation: 1"));
}

#[tokio::test]
async fn test_terminal_prompt_cancel() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;

    let prompt = TerminalPrompt::new("q\n".as_bytes(), Vec::new(), &ZH, "projects");
    let report = app
        .move_file("inbox/idea.md", "projects", &app.options(), &prompt)
        .await;

    assert!(report.is_success());
    assert_eq!(report.result, BatchMoveResult::all_skipped(5));
    assert_eq!(report.notice(&ZH), "已移动：0，已跳过：5，已替换：0");
    assert!(!exists(temp_dir.path(), "projects"));
    assert!(exists(temp_dir.path(), "inbox/idea.md"));
}

#[tokio::test]
async fn test_unknown_file_reports_error() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;

    let report = app
        .move_file("inbox/missing.md", "projects", &app.options(), &AutoConfirm)
        .await;

    assert!(!report.is_success());
    assert!(matches!(report.error, Some(Error::FileNotFound { .. })));
    assert_eq!(report.result, BatchMoveResult::default());
    assert!(report.notice(&EN).starts_with("Move failed: File not found"));
}

#[tokio::test]
async fn test_target_outside_vault_is_rejected() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;
    let options = app.options().include_inlinks(false);

    let report = app
        .move_file("inbox/idea.md", "../escape", &options, &AutoConfirm)
        .await;

    assert!(!report.is_success());
    assert_eq!(report.result.moved_count, 0);
    assert!(exists(temp_dir.path(), "inbox/idea.md"));
}

#[tokio::test]
async fn test_plan_leaves_vault_untouched() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;

    let plan = app.plan("inbox/idea.md", "projects", true).await.unwrap();

    assert_eq!(plan.moves.len(), 5);
    assert_eq!(plan.moves[0].file, DocumentId::new("inbox/idea.md"));
    assert_eq!(plan.stats.total_files, 5);
    assert_eq!(plan.stats.cycles, 0);

    let sketch = plan
        .moves
        .iter()
        .find(|m| m.file == DocumentId::new("inbox/sketch.png"))
        .unwrap();
    assert_eq!(sketch.destination, "projects/assets/sketch.png");

    let shared = plan
        .moves
        .iter()
        .find(|m| m.file == DocumentId::new("inbox/shared.md"))
        .unwrap();
    assert_eq!(shared.reference, ReferenceInfo::Shared(2));
    assert!(!shared.selected);

    assert!(!exists(temp_dir.path(), "projects"));

    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"target_folder\":\"projects\""));
}

#[tokio::test]
async fn test_folder_suggestions() {
    let temp_dir = create_test_vault().await;
    let app = open(&temp_dir).await;

    assert_eq!(app.folders(""), vec!["/", "archive", "archive/2023", "inbox"]);
    assert_eq!(app.folders("20"), vec!["archive/2023"]);
    assert!(app.folders("Inbox").is_empty());
}
