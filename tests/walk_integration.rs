use std::path::Path;

use tempfile::tempdir;

use s3edit::config::EditConfig;
use s3edit::prompt::MockPrompt;
use s3edit::store::{MockObjectStore, ObjectPage, StoreError};
use s3edit::walker::{consent_given, walk_bucket};

const BUCKET: &str = "my-bucket";

fn test_config(scratch_dir: &Path) -> EditConfig {
    EditConfig {
        editor: "true".to_string(),
        scratch_dir: scratch_dir.to_path_buf(),
    }
}

#[test]
fn empty_and_n_answers_mean_skip() {
    assert!(!consent_given(""));
    assert!(!consent_given("n"));
    assert!(!consent_given("N"));
    assert!(!consent_given("  "));

    assert!(consent_given("y"));
    assert!(consent_given("yes"));
    assert!(consent_given("anything else"));
}

#[tokio::test]
async fn walk_visits_every_page_and_prompts_only_for_matches() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    // Three pages, five objects, two of which match pages/*.html.
    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .withf(|bucket: &str, cursor: &Option<String>| bucket == BUCKET && cursor.is_none())
        .return_once(|_, _| {
            Ok(ObjectPage {
                keys: vec!["pages/index.html".to_string(), "assets/logo.png".to_string()],
                next_cursor: Some("cursor-1".to_string()),
            })
        });
    store
        .expect_list_page()
        .withf(|bucket: &str, cursor: &Option<String>| {
            bucket == BUCKET && cursor.as_deref() == Some("cursor-1")
        })
        .return_once(|_, _| {
            Ok(ObjectPage {
                keys: vec![
                    "pages/about.html".to_string(),
                    "pages/sub/index.html".to_string(),
                ],
                next_cursor: Some("cursor-2".to_string()),
            })
        });
    store
        .expect_list_page()
        .withf(|bucket: &str, cursor: &Option<String>| {
            bucket == BUCKET && cursor.as_deref() == Some("cursor-2")
        })
        .return_once(|_, _| {
            Ok(ObjectPage {
                keys: vec!["robots.txt".to_string()],
                next_cursor: None,
            })
        });
    // Declining every prompt must not trigger a single download.
    store.expect_download().never();

    let mut prompt = MockPrompt::new();
    prompt
        .expect_ask()
        .withf(|question: &str| question.starts_with("Do you want to update s3://my-bucket/"))
        .times(2)
        .returning(|_| Ok(String::new()));

    let report = walk_bucket(&store, &prompt, &config, BUCKET, "pages/*.html")
        .await
        .expect("walk succeeds");

    assert_eq!(report.visited, 5);
    assert_eq!(report.matched, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.edited, 0);
    assert_eq!(report.unchanged, 0);
}

#[tokio::test]
async fn consented_match_runs_a_session_and_counts_the_outcome() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    let mut store = MockObjectStore::new();
    store.expect_list_page().return_once(|_, _| {
        Ok(ObjectPage {
            keys: vec!["pages/index.html".to_string()],
            next_cursor: None,
        })
    });
    store
        .expect_download()
        .return_once(|_, _| Ok(b"<html></html>".to_vec()));
    store.expect_upload().never();

    let mut prompt = MockPrompt::new();
    prompt.expect_ask().return_once(|_| Ok("y".to_string()));
    prompt.expect_pause().return_once(|_| Ok(()));

    let report = walk_bucket(&store, &prompt, &config, BUCKET, "pages/*.html")
        .await
        .expect("walk succeeds");

    assert_eq!(report.visited, 1);
    assert_eq!(report.matched, 1);
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.edited, 0);
    assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn explicit_n_answer_skips_without_downloading() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    let mut store = MockObjectStore::new();
    store.expect_list_page().return_once(|_, _| {
        Ok(ObjectPage {
            keys: vec!["pages/index.html".to_string()],
            next_cursor: None,
        })
    });
    store.expect_download().never();

    let mut prompt = MockPrompt::new();
    prompt.expect_ask().return_once(|_| Ok("N".to_string()));

    let report = walk_bucket(&store, &prompt, &config, BUCKET, "pages/*.html")
        .await
        .expect("walk succeeds");

    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn listing_failure_aborts_the_walk_with_bucket_context() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .return_once(|_, _| Err(StoreError::Service("access denied".to_string())));

    let prompt = MockPrompt::new();

    let err = walk_bucket(&store, &prompt, &config, BUCKET, "pages/*.html")
        .await
        .expect_err("walk aborts");

    let rendered = format!("{err:#}");
    assert!(rendered.contains(BUCKET));
    assert!(rendered.contains("access denied"));
}

#[tokio::test]
async fn session_failure_aborts_the_walk() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    let mut store = MockObjectStore::new();
    store.expect_list_page().return_once(|_, _| {
        Ok(ObjectPage {
            keys: vec!["pages/index.html".to_string()],
            next_cursor: None,
        })
    });
    store
        .expect_download()
        .return_once(|_, _| Err(StoreError::Service("no such key".to_string())));

    let mut prompt = MockPrompt::new();
    prompt.expect_ask().return_once(|_| Ok("y".to_string()));

    let err = walk_bucket(&store, &prompt, &config, BUCKET, "pages/*.html")
        .await
        .expect_err("walk aborts");

    assert!(format!("{err:#}").contains("no such key"));
}

#[tokio::test]
async fn invalid_pattern_fails_before_any_listing() {
    let scratch = tempdir().expect("temp scratch dir");
    let config = test_config(scratch.path());

    // No expectations: a list_page call would fail the test.
    let store = MockObjectStore::new();
    let prompt = MockPrompt::new();

    let err = walk_bucket(&store, &prompt, &config, BUCKET, "pages/[")
        .await
        .expect_err("pattern is rejected");

    assert!(format!("{err:#}").contains("invalid glob pattern"));
}
