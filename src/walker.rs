//! Coordinating module for the list-filter-prompt-edit loop.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::{debug, info};

use crate::config::EditConfig;
use crate::filter::KeyFilter;
use crate::prompt::Prompt;
use crate::session::{edit_object, EditOutcome};
use crate::store::ObjectStore;

/// Counters accumulated over one bucket walk.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Objects listed, matching or not.
    pub visited: usize,
    /// Objects whose key matched the pattern.
    pub matched: usize,
    /// Sessions that uploaded a changed object.
    pub edited: usize,
    /// Matches the operator declined to edit.
    pub skipped: usize,
    /// Sessions that ended without changes.
    pub unchanged: usize,
}

/// Empty input or `n`/`N` means skip; anything else is consent.
pub fn consent_given(answer: &str) -> bool {
    let answer = answer.trim();
    !(answer.is_empty() || answer.eq_ignore_ascii_case("n"))
}

fn print_status(action: &str, bucket: &str, key: &str) {
    println!(
        "{}{}",
        format!("{action}: s3://{bucket}/").dark_grey(),
        key.to_string().dark_grey().bold()
    );
}

/// Walks every object in `bucket`, prompting the operator for each key
/// matching `pattern` and running one edit session per consent.
///
/// Processing is strictly sequential. Pagination continues until a page
/// carries no continuation cursor. Any error aborts the walk; objects
/// already processed stay processed.
pub async fn walk_bucket(
    store: &dyn ObjectStore,
    prompt: &dyn Prompt,
    config: &EditConfig,
    bucket: &str,
    pattern: &str,
) -> Result<WalkReport> {
    let filter =
        KeyFilter::new(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;

    info!(bucket, pattern = filter.as_str(), "Starting bucket walk");
    let mut report = WalkReport::default();
    let mut cursor: Option<String> = None;

    loop {
        let page = store
            .list_page(bucket, cursor.take())
            .await
            .with_context(|| format!("failed to list objects in bucket '{bucket}'"))?;
        debug!(
            keys = page.keys.len(),
            has_next = page.next_cursor.is_some(),
            "Fetched listing page"
        );

        for key in page.keys {
            report.visited += 1;
            if !filter.matches(&key) {
                continue;
            }
            report.matched += 1;

            let answer = prompt
                .ask(&format!("Do you want to update s3://{bucket}/{key}? (y/N): "))
                .context("failed to read consent answer")?;
            if !consent_given(&answer) {
                print_status("Skipping file", bucket, &key);
                report.skipped += 1;
                continue;
            }

            match edit_object(store, prompt, config, bucket, &key).await? {
                EditOutcome::Updated => {
                    print_status("Updated file", bucket, &key);
                    report.edited += 1;
                }
                EditOutcome::Unchanged => {
                    print_status("No changes made, skipping file", bucket, &key);
                    report.unchanged += 1;
                }
            }
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!(
        visited = report.visited,
        matched = report.matched,
        edited = report.edited,
        skipped = report.skipped,
        unchanged = report.unchanged,
        "Bucket walk complete"
    );
    Ok(report)
}
