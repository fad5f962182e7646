//! One interactive edit session: stage an object locally, hand it to the
//! operator's editor, and upload it back iff the content changed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::EditConfig;
use crate::prompt::Prompt;
use crate::store::ObjectStore;

/// What an edit session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The staged file changed and was uploaded back.
    Updated,
    /// The staged file was untouched; nothing was uploaded.
    Unchanged,
}

/// Deterministic staging filename for an object key.
///
/// Naive separator substitution collides for keys like `a/b.txt` and
/// `a_b.txt`, so the name is prefixed with a digest of the full key. The
/// final key segment is kept for readability in the editor's title bar.
pub fn scratch_file_name(key: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
    let basename = key.rsplit('/').next().unwrap_or(key);
    format!("{}_{}", &digest[..16], basename)
}

fn content_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Staged copy of an object, removed on drop.
///
/// Owning the file in a guard keeps the cleanup invariant on every exit
/// path of a session, including upload failures. Only abrupt process
/// termination can leave the file behind.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn create(dir: &Path, key: &str, content: &[u8]) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(scratch_file_name(key));
        fs::write(&path, content)?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to remove scratch file"
            );
        }
    }
}

/// Runs one edit session for `bucket`/`key`.
///
/// The editor is launched detached and never waited on; the session
/// suspends on the prompt until the operator signals completion. Exactly
/// one upload attempt occurs iff the staged content's digest changed.
pub async fn edit_object(
    store: &dyn ObjectStore,
    prompt: &dyn Prompt,
    config: &EditConfig,
    bucket: &str,
    key: &str,
) -> Result<EditOutcome> {
    let body = store
        .download(bucket, key)
        .await
        .with_context(|| format!("failed to download s3://{bucket}/{key}"))?;
    let scratch = ScratchFile::create(&config.scratch_dir, key, &body)
        .with_context(|| format!("failed to stage s3://{bucket}/{key} locally"))?;
    let staged_digest = content_digest(&body);
    debug!(
        path = %scratch.path().display(),
        bytes = body.len(),
        "Staged object for editing"
    );

    Command::new(&config.editor)
        .arg(scratch.path())
        .spawn()
        .with_context(|| format!("failed to launch editor '{}'", config.editor))?;

    prompt
        .pause("\nPress Enter when done editing...\n")
        .context("failed waiting for the operator")?;

    let edited = scratch
        .read()
        .with_context(|| format!("failed to re-read staged copy of s3://{bucket}/{key}"))?;
    if content_digest(&edited) == staged_digest {
        return Ok(EditOutcome::Unchanged);
    }

    let content_type = store
        .content_type(bucket, key)
        .await
        .with_context(|| format!("failed to fetch content type of s3://{bucket}/{key}"))?;
    store
        .upload(bucket, key, edited, content_type)
        .await
        .with_context(|| format!("failed to upload s3://{bucket}/{key}"))?;

    Ok(EditOutcome::Updated)
}
