use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::EditConfig;
use crate::prompt::TerminalPrompt;
use crate::store::{S3Store, StoreError};
use crate::walker::walk_bucket;

/// CLI for s3edit: review and edit bucket objects in your own editor.
#[derive(Parser)]
#[clap(
    name = "s3edit",
    version,
    about = "Find objects in an S3 bucket by glob pattern, edit them locally, upload changes back"
)]
pub struct Cli {
    /// Bucket name and key filter in the format "some.bucket.name/some/glob/*/pattern.html"
    pub bucket_and_path: String,
}

/// Splits the positional argument into bucket and pattern at the first `/`.
/// The pattern may itself contain further `/` segments and wildcards.
pub fn split_target(bucket_and_path: &str) -> Result<(&str, &str)> {
    match bucket_and_path.split_once('/') {
        Some((bucket, pattern)) if !bucket.is_empty() && !pattern.is_empty() => {
            Ok((bucket, pattern))
        }
        _ => bail!("expected an argument of the form BUCKET/PATTERN, got '{bucket_and_path}'"),
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let (bucket, pattern) = split_target(&cli.bucket_and_path)?;

    let config = EditConfig::from_env();
    config.trace_loaded();

    let store = S3Store::new_from_env().await.map_err(|err| match err {
        StoreError::Credentials(reason) => {
            tracing::error!(%reason, "Credential resolution failed");
            anyhow::anyhow!("Unable to access AWS credentials. Please configure your credentials.")
        }
        other => anyhow::Error::new(other).context("failed to construct store client"),
    })?;

    let prompt = TerminalPrompt::new();
    let report = walk_bucket(&store, &prompt, &config, bucket, pattern)
        .await
        .with_context(|| format!("Error updating files in bucket: {bucket}"))?;

    println!("Walk complete.\nReport:");
    println!("{report:#?}");
    Ok(())
}
