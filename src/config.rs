use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

/// Editor command used when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "code";

/// Name of the staging directory under the system temp dir.
const SCRATCH_DIR_NAME: &str = "s3edit";

/// Settings for edit sessions, resolved once at startup and passed down
/// explicitly instead of read from the environment mid-session.
#[derive(Debug, Clone)]
pub struct EditConfig {
    /// Executable used to open staged files for manual editing.
    pub editor: String,
    /// Fixed directory all objects are staged under.
    pub scratch_dir: PathBuf,
}

impl EditConfig {
    pub fn from_env() -> Self {
        let editor = env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
        Self {
            editor,
            scratch_dir: env::temp_dir().join(SCRATCH_DIR_NAME),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            editor = %self.editor,
            scratch_dir = %self.scratch_dir.display(),
            "Loaded edit config"
        );
        debug!(?self, "Edit config (full debug)");
    }
}
