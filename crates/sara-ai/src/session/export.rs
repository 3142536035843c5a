//! Writing the transcript to disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::export::render_transcript;
use crate::ExportError;

use super::manager::SessionManager;
use super::types::ExportOutcome;

impl SessionManager {
    /// Save the conversation (without the system instruction) as plain text.
    ///
    /// `None` means the user chose no destination. The file is written to a
    /// sibling `.tmp` path and renamed into place, so a failed export never
    /// leaves something that looks like a finished transcript.
    pub fn export_transcript(&self, destination: Option<&Path>) -> ExportOutcome {
        let Some(path) = destination else {
            return ExportOutcome::Skipped;
        };

        let rendered = render_transcript(self.lock_transcript().history());

        match write_atomic(path, &rendered) {
            Ok(()) => {
                info!(session = %self.id.short(), path = %path.display(), "transcript saved");
                ExportOutcome::Saved(path.to_path_buf())
            }
            Err(e) => {
                error!(session = %self.id.short(), error = %e, "error saving conversation");
                ExportOutcome::Failed(e)
            }
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ExportError> {
    let tmp = tmp_path(path);
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = std::fs::write(&tmp, contents) {
        // A partial temp file may exist.
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    if let Err(e) = std::fs::rename(&tmp, path) {
        warn!("rename of {} failed: {e}", tmp.display());
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/a/conversation.txt")),
            PathBuf::from("/a/conversation.txt.tmp")
        );
    }

    #[test]
    fn write_atomic_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_atomic(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn write_atomic_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_atomic(&path, "hello").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}
