//! Filesystem actions and their sequential executor.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenError, GenResult};

/// A deferred filesystem effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Recursively copy a directory, creating the destination as needed.
    CopyDir { from: PathBuf, to: PathBuf },
    /// Write rendered text to a file. The parent directory must exist.
    WriteFile { path: PathBuf, contents: String },
}

impl Action {
    /// Path the action produces.
    pub fn target(&self) -> &Path {
        match self {
            Action::CopyDir { to, .. } => to,
            Action::WriteFile { path, .. } => path,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CopyDir { from, to } => {
                write!(f, "copy {} -> {}", from.display(), to.display())
            }
            Action::WriteFile { path, .. } => write!(f, "write {}", path.display()),
        }
    }
}

/// The primitive effects actions are carried out with.
pub trait Effects {
    fn copy_dir(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`Effects`] against the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEffects;

impl Effects for FsEffects {
    fn copy_dir(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        for entry in WalkDir::new(from) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else {
                fs::copy(entry.path(), &dest)?;
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Run `actions` in order, stopping at the first failure.
///
/// Actions after a failing one never run and nothing already written is
/// rolled back.
pub fn execute<E: Effects>(actions: &[Action], effects: &mut E) -> GenResult<()> {
    for (index, action) in actions.iter().enumerate() {
        debug!(index, action = %action, "Running action");

        let result = match action {
            Action::CopyDir { from, to } => effects.copy_dir(from, to),
            Action::WriteFile { path, contents } => effects.write_file(path, contents),
        };
        result.map_err(|e| GenError::io(action.target(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call and fails at a chosen position.
    #[derive(Default)]
    struct RecordingEffects {
        calls: Vec<PathBuf>,
        fail_at: Option<usize>,
    }

    impl RecordingEffects {
        fn record(&mut self, path: &Path) -> io::Result<()> {
            let index = self.calls.len();
            self.calls.push(path.to_path_buf());
            if self.fail_at == Some(index) {
                return Err(io::Error::other("disk full"));
            }
            Ok(())
        }
    }

    impl Effects for RecordingEffects {
        fn copy_dir(&mut self, _from: &Path, to: &Path) -> io::Result<()> {
            self.record(to)
        }

        fn write_file(&mut self, path: &Path, _contents: &str) -> io::Result<()> {
            self.record(path)
        }
    }

    fn actions() -> Vec<Action> {
        let mut actions = vec![Action::CopyDir {
            from: PathBuf::from("support"),
            to: PathBuf::from("out/fp"),
        }];
        for name in ["a", "b", "c", "d"] {
            actions.push(Action::WriteFile {
                path: PathBuf::from(format!("out/fp/{name}.js")),
                contents: String::new(),
            });
        }
        actions
    }

    #[test]
    fn test_runs_all_actions_in_order() {
        let actions = actions();
        let mut effects = RecordingEffects::default();

        execute(&actions, &mut effects).unwrap();

        let expected: Vec<PathBuf> = actions.iter().map(|a| a.target().to_path_buf()).collect();
        assert_eq!(effects.calls, expected);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let actions = actions();
        let mut effects = RecordingEffects {
            fail_at: Some(2),
            ..Default::default()
        };

        let err = execute(&actions, &mut effects).unwrap_err();

        assert_eq!(effects.calls.len(), 3);
        match err {
            GenError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("out/fp/b.js"));
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failing_copy_skips_every_write() {
        let actions = actions();
        let mut effects = RecordingEffects {
            fail_at: Some(0),
            ..Default::default()
        };

        assert!(execute(&actions, &mut effects).is_err());
        assert_eq!(effects.calls, vec![PathBuf::from("out/fp")]);
    }

    #[test]
    fn test_fs_copy_dir_is_recursive() {
        let temp = tempfile::TempDir::new().unwrap();
        let from = temp.path().join("support");
        fs::create_dir_all(from.join("nested")).unwrap();
        fs::write(from.join("placeholder.js"), "module.exports = {};").unwrap();
        fs::write(from.join("nested/inner.js"), "inner").unwrap();

        let to = temp.path().join("out/fp");
        FsEffects.copy_dir(&from, &to).unwrap();

        assert_eq!(
            fs::read_to_string(to.join("placeholder.js")).unwrap(),
            "module.exports = {};"
        );
        assert_eq!(fs::read_to_string(to.join("nested/inner.js")).unwrap(), "inner");
    }

    #[test]
    fn test_fs_write_requires_parent() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing/file.js");

        assert!(FsEffects.write_file(&path, "x").is_err());
    }
}
