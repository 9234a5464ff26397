//! Removal of disposable project directories (venv, caches, build output).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

/// Remove `root/dir` recursively if it exists.
///
/// Returns whether anything was removed. A missing path is a no-op and is
/// never created. Symlinks are removed without following them, and a path
/// whose parent resolves outside `root` is refused.
pub fn remove_dir(root: &Path, dir: &str) -> Result<bool> {
    let path = root.join(dir);
    let meta = match fs::symlink_metadata(&path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to remove");
            return Ok(false);
        }
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };

    ensure_inside(root, &path)?;

    if meta.is_dir() {
        fs::remove_dir_all(&path).with_context(|| format!("remove {}", path.display()))?;
    } else {
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
    }
    info!(path = %path.display(), "removed");
    Ok(true)
}

/// Fail unless the directory holding `path` resolves under `root`.
///
/// Config paths are checked textually; this catches symlinked parents.
fn ensure_inside(root: &Path, path: &Path) -> Result<()> {
    let parent = path.parent().unwrap_or(root);
    let root_real =
        fs::canonicalize(root).with_context(|| format!("resolve {}", root.display()))?;
    let parent_real =
        fs::canonicalize(parent).with_context(|| format!("resolve {}", parent.display()))?;
    if !parent_real.starts_with(&root_real) {
        bail!(
            "refusing to remove {}: it resolves outside {}",
            path.display(),
            root.display()
        );
    }
    Ok(())
}

/// Remove each of `dirs` under `root`, returning the paths actually removed.
pub fn remove_dirs<S: AsRef<str>>(root: &Path, dirs: &[S]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in dirs {
        let dir = dir.as_ref();
        if remove_dir(root, dir)? {
            removed.push(root.join(dir));
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_is_noop() {
        let temp = tempfile::tempdir().expect("tempdir");
        let removed = remove_dir(temp.path(), "dist").expect("remove");
        assert!(!removed);
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn existing_tree_is_removed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join(".venv").join("lib").join("site-packages");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(nested.join("pkg.py"), "x = 1\n").expect("write");

        assert!(remove_dir(temp.path(), ".venv").expect("remove"));
        assert!(!temp.path().join(".venv").exists());
    }

    #[test]
    fn regular_file_is_removed() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("dist"), "stale").expect("write");

        assert!(remove_dir(temp.path(), "dist").expect("remove"));
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn remove_dirs_reports_only_existing() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join(".pytest_cache")).expect("mkdir");

        let removed =
            remove_dirs(temp.path(), &[".venv", ".pytest_cache", "dist"]).expect("remove");
        assert_eq!(removed, vec![temp.path().join(".pytest_cache")]);
        assert!(!temp.path().join(".pytest_cache").exists());
        assert!(!temp.path().join(".venv").exists());
        assert!(!temp.path().join("dist").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_parent_outside_root_is_refused() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outside = tempfile::tempdir().expect("outside");
        fs::create_dir_all(outside.path().join("sub")).expect("mkdir");
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).expect("symlink");

        let err = remove_dir(temp.path(), "link/sub").unwrap_err();
        assert!(err.to_string().contains("resolves outside"), "{err:#}");
        assert!(outside.path().join("sub").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_removed_without_touching_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("keep");
        fs::create_dir_all(&target).expect("mkdir");
        fs::write(target.join("data"), "keep me").expect("write");
        std::os::unix::fs::symlink(&target, temp.path().join(".venv")).expect("symlink");

        assert!(remove_dir(temp.path(), ".venv").expect("remove"));
        assert!(!temp.path().join(".venv").exists());
        assert!(target.join("data").exists());
    }
}
