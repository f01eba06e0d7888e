//! Writing generated configuration to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

pub const MAIN_TF: &str = "main.tf";

#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The file already held exactly this content.
    Unchanged(PathBuf),
}

/// Write `contents` to `<dir>/main.tf`.
///
/// An existing file with different content is only replaced when `force`
/// is set.
pub fn write_main_tf(dir: &Path, contents: &str, force: bool) -> Result<WriteOutcome> {
    let path = dir.join(MAIN_TF);

    if path.exists() {
        let existing = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if existing == contents {
            return Ok(WriteOutcome::Unchanged(path));
        }
        if !force {
            bail!(
                "{} already exists with different content, use --force to overwrite",
                path.display()
            );
        }
        debug!("Overwriting {}", path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(WriteOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HCL: &str = "provider \"google\" {}\n";

    #[test]
    fn test_writes_into_new_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("terraform");

        let outcome = write_main_tf(&target, HCL, false).unwrap();

        assert_eq!(outcome, WriteOutcome::Written(target.join(MAIN_TF)));
        assert_eq!(fs::read_to_string(target.join(MAIN_TF)).unwrap(), HCL);
    }

    #[test]
    fn test_identical_content_is_up_to_date() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MAIN_TF), HCL).unwrap();

        let outcome = write_main_tf(dir.path(), HCL, false).unwrap();
        assert_eq!(outcome, WriteOutcome::Unchanged(dir.path().join(MAIN_TF)));
    }

    #[test]
    fn test_different_content_requires_force() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MAIN_TF), "# hand edited\n").unwrap();

        let err = write_main_tf(dir.path(), HCL, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(dir.path().join(MAIN_TF)).unwrap(),
            "# hand edited\n"
        );

        write_main_tf(dir.path(), HCL, true).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(MAIN_TF)).unwrap(), HCL);
    }
}
