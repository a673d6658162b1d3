//! Directory resolution for the command-line tool.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the generator reads config and writes logs and debug maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrataDirs {
    /// Holds `worldgen.ron` and relative overlay image paths.
    pub config_dir: PathBuf,
    /// JSON log files in debug builds.
    pub log_dir: PathBuf,
    /// Default destination for debug maps, one subdirectory per world.
    pub output_dir: PathBuf,
}

const APP_NAME: &str = "strata";

impl StrataDirs {
    /// Resolve platform directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let output_dir = dirs::data_dir()
            .unwrap_or_else(|| app_config.clone())
            .join(APP_NAME);

        Ok(Self {
            config_dir: app_config.clone(),
            log_dir: app_config.join("logs"),
            output_dir,
        })
    }

    /// Directories rooted under `root`; used by tests and `--config`.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
            output_dir: root.join("output"),
        }
    }

    /// Platform directories, or everything under `config` when given.
    pub fn resolve_or_override(config: Option<&Path>) -> Result<Self, PlatformError> {
        match config {
            Some(root) => Ok(Self::resolve_with_root(root)),
            None => Self::resolve(),
        }
    }

    /// Create every directory on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Debug map directory for a world.
    pub fn world_output_dir(&self, world_name: &str) -> PathBuf {
        self.output_dir.join(world_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root() {
        let root = Path::new("some").join("root");
        let dirs = StrataDirs::resolve_with_root(&root);
        assert_eq!(dirs.config_dir, root);
        assert_eq!(dirs.log_dir, root.join("logs"));
        assert_eq!(dirs.world_output_dir("highlands"), root.join("output").join("highlands"));
    }

    #[test]
    fn test_override_wins() {
        let root = Path::new("custom");
        let dirs = StrataDirs::resolve_or_override(Some(root)).unwrap();
        assert_eq!(dirs.config_dir, root);
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = StrataDirs::resolve_with_root(&tmp.path().join("strata"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        assert!(dirs.output_dir.is_dir());
    }
}
