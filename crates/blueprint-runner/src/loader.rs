use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blueprint_engine::LevelData;

/// Source of level data for the runner.
pub trait LevelLoader {
    fn load(&self, path: &str) -> Result<LevelData>;
}

/// Reads JSON levels from disk. Relative paths resolve against `base`.
#[derive(Debug, Clone)]
pub struct FileLevelLoader {
    base: PathBuf,
}

impl FileLevelLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Loader rooted at the directory holding `level`, so levels can name
    /// their siblings in SELECT_LEVEL.
    pub fn beside(level: &Path) -> Self {
        let base = level
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(base)
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

impl LevelLoader for FileLevelLoader {
    fn load(&self, path: &str) -> Result<LevelData> {
        let file = self.resolve(path);
        let json = fs::read_to_string(&file)
            .with_context(|| format!("failed to read level {}", file.display()))?;
        let level = LevelData::from_json(&json)
            .with_context(|| format!("failed to parse level {}", file.display()))?;
        Ok(level)
    }
}
