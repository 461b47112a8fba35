use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{json, lines, Snapshot};

pub const STRUCTURED_FILE_NAME: &str = "finance_data.json";
pub const LINES_FILE_NAME: &str = "finance_data.txt";

const TMP_SUFFIX: &str = "tmp";

/// Which of the two files a ledger was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Structured,
    LineOriented,
}

/// Successful load result.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub snapshot: Snapshot,
    pub format: FileFormat,
}

/// Neither file could be loaded. Carries the reason for each stage.
#[derive(Error, Debug)]
#[error("could not load saved data (structured file: {structured:#}; line file: {line_oriented:#})")]
pub struct LoadFailure {
    pub structured: anyhow::Error,
    pub line_oriented: anyhow::Error,
}

impl LoadFailure {
    /// True when both files simply do not exist yet (first run).
    pub fn is_missing(&self) -> bool {
        is_not_found(&self.structured) && is_not_found(&self.line_oriented)
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    })
}

/// Repository for persisting a ledger to its structured and line-oriented files.
#[derive(Debug, Clone)]
pub struct Repository {
    structured_path: PathBuf,
    lines_path: PathBuf,
}

impl Repository {
    pub fn new(structured_path: impl Into<PathBuf>, lines_path: impl Into<PathBuf>) -> Self {
        Self {
            structured_path: structured_path.into(),
            lines_path: lines_path.into(),
        }
    }

    /// Repository using the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(STRUCTURED_FILE_NAME), dir.join(LINES_FILE_NAME))
    }

    pub fn structured_path(&self) -> &Path {
        &self.structured_path
    }

    pub fn lines_path(&self) -> &Path {
        &self.lines_path
    }

    /// Rewrite both files in full with the given state.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let data = json::to_json(snapshot).context("Failed to serialize ledger as JSON")?;
        write_atomic(&self.structured_path, &data)?;

        let mut buf = Vec::new();
        lines::write_lines(snapshot, &mut buf).context("Failed to render ledger lines")?;
        write_atomic(&self.lines_path, &buf)?;

        tracing::debug!(
            incomes = snapshot.incomes.len(),
            expenses = snapshot.expenses.len(),
            "saved ledger to {} and {}",
            self.structured_path.display(),
            self.lines_path.display()
        );
        Ok(())
    }

    /// Load the structured file, falling back to the line file.
    pub fn load(&self) -> Result<Loaded, LoadFailure> {
        let structured = match self.load_structured() {
            Ok(snapshot) => {
                return Ok(Loaded {
                    snapshot,
                    format: FileFormat::Structured,
                });
            }
            Err(err) => err,
        };

        match self.load_lines() {
            Ok(snapshot) => {
                tracing::warn!(
                    "structured file unusable ({:#}), loaded {} instead",
                    structured,
                    self.lines_path.display()
                );
                Ok(Loaded {
                    snapshot,
                    format: FileFormat::LineOriented,
                })
            }
            Err(line_oriented) => Err(LoadFailure {
                structured,
                line_oriented,
            }),
        }
    }

    fn load_structured(&self) -> Result<Snapshot> {
        let path = &self.structured_path;
        let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        json::from_json(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn load_lines(&self) -> Result<Snapshot> {
        let path = &self.lines_path;
        let file =
            fs::File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
        lines::read_lines(io::BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}
