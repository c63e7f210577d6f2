//! Output sinks: where generated units end up.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SinkError;
use crate::pipeline::{Emission, Unit};

/// Persists generated units.
pub trait OutputSink {
    fn write_unit(&mut self, unit: &Unit) -> Result<(), SinkError>;
}

/// Write every unit of `emission`, in order, stopping at the first failure.
pub fn write_all<S>(emission: &Emission, sink: &mut S) -> Result<(), SinkError>
where
    S: OutputSink + ?Sized,
{
    for unit in emission {
        sink.write_unit(unit)?;
    }
    Ok(())
}

/// Writes each unit to `<root>/<unit>.rs`.
///
/// The directory is created on demand. Each file is first written under a
/// temporary name and then renamed into place, so a reader never sees a
/// half-written unit.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final location of `unit`.
    pub fn path_for(&self, unit: &Unit) -> PathBuf {
        self.root.join(unit.file_name())
    }
}

impl OutputSink for DirectorySink {
    fn write_unit(&mut self, unit: &Unit) -> Result<(), SinkError> {
        fs::create_dir_all(&self.root).map_err(|source| SinkError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_for(unit);
        let staging = self.root.join(format!(".{}.tmp", unit.file_name()));

        let written = fs::write(&staging, &unit.source).and_then(|()| fs::rename(&staging, &path));
        if let Err(source) = written {
            let _ = fs::remove_file(&staging);
            return Err(SinkError::Write {
                unit: unit.name.clone(),
                path,
                source,
            });
        }

        tracing::info!(unit = %unit.name, path = %path.display(), "wrote unit");
        Ok(())
    }
}

/// Keeps units in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write_unit(&mut self, unit: &Unit) -> Result<(), SinkError> {
        tracing::debug!(unit = %unit.name, "buffered unit");
        self.files.insert(unit.file_name(), unit.source.clone());
        Ok(())
    }
}
