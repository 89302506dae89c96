#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rowbind::{Fields, RecordList, Value};
use tempfile::{TempDir, tempdir};

/// Builds record fields from `(name, value)` pairs.
pub fn fields<V: Into<Value> + Clone>(pairs: &[(&str, V)]) -> Fields {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone().into()))
        .collect()
}

/// A list holding a single record built from `pairs`.
pub fn single(pairs: &[(&str, Value)]) -> RecordList {
    let mut list = RecordList::new();
    list.append(Some(fields(pairs)));
    list
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
