//! # JSON-Lines Persistence
//!
//! One entry per line, each line the JCS canonical form of the full entry:
//!
//! ```text
//! {"hash":"…","index":1,"payload":{"system":"Ledger-Lock Initialized"},"previous_hash":"0","timestamp":"2026-01-15T12:00:00Z"}
//! ```
//!
//! Because lines are canonical, parsing a line and recomputing its hash
//! reproduces exactly the bytes that were hashed at append time.
//!
//! The store is an external collaborator of the ledger: it is invoked after
//! an in-memory append succeeds and its failures are reported as
//! [`StoreError`], never as integrity errors.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use llock_core::CanonicalBytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entry::Entry;
use crate::error::StoreError;

/// A destination for freshly appended entries.
pub trait EntrySink<P> {
    /// Durably record one entry.
    fn persist(&mut self, entry: &Entry<P>) -> Result<(), StoreError>;
}

/// A JSON-lines ledger file.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl JsonlStore {
    /// Point a store at `path`. Nothing is opened until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one entry as a canonical line and flush.
    pub fn append<P: Serialize>(&mut self, entry: &Entry<P>) -> Result<(), StoreError> {
        let line = encode_line(entry)?;
        let path = self.path.clone();
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        if self.writer.is_none() {
            ensure_parent_dir(&self.path).map_err(io_err)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(io_err)?;
            self.writer = Some(BufWriter::new(file));
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(&line).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }
        Ok(())
    }

    /// Replace the file with `entries`, via a temporary file and rename.
    pub fn write_snapshot<P: Serialize>(&mut self, entries: &[Entry<P>]) -> Result<(), StoreError> {
        self.writer = None;
        let tmp = self.path.with_extension("jsonl.tmp");
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        ensure_parent_dir(&self.path).map_err(io_err(&self.path))?;
        let mut writer = BufWriter::new(File::create(&tmp).map_err(io_err(&tmp))?);
        for entry in entries {
            writer.write_all(&encode_line(entry)?).map_err(io_err(&tmp))?;
        }
        writer.flush().map_err(io_err(&tmp))?;
        drop(writer);
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;
        Ok(())
    }

    /// Parse every entry in file order. A missing file yields no entries.
    ///
    /// Loading does not verify; pass the result to
    /// [`crate::verify_entries`] or [`crate::Ledger::restore`].
    pub fn load<P: DeserializeOwned>(&self) -> Result<Vec<Entry<P>>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut out = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                line: i + 1,
                source,
            })?;
            out.push(entry);
        }
        Ok(out)
    }
}

impl<P: Serialize> EntrySink<P> for JsonlStore {
    fn persist(&mut self, entry: &Entry<P>) -> Result<(), StoreError> {
        self.append(entry)
    }
}

fn encode_line<P: Serialize>(entry: &Entry<P>) -> Result<Vec<u8>, StoreError> {
    let canonical = CanonicalBytes::new(entry)?;
    let mut line = canonical.as_bytes().to_vec();
    line.push(b'\n');
    Ok(line)
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Ledger;
    use crate::clock::FixedClock;
    use crate::verify::verify_entries;
    use llock_core::Timestamp;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn ledger_with(records: &[Value]) -> Ledger<Value> {
        let clock = Arc::new(FixedClock::new(
            Timestamp::parse("2026-01-15T12:00:00Z").unwrap(),
        ));
        let mut ledger = Ledger::with_clock(clock);
        for r in records {
            ledger.append(r.clone()).unwrap();
        }
        ledger
    }

    #[test]
    fn append_then_load_reproduces_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::new(dir.path().join("ledger.jsonl"));
        let ledger = ledger_with(&[json!({"amount": 5000}), json!({"amount": 12000})]);
        for entry in ledger.entries() {
            store.append(entry).unwrap();
        }

        let loaded: Vec<Entry<Value>> = store.load().unwrap();
        assert_eq!(loaded.as_slice(), ledger.entries());
        assert_eq!(verify_entries(&loaded), Ok(()));
    }

    #[test]
    fn lines_are_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::new(dir.path().join("ledger.jsonl"));
        let ledger = ledger_with(&[]);
        store.append(ledger.genesis()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let expected = format!(
            "{{\"hash\":\"{}\",\"index\":1,\"payload\":{{\"system\":\"Ledger-Lock Initialized\"}},\"previous_hash\":\"0\",\"timestamp\":\"2026-01-15T12:00:00Z\"}}\n",
            ledger.genesis().hash
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("absent.jsonl"));
        assert!(!store.exists());
        let loaded: Vec<Entry<Value>> = store.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let mut store = JsonlStore::new(&path);
        let ledger = ledger_with(&[]);
        store.append(ledger.genesis()).unwrap();
        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("{not json\n");
        fs::write(&path, text).unwrap();

        match store.load::<Value>() {
            Err(StoreError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_replaces_file_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.jsonl");
        let mut store = JsonlStore::new(&path);
        let ledger = ledger_with(&[json!({"n": 1}), json!({"n": 2})]);

        store.write_snapshot(ledger.entries()).unwrap();
        store.write_snapshot(ledger.entries()).unwrap();

        let loaded: Vec<Entry<Value>> = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let mut store = JsonlStore::new(dir.path());
        let ledger = ledger_with(&[]);
        assert!(matches!(
            store.append(ledger.genesis()),
            Err(StoreError::Io { .. })
        ));
    }
}
