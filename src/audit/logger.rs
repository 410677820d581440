//! JSONL journal behind the audit trail
//!
//! One entry per line. An entry is encoded in full before the file is opened,
//! so a failed serialization never leaves a partial line behind.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinanceError, FinanceResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one entry and flush it to disk
    pub fn log(&self, entry: &AuditEntry) -> FinanceResult<()> {
        let mut line = serde_json::to_vec(entry)
            .map_err(|e| FinanceError::Json(format!("audit entry not encodable: {}", e)))?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;
        file.write_all(&line)
            .and_then(|_| file.sync_data())
            .map_err(|e| self.io_error("append to", e))?;

        tracing::trace!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "audit entry appended"
        );
        Ok(())
    }

    /// Every entry in the order it was written
    pub fn read_all(&self) -> FinanceResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> FinanceResult<Vec<AuditEntry>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut window = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    /// Decode the journal line by line; a missing file reads as empty
    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> FinanceResult<()> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error("read", e)),
        };

        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(line).map_err(|e| {
                FinanceError::Json(format!(
                    "{} line {}: {}",
                    self.log_path.display(),
                    index + 1,
                    e
                ))
            })?;
            visit(entry);
        }
        Ok(())
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> FinanceError {
        FinanceError::Io(format!(
            "cannot {} audit log {}: {}",
            action,
            self.log_path.display(),
            err
        ))
    }
}
