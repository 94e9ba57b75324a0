use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, WordCountError};
use crate::vocabulary::VocabEntry;

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WordCountError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| WordCountError::io(path, e))?;
    Ok(BufWriter::new(file))
}

fn finish(path: &Path, writer: BufWriter<File>) -> Result<()> {
    writer
        .into_inner()
        .map_err(|e| WordCountError::io(path, e.into_error()))?
        .sync_all()
        .map_err(|e| WordCountError::io(path, e))
}

/// One `<word> <count>` line per entry, in the given order. Words are
/// written as their raw bytes
pub fn write_frequencies(path: &Path, entries: &[VocabEntry]) -> Result<()> {
    let mut writer = create(path)?;
    for entry in entries {
        writer
            .write_all(&entry.word)
            .and_then(|_| writeln!(writer, " {}", entry.count))
            .map_err(|e| WordCountError::io(path, e))?;
    }
    finish(path, writer)
}

/// One median per line, one fractional digit
pub fn write_medians(path: &Path, history: &[f64]) -> Result<()> {
    let mut writer = create(path)?;
    for median in history {
        writeln!(writer, "{:.1}", median).map_err(|e| WordCountError::io(path, e))?;
    }
    finish(path, writer)
}

/// Pretty JSON
pub fn write_summary<T: Serialize>(path: &Path, summary: &T) -> Result<()> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer).map_err(|e| WordCountError::io(path, e))?;
    finish(path, writer)
}
