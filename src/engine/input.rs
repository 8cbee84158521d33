//! Input discovery, split planning and line-oriented record sources

use super::context::RecordSource;
use crate::error::{ErrorCode, ErrorExt, Result, WordCountError};
use serde::Serialize;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A contiguous range of lines of one input file, processed by one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSplit {
    pub id: usize,
    pub path: PathBuf,
    /// Zero-based index of the first line of the split
    pub first_line: usize,
    /// Byte offset of the first line; readers seek here directly
    pub start_offset: u64,
    /// Number of lines in the split; `None` reads to the end of the file
    pub line_count: Option<usize>,
}

impl InputSplit {
    pub fn whole_file(id: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
            first_line: 0,
            start_offset: 0,
            line_count: None,
        }
    }
}

/// Files to read for `input`
///
/// A file is returned as is. For a directory, its direct children are
/// returned in name order, skipping entries whose names start with `_` or
/// `.` and anything that is not a regular file.
pub fn list_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(WordCountError::input(
            ErrorCode::INPUT_NOT_FOUND,
            "input path does not exist",
            input,
        ));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.to_input_error(input)?;
        let hidden = entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('_') || name.starts_with('.'))
            .unwrap_or(false);
        if hidden || !entry.file_type().is_file() {
            debug!("Skipping input entry {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Divide `files` into splits
///
/// Without `lines_per_split` each file is one split and nothing is read. With
/// it, each file is scanned once and cut into ranges of at most that many
/// lines, each starting at a recorded byte offset; an empty file still gets
/// one split.
pub fn plan_splits(files: &[PathBuf], lines_per_split: Option<usize>) -> Result<Vec<InputSplit>> {
    let mut splits = Vec::new();

    for path in files {
        match lines_per_split {
            Some(chunk) if chunk > 0 => split_file(path, chunk, &mut splits)?,
            _ => splits.push(InputSplit::whole_file(splits.len(), path.clone())),
        }
    }

    Ok(splits)
}

fn split_file(path: &Path, chunk: usize, splits: &mut Vec<InputSplit>) -> Result<()> {
    let file = File::open(path).to_input_error(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut offset = 0u64;
    let mut line = 0usize;
    let first_split = splits.len();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).to_input_error(path)?;
        if read == 0 {
            break;
        }
        if line % chunk == 0 {
            splits.push(InputSplit {
                id: splits.len(),
                path: path.to_path_buf(),
                first_line: line,
                start_offset: offset,
                line_count: Some(0),
            });
        }
        if let Some(count) = splits.last_mut().and_then(|split| split.line_count.as_mut()) {
            *count += 1;
        }
        offset += read as u64;
        line += 1;
    }

    if splits.len() == first_split {
        splits.push(InputSplit::whole_file(splits.len(), path));
    }
    debug!(
        "Split {} ({} lines) into {} ranges",
        path.display(),
        line,
        splits.len() - first_split
    );
    Ok(())
}

/// Drop a trailing `\n` or `\r\n` from a line read with `read_until`
pub fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// Reads the lines of one split from disk
///
/// Lines may end in `\n` or `\r\n`; invalid UTF-8 is replaced rather than
/// rejected.
pub struct LineRecordSource {
    reader: BufReader<File>,
    path: PathBuf,
    name: String,
    remaining: Option<usize>,
    buf: Vec<u8>,
}

impl LineRecordSource {
    /// Open `split`, positioned at its `start_offset`
    pub fn open(split: &InputSplit) -> Result<Self> {
        let mut file = File::open(&split.path).to_input_error(&split.path)?;
        if split.start_offset > 0 {
            file.seek(SeekFrom::Start(split.start_offset))
                .to_input_error(&split.path)?;
        }

        Ok(Self {
            reader: BufReader::new(file),
            path: split.path.clone(),
            name: split.path.display().to_string(),
            remaining: split.line_count,
            buf: Vec::new(),
        })
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .to_input_error(&self.path)?;
        if read == 0 {
            return Ok(None);
        }

        strip_line_ending(&mut self.buf);
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl RecordSource for LineRecordSource {
    fn next_record(&mut self) -> Result<Option<String>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        let record = self.read_line()?;
        if record.is_some() {
            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }
        }
        Ok(record)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Serves records from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    name: String,
    records: VecDeque<String>,
}

impl MemoryRecordSource {
    pub fn new<I, S>(name: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            records: records.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordSource for MemoryRecordSource {
    fn next_record(&mut self) -> Result<Option<String>> {
        Ok(self.records.pop_front())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
