//! Output directory layout and sinks for final pairs

use super::context::OutputSink;
use crate::error::{ErrorCode, ErrorExt, Result, WordCountError};
use crate::pipeline::WordCount;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Empty file written once every part file is complete
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// File name of the output of reducer `index`
pub fn part_file_name(index: usize) -> String {
    format!("part-{:05}", index)
}

/// Create the job output directory; it must not exist yet
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(WordCountError::output(
            ErrorCode::OUTPUT_ALREADY_EXISTS,
            "output directory already exists",
            path,
        ));
    }
    fs::create_dir_all(path).to_output_error(path)
}

pub fn write_success_marker(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(SUCCESS_MARKER);
    File::create(&path).to_output_error(&path)?;
    Ok(path)
}

/// Read every `part-*` file of a job output directory back into a count map
pub fn read_part_files(dir: &Path) -> Result<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();
    let mut parts: Vec<PathBuf> = fs::read_dir(dir)
        .to_output_error(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with("part-"))
                .unwrap_or(false)
        })
        .collect();
    parts.sort();

    for part in parts {
        let reader = BufReader::new(File::open(&part).to_output_error(&part)?);
        for line in reader.lines() {
            let line = line.to_output_error(&part)?;
            let parsed = line
                .rsplit_once('\t')
                .and_then(|(word, count)| count.parse::<u64>().ok().map(|count| (word, count)));
            match parsed {
                Some((word, count)) => {
                    counts.insert(word.to_string(), count);
                }
                None => {
                    return Err(WordCountError::output(
                        ErrorCode::OUTPUT_GENERIC,
                        format!("malformed output line {:?}", line),
                        &part,
                    ))
                }
            }
        }
    }

    Ok(counts)
}

/// Writes `word<TAB>count` lines to one part file
pub struct PartFileSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl PartFileSink {
    pub fn create(dir: &Path, index: usize) -> Result<Self> {
        let path = dir.join(part_file_name(index));
        let file = File::create(&path).to_output_error(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for PartFileSink {
    fn write_pair(&mut self, pair: &WordCount) -> Result<()> {
        writeln!(self.writer, "{}", pair).to_output_error(&self.path)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().to_output_error(&self.path)
    }
}

/// Collects pairs in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub pairs: Vec<WordCount>,
    pub finished: bool,
}

impl OutputSink for MemorySink {
    fn write_pair(&mut self, pair: &WordCount) -> Result<()> {
        self.pairs.push(pair.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
