//! Map side of the word count: substitution, tokenization and emission

use super::types::WordCount;
use crate::dictionary::{self, ReplacementTable};
use crate::engine::context::{Emitter, Mapper, StatusReporter};
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Apply `table` to `line`, split on whitespace and emit `(token, 1)` per token
///
/// Tokens are returned in the order they appear in the rewritten line. The
/// table is only read, so calling this twice with the same arguments gives
/// the same result.
pub fn transform_and_emit(line: &str, table: &ReplacementTable) -> Vec<WordCount> {
    table
        .apply(line)
        .split_whitespace()
        .map(WordCount::one)
        .collect()
}

/// Status line reported every `progress_interval` records
pub fn progress_message(records: u64, input_file: &str) -> String {
    format!(
        "Finished processing {} records from the input file: {}",
        records, input_file
    )
}

/// Per-worker statistics returned by [`WordCountMapper::finish`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MapperStats {
    pub records: u64,
    pub emitted: u64,
    pub dictionary_rules: u64,
    pub dictionary_warnings: u64,
    pub dictionary_literal_rules: u64,
}

/// One map worker
///
/// Owns its replacement table for its whole lifetime and never shares it.
/// The record counter starts at zero for every new worker.
#[derive(Debug)]
pub struct WordCountMapper {
    table: ReplacementTable,
    input_file: String,
    progress_interval: u64,
    stats: MapperStats,
}

impl WordCountMapper {
    pub fn new(
        table: ReplacementTable,
        input_file: impl Into<String>,
        progress_interval: u64,
    ) -> Self {
        let stats = MapperStats {
            dictionary_rules: table.len() as u64,
            dictionary_literal_rules: table.literal_sources().len() as u64,
            ..MapperStats::default()
        };
        Self {
            table,
            input_file: input_file.into(),
            progress_interval: progress_interval.max(1),
            stats,
        }
    }

    /// Initialize a worker, loading its own table from `replacement_files`
    ///
    /// With no replacement files the worker counts words unchanged.
    pub fn configure(
        replacement_files: &[PathBuf],
        input_file: impl Into<String>,
        progress_interval: u64,
    ) -> Result<Self> {
        if replacement_files.is_empty() {
            return Ok(Self::new(ReplacementTable::empty(), input_file, progress_interval));
        }

        let load = dictionary::load_all(replacement_files)?;
        debug!(
            "Worker loaded {} replacement rules ({} warnings)",
            load.table.len(),
            load.warnings.len()
        );

        let mut mapper = Self::new(load.table, input_file, progress_interval);
        mapper.stats.dictionary_warnings = load.warnings.len() as u64;
        Ok(mapper)
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    pub fn records(&self) -> u64 {
        self.stats.records
    }

    /// End of stream; hand back what this worker did
    pub fn finish(self) -> MapperStats {
        self.stats
    }
}

impl Mapper for WordCountMapper {
    fn map(&mut self, record: &str, emitter: &mut dyn Emitter, reporter: &dyn StatusReporter) {
        for pair in transform_and_emit(record, &self.table) {
            emitter.emit(pair.word, pair.count);
            self.stats.emitted += 1;
        }

        self.stats.records += 1;
        if self.stats.records % self.progress_interval == 0 {
            reporter.set_status(&progress_message(self.stats.records, &self.input_file));
        }
    }
}
