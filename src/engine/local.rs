//! In-process job runner
//!
//! Runs the map phase on blocking threads of the tokio runtime, at most
//! `num_workers` at a time, then one reduce task per partition. Every map
//! worker configures its own [`WordCountMapper`], so nothing mutable is shared
//! between workers; their outputs and counters are merged once they finish.

use super::context::{drive_mapper, Mapper};
use super::counters::JobCounters;
use super::input::{list_input_files, plan_splits, InputSplit, LineRecordSource};
use super::output::{prepare_output_dir, write_success_marker, PartFileSink};
use super::shuffle::{group_by_partition, reduce_partition, MapOutput, MapOutputBuffer, Partition};
use super::status::TracingStatusReporter;
use crate::config::{JobConfig, DEFAULT_PROGRESS_INTERVAL};
use crate::dictionary::ReplacementTable;
use crate::error::{ErrorCode, Result, WordCountError};
use crate::pipeline::{aggregate, SumReducer, WordCountMapper};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a finished job reports
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job_id: String,
    pub job_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub splits: usize,
    pub counters: JobCounters,
    pub output_files: Vec<PathBuf>,
}

impl JobSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Output of one map worker
#[derive(Debug)]
struct MapTaskResult {
    split_id: usize,
    output: MapOutput,
    counters: JobCounters,
}

/// Runs a [`JobConfig`] against the local filesystem
#[derive(Debug, Clone)]
pub struct LocalJobRunner {
    config: Arc<JobConfig>,
}

impl LocalJobRunner {
    pub fn new(config: JobConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run the job to completion
    ///
    /// The output directory is created up front. If the job fails after that,
    /// whatever was written to it is removed again.
    pub async fn run(&self) -> Result<JobSummary> {
        self.config.validate()?;

        let job_id = format!("job_local_{}", Uuid::new_v4().simple());
        let started_at = Utc::now();
        info!(
            "Starting job {} ({}): {} -> {}",
            self.config.settings.job_name,
            job_id,
            self.config.input_path.display(),
            self.config.output_path.display()
        );

        let files = list_input_files(&self.config.input_path)?;
        prepare_output_dir(&self.config.output_path)?;

        match self.execute(&files).await {
            Ok((splits, counters, output_files)) => {
                let summary = JobSummary {
                    job_id,
                    job_name: self.config.settings.job_name.clone(),
                    started_at,
                    finished_at: Utc::now(),
                    splits,
                    counters,
                    output_files,
                };
                log_summary(&summary);
                Ok(summary)
            }
            Err(err) => {
                discard_output(&self.config.output_path);
                Err(err)
            }
        }
    }

    async fn execute(&self, files: &[PathBuf]) -> Result<(usize, JobCounters, Vec<PathBuf>)> {
        let splits = plan_splits(files, self.config.settings.lines_per_split)?;
        let split_count = splits.len();
        debug!("Planned {} splits over {} files", split_count, files.len());

        let results = self.map_phase(splits).await?;
        let mut counters: JobCounters = results.iter().map(|result| &result.counters).sum();

        let outputs = results.into_iter().map(|result| result.output).collect();
        let partitions = group_by_partition(outputs, self.config.settings.num_reducers);

        let (reduce_counters, output_files) = self.reduce_phase(partitions).await?;
        counters.merge(&reduce_counters);

        write_success_marker(&self.config.output_path)?;
        Ok((split_count, counters, output_files))
    }

    async fn map_phase(&self, splits: Vec<InputSplit>) -> Result<Vec<MapTaskResult>> {
        let semaphore = Arc::new(Semaphore::new(self.config.settings.num_workers));
        let mut tasks = JoinSet::new();

        for split in splits {
            tasks.spawn(run_map_worker(
                split,
                Arc::clone(&self.config),
                Arc::clone(&semaphore),
            ));
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            results.push(joined.map_err(|err| join_error(err, None))??);
        }

        results.sort_by_key(|result| result.split_id);
        Ok(results)
    }

    async fn reduce_phase(
        &self,
        partitions: Vec<Partition>,
    ) -> Result<(JobCounters, Vec<PathBuf>)> {
        let mut tasks = JoinSet::new();

        for (index, partition) in partitions.into_iter().enumerate() {
            let dir = self.config.output_path.clone();
            tasks.spawn_blocking(move || -> Result<(usize, PathBuf, JobCounters)> {
                let mut sink = PartFileSink::create(&dir, index)?;
                let counters = reduce_partition(partition, &SumReducer, &mut sink)?;
                Ok((index, sink.path().to_path_buf(), counters))
            });
        }

        let mut finished = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            finished.push(joined.map_err(|err| join_error(err, None))??);
        }
        finished.sort_by_key(|(index, _, _)| *index);

        let counters: JobCounters = finished.iter().map(|(_, _, counters)| counters).sum();
        let files = finished.into_iter().map(|(_, path, _)| path).collect();
        Ok((counters, files))
    }
}

async fn run_map_worker(
    split: InputSplit,
    config: Arc<JobConfig>,
    semaphore: Arc<Semaphore>,
) -> Result<MapTaskResult> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| WordCountError::execution("worker pool closed"))?;

    let worker_id = split.id;
    debug!(worker = worker_id, "Processing split {}", split.path.display());
    tokio::task::spawn_blocking(move || run_map_task(split, &config))
        .await
        .map_err(|err| join_error(err, Some(worker_id)))?
        .map_err(|err| err.with_context(format!("split {}", worker_id)))
}

/// Map one split: load the dictionaries, read every record, buffer the pairs
fn run_map_task(split: InputSplit, config: &JobConfig) -> Result<MapTaskResult> {
    let settings = &config.settings;
    let mut mapper = WordCountMapper::configure(
        &config.replacement_files,
        split.path.display().to_string(),
        settings.progress_interval,
    )?;
    let mut source = LineRecordSource::open(&split)?;
    let mut buffer = MapOutputBuffer::new(settings.num_reducers);
    let reporter = TracingStatusReporter::new(split.id);

    drive_mapper(&mut mapper, &mut source, &mut buffer, &reporter)?;

    let stats = mapper.finish();
    let mut counters = JobCounters {
        map_input_records: stats.records,
        map_output_records: stats.emitted,
        dictionary_rules: stats.dictionary_rules,
        dictionary_warnings: stats.dictionary_warnings,
        dictionary_literal_rules: stats.dictionary_literal_rules,
        ..JobCounters::default()
    };

    let output = if settings.combine {
        counters.combine_input_records = buffer.records();
        let output = buffer.combine(&SumReducer);
        counters.combine_output_records = output.records;
        output
    } else {
        buffer.into_output()
    };

    Ok(MapTaskResult {
        split_id: split.id,
        output,
        counters,
    })
}

fn join_error(err: JoinError, worker_id: Option<usize>) -> WordCountError {
    let worker = worker_id
        .map(|id| format!("worker {}", id))
        .unwrap_or_else(|| "task".to_string());
    if err.is_panic() {
        WordCountError::execution_with_code(
            ErrorCode::EXEC_WORKER_PANICKED,
            format!("{} panicked", worker),
            worker_id,
        )
    } else {
        WordCountError::execution_with_code(
            ErrorCode::EXEC_WORKER_CANCELLED,
            format!("{} was cancelled", worker),
            worker_id,
        )
    }
}

/// Best-effort removal of a partial job output
pub fn discard_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_dir_all(path) {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(err) => warn!("Could not remove partial output {}: {}", path.display(), err),
    }
}

fn log_summary(summary: &JobSummary) {
    let counters = &summary.counters;
    info!(
        "Job {} completed in {} ms over {} splits",
        summary.job_id,
        summary.duration().num_milliseconds(),
        summary.splits
    );
    info!(
        map_input_records = counters.map_input_records,
        map_output_records = counters.map_output_records,
        combine_input_records = counters.combine_input_records,
        combine_output_records = counters.combine_output_records,
        reduce_input_groups = counters.reduce_input_groups,
        reduce_output_records = counters.reduce_output_records,
        dictionary_rules = counters.dictionary_rules,
        dictionary_warnings = counters.dictionary_warnings,
        dictionary_literal_rules = counters.dictionary_literal_rules,
        "Job counters"
    );
}

/// Count the words of `lines` after applying `table`, entirely in memory
///
/// Same map, combine and reduce functions as a full job, with a single
/// worker and a single partition.
pub fn count_lines<I, S>(lines: I, table: &ReplacementTable) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mapper = WordCountMapper::new(table.clone(), "memory", DEFAULT_PROGRESS_INTERVAL);
    let mut buffer = MapOutputBuffer::new(1);
    let reporter = TracingStatusReporter::new(0);

    for line in lines {
        mapper.map(line.as_ref(), &mut buffer, &reporter);
    }

    group_by_partition(vec![buffer.combine(&SumReducer)], 1)
        .into_iter()
        .flatten()
        .map(|(word, counts)| {
            let pair = aggregate(word, counts);
            (pair.word, pair.count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JobSettings;
    use crate::dictionary::ReplacementRule;
    use crate::engine::output::{read_part_files, SUCCESS_MARKER};
    use std::fs;
    use tempfile::TempDir;

    fn table(pairs: &[(&str, &str)]) -> ReplacementTable {
        ReplacementTable::from_rules(
            pairs
                .iter()
                .map(|(source, target)| ReplacementRule::new(*source, *target)),
        )
    }

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    fn settings(workers: usize, reducers: usize) -> JobSettings {
        JobSettings {
            num_workers: workers,
            num_reducers: reducers,
            ..JobSettings::default()
        }
    }

    #[test]
    fn test_count_lines_with_replacement() {
        let result = count_lines(["foo bar", "bar baz"], &table(&[("bar", "qux")]));
        assert_eq!(result, counts(&[("baz", 1), ("foo", 1), ("qux", 2)]));
    }

    #[test]
    fn test_count_lines_without_dictionary() {
        let result = count_lines(["a a  b"], &ReplacementTable::empty());
        assert_eq!(result, counts(&[("a", 2), ("b", 1)]));
    }

    #[test]
    fn test_count_lines_replaces_inside_words() {
        let result = count_lines(["cat category"], &table(&[("cat", "dog")]));
        assert_eq!(result, counts(&[("dog", 1), ("dogegory", 1)]));
    }

    #[test]
    fn test_count_lines_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(count_lines(lines, &ReplacementTable::empty()).is_empty());
    }

    #[test]
    fn test_count_lines_target_may_split_tokens() {
        let result = count_lines(["a-b"], &table(&[("-", " ")]));
        assert_eq!(result, counts(&[("a", 1), ("b", 1)]));
    }

    #[tokio::test]
    async fn test_run_single_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let dictionary = dir.path().join("dict.txt");
        let output = dir.path().join("out");
        fs::write(&input, "foo bar\nbar baz\n").unwrap();
        fs::write(&dictionary, "bar qux\n").unwrap();

        let config = JobConfig::new(&input, &output)
            .with_replacement_file(&dictionary)
            .with_settings(settings(2, 1));
        let summary = LocalJobRunner::new(config).run().await.unwrap();

        assert_eq!(
            fs::read_to_string(output.join("part-00000")).unwrap(),
            "baz\t1\nfoo\t1\nqux\t2\n"
        );
        assert!(output.join(SUCCESS_MARKER).exists());
        assert_eq!(summary.splits, 1);
        assert_eq!(summary.counters.map_input_records, 2);
        assert_eq!(summary.counters.map_output_records, 4);
        assert_eq!(summary.counters.reduce_output_records, 3);
        assert_eq!(summary.counters.dictionary_rules, 1);
        assert_eq!(summary.output_files, vec![output.join("part-00000")]);
        assert!(summary.job_id.starts_with("job_local_"));
    }

    #[tokio::test]
    async fn test_run_directory_with_splits_and_reducers() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("a.txt"), "x y\nx\nz x\n").unwrap();
        fs::write(input.join("b.txt"), "y y\n").unwrap();
        fs::write(input.join("_ignored"), "ignored\n").unwrap();
        fs::write(input.join(".hidden"), "hidden\n").unwrap();

        let config = JobConfig::new(&input, &output).with_settings(JobSettings {
            lines_per_split: Some(2),
            ..settings(3, 3)
        });
        let summary = LocalJobRunner::new(config).run().await.unwrap();

        assert_eq!(summary.splits, 3);
        assert_eq!(summary.output_files.len(), 3);
        assert_eq!(
            read_part_files(&output).unwrap(),
            counts(&[("x", 3), ("y", 3), ("z", 1)])
        );
    }

    #[tokio::test]
    async fn test_run_without_combiner() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("out");
        fs::write(&input, "a a a\n").unwrap();

        let config = JobConfig::new(&input, &output).with_settings(JobSettings {
            combine: false,
            ..settings(1, 1)
        });
        let summary = LocalJobRunner::new(config).run().await.unwrap();

        assert_eq!(summary.counters.combine_input_records, 0);
        assert_eq!(summary.counters.reduce_input_records, 3);
        assert_eq!(read_part_files(&output).unwrap(), counts(&[("a", 3)]));
    }

    #[tokio::test]
    async fn test_run_rejects_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        fs::write(&input, "a\n").unwrap();
        let output = dir.path().join("out");
        fs::create_dir(&output).unwrap();

        let err = LocalJobRunner::new(JobConfig::new(&input, &output))
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OUTPUT_ALREADY_EXISTS);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_missing_dictionary_removes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("out");
        fs::write(&input, "a\n").unwrap();

        let config = JobConfig::new(&input, &output)
            .with_replacement_file(dir.path().join("missing.txt"))
            .with_settings(settings(1, 1));
        let err = LocalJobRunner::new(config).run().await.unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().ends_with(": split 0"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out");
        let err = LocalJobRunner::new(JobConfig::new(dir.path().join("nope"), &output))
            .run()
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::INPUT_NOT_FOUND);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_empty_input_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir(&input).unwrap();

        let config = JobConfig::new(&input, &output).with_settings(settings(1, 1));
        let summary = LocalJobRunner::new(config).run().await.unwrap();

        assert_eq!(summary.splits, 0);
        assert_eq!(fs::read_to_string(output.join("part-00000")).unwrap(), "");
        assert!(output.join(SUCCESS_MARKER).exists());
    }

    #[test]
    fn test_join_error_codes() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let err = runtime.block_on(async {
            tokio::spawn(async { panic!("boom") }).await.unwrap_err()
        });
        let mapped = join_error(err, Some(4));
        assert_eq!(mapped.code(), ErrorCode::EXEC_WORKER_PANICKED);
        assert_eq!(mapped.exit_code(), 6);
    }
}
