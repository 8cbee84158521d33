//! Map output buffering, combining and grouping by reducer

use super::context::{Emitter, OutputSink, Reducer};
use super::counters::JobCounters;
use super::partition::partition_for;
use crate::error::Result;
use std::collections::BTreeMap;

/// Values grouped per word, keys in ascending byte order
pub type Partition = BTreeMap<String, Vec<u64>>;

/// Collects one worker's emitted pairs, already split by reducer
#[derive(Debug, Clone)]
pub struct MapOutputBuffer {
    partitions: Vec<Partition>,
    records: u64,
}

impl MapOutputBuffer {
    pub fn new(num_partitions: usize) -> Self {
        Self {
            partitions: vec![Partition::new(); num_partitions.max(1)],
            records: 0,
        }
    }

    /// Pairs emitted so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Hand the buffered pairs over unchanged
    pub fn into_output(self) -> MapOutput {
        MapOutput {
            partitions: self.partitions,
            records: self.records,
        }
    }

    /// Reduce each word's values to one value before the shuffle
    pub fn combine(self, combiner: &dyn Reducer) -> MapOutput {
        let mut records = 0;
        let partitions: Vec<Partition> = self
            .partitions
            .into_iter()
            .map(|partition| {
                partition
                    .into_iter()
                    .map(|(word, counts)| {
                        let combined = combiner.reduce(&word, &mut counts.into_iter());
                        records += 1;
                        (word, vec![combined.count])
                    })
                    .collect::<Partition>()
            })
            .collect();

        MapOutput {
            partitions,
            records,
        }
    }
}

impl Emitter for MapOutputBuffer {
    fn emit(&mut self, word: String, count: u64) {
        let index = partition_for(&word, self.partitions.len());
        self.partitions[index].entry(word).or_default().push(count);
        self.records += 1;
    }
}

/// What one worker hands to the shuffle
#[derive(Debug, Clone, Default)]
pub struct MapOutput {
    pub partitions: Vec<Partition>,
    /// Pairs in `partitions` (after combining, if any)
    pub records: u64,
}

/// Merge the partitions of every worker, keeping per-reducer grouping
///
/// Outputs are merged in the order given, so values of a word appear in
/// worker order.
pub fn group_by_partition(outputs: Vec<MapOutput>, num_partitions: usize) -> Vec<Partition> {
    let mut grouped = vec![Partition::new(); num_partitions.max(1)];
    let last = grouped.len() - 1;
    for output in outputs {
        for (index, partition) in output.partitions.into_iter().enumerate() {
            let target = &mut grouped[index.min(last)];
            for (word, counts) in partition {
                target.entry(word).or_default().extend(counts);
            }
        }
    }
    grouped
}

/// Run `reducer` over every word of `partition`, writing to `sink`
pub fn reduce_partition(
    partition: Partition,
    reducer: &dyn Reducer,
    sink: &mut dyn OutputSink,
) -> Result<JobCounters> {
    let mut counters = JobCounters::default();
    for (word, counts) in partition {
        counters.reduce_input_groups += 1;
        counters.reduce_input_records += counts.len() as u64;
        let pair = reducer.reduce(&word, &mut counts.into_iter());
        sink.write_pair(&pair)?;
        counters.reduce_output_records += 1;
    }
    sink.finish()?;
    Ok(counters)
}
