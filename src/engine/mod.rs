//! Local batch engine
//!
//! Provides the record sources, emitters, sinks and status reporting the
//! word count pipeline runs against, plus a runner that executes a whole job
//! on this machine: split planning, concurrent map workers, combining,
//! partitioning by key hash, reducing and writing `part-*` files.

pub mod context;
pub mod counters;
pub mod input;
pub mod local;
pub mod output;
pub mod partition;
pub mod shuffle;
pub mod status;

pub use context::{
    drive_mapper, Emitter, Mapper, OutputSink, RecordSource, Reducer, StatusReporter,
};
pub use counters::JobCounters;
pub use input::{list_input_files, plan_splits, InputSplit, LineRecordSource, MemoryRecordSource};
pub use local::{count_lines, discard_output, JobSummary, LocalJobRunner};
pub use output::{
    part_file_name, prepare_output_dir, read_part_files, write_success_marker, MemorySink,
    PartFileSink, SUCCESS_MARKER,
};
pub use partition::partition_for;
pub use shuffle::{group_by_partition, reduce_partition, MapOutput, MapOutputBuffer, Partition};
pub use status::{RecordingStatusReporter, TracingStatusReporter};
