//! Capabilities the pipeline needs from whatever runs it
//!
//! A worker only ever reads records, emits pairs and reports status; a
//! reducer only reads the grouped values of one key and writes a pair. Any
//! batch engine, or a plain in-process loop, can provide these.

use crate::error::Result;
use crate::pipeline::WordCount;

/// Supplies input records to a map worker, one line at a time
pub trait RecordSource {
    /// Next record, or `None` once the split is exhausted
    fn next_record(&mut self) -> Result<Option<String>>;

    /// Name used in progress messages (usually the input file path)
    fn source_name(&self) -> &str;
}

/// Receives the key/value pairs produced by a mapper
pub trait Emitter {
    fn emit(&mut self, word: String, count: u64);
}

/// Progress channel back to the engine; informational only
pub trait StatusReporter: Send + Sync {
    fn set_status(&self, status: &str);
}

/// Per-record map function with worker-local state
pub trait Mapper: Send {
    fn map(&mut self, record: &str, emitter: &mut dyn Emitter, reporter: &dyn StatusReporter);
}

/// Per-key reduce function over the grouped values of that key
pub trait Reducer: Send + Sync {
    fn reduce(&self, word: &str, counts: &mut dyn Iterator<Item = u64>) -> WordCount;
}

/// Destination for final `(word, count)` pairs
pub trait OutputSink {
    fn write_pair(&mut self, pair: &WordCount) -> Result<()>;

    /// Flush anything buffered; called once after the last pair
    fn finish(&mut self) -> Result<()>;
}

impl Emitter for Vec<WordCount> {
    fn emit(&mut self, word: String, count: u64) {
        self.push(WordCount::new(word, count));
    }
}

/// Feed every record of `source` through `mapper`
///
/// Returns the number of records read.
pub fn drive_mapper(
    mapper: &mut dyn Mapper,
    source: &mut dyn RecordSource,
    emitter: &mut dyn Emitter,
    reporter: &dyn StatusReporter,
) -> Result<u64> {
    let mut records = 0;
    while let Some(record) = source.next_record()? {
        mapper.map(&record, emitter, reporter);
        records += 1;
    }
    Ok(records)
}
