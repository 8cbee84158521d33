//! Transform-and-count pipeline
//!
//! Pure per-record and per-key functions plus the per-worker mapper state.
//! The engine in [`crate::engine`] drives them.

pub mod mapper;
pub mod reducer;
pub mod types;

pub use mapper::{progress_message, transform_and_emit, MapperStats, WordCountMapper};
pub use reducer::{aggregate, SumReducer};
pub use types::WordCount;
