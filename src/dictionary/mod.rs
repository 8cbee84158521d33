//! Replacement dictionary
//!
//! A dictionary is a plain text side-file with one `source target` pair per
//! line. Each worker loads its own [`ReplacementTable`] once, before it reads
//! any record, and only reads from it afterwards.

pub mod loader;
pub mod rule;
pub mod table;

pub use loader::{load, load_all, load_report, parse_rules, DictionaryLoad, ParsedRules};
pub use rule::{parse_line, LineProblem, ParseWarning, ParsedLine, ReplacementRule};
pub use table::ReplacementTable;
