//! Reading replacement dictionaries from disk

use super::rule::{parse_line, LineProblem, ParseWarning, ParsedLine, ReplacementRule};
use super::table::ReplacementTable;
use crate::engine::input::strip_line_ending;
use crate::error::{ErrorCode, ErrorExt, Result, WordCountError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of loading one or more dictionary files
#[derive(Debug, Clone)]
pub struct DictionaryLoad {
    pub table: ReplacementTable,
    pub warnings: Vec<ParseWarning>,
    /// Well-formed rules read, including ones later overridden
    pub rules_read: usize,
}

/// Rules and warnings parsed from one reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    pub rules: Vec<ReplacementRule>,
    pub warnings: Vec<ParseWarning>,
}

/// Parse every line of `reader` as a `source target` rule
///
/// `path` is only used to label warnings. A line that is not valid UTF-8 is
/// skipped with a warning like any other malformed line.
pub fn parse_rules<R: BufRead>(mut reader: R, path: &Path) -> io::Result<ParsedRules> {
    let mut parsed = ParsedRules::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(parsed);
        }
        line_number += 1;
        strip_line_ending(&mut buf);

        let problem = match std::str::from_utf8(&buf) {
            Ok(line) => match parse_line(line) {
                ParsedLine::Rule(rule) => {
                    parsed.rules.push(rule);
                    continue;
                }
                ParsedLine::Blank => continue,
                ParsedLine::Malformed { tokens } => LineProblem::TokenCount { tokens },
            },
            Err(_) => LineProblem::InvalidUtf8,
        };

        parsed.warnings.push(ParseWarning {
            path: path.to_path_buf(),
            line_number,
            line: String::from_utf8_lossy(&buf).into_owned(),
            problem,
        });
    }
}

/// Load a dictionary file into a table, logging malformed lines
pub fn load(path: &Path) -> Result<ReplacementTable> {
    load_report(path).map(|load| load.table)
}

/// Load a dictionary file and keep the warnings it produced
pub fn load_report(path: &Path) -> Result<DictionaryLoad> {
    load_all(&[path.to_path_buf()])
}

/// Load several dictionary files; rules from later files override earlier ones
pub fn load_all(paths: &[PathBuf]) -> Result<DictionaryLoad> {
    let mut rules = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        let parsed = read_file(path)?;
        for warning in &parsed.warnings {
            warn!("{}", warning);
        }
        debug!(
            "Read {} rules from replacement file {}",
            parsed.rules.len(),
            path.display()
        );
        rules.extend(parsed.rules);
        warnings.extend(parsed.warnings);
    }

    let rules_read = rules.len();
    let table = ReplacementTable::from_rules(rules);

    Ok(DictionaryLoad {
        table,
        warnings,
        rules_read,
    })
}

fn read_file(path: &Path) -> Result<ParsedRules> {
    let file = File::open(path).map_err(|e| {
        let code = if e.kind() == io::ErrorKind::NotFound {
            ErrorCode::DICTIONARY_NOT_FOUND
        } else {
            ErrorCode::DICTIONARY_READ_FAILED
        };
        WordCountError::dictionary(code, "cannot open replacement file", path).with_source(e)
    })?;

    parse_rules(BufReader::new(file), path).to_dictionary_error(path)
}
