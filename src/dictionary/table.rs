//! Immutable replacement table applied to every input record

use super::rule::ReplacementRule;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone)]
struct CompiledRule {
    target: String,
    pattern: Regex,
    literal: bool,
}

/// Mapping of source patterns to replacement words
///
/// Sources are unanchored regular expressions, so `"ab"` also rewrites the
/// middle of `"cabin"`. A source that is not a valid pattern is matched as
/// literal text. Targets are always inserted literally.
///
/// Rules are applied in ascending order of their source, so every worker that
/// loads the same files rewrites a record identically. The table is never
/// modified by [`ReplacementTable::apply`].
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    rules: BTreeMap<String, CompiledRule>,
}

impl ReplacementTable {
    /// Table with no rules; applying it returns the line untouched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from rules in order; a later rule replaces an earlier
    /// one with the same source
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ReplacementRule>,
    {
        let mut latest: BTreeMap<String, String> = BTreeMap::new();
        for rule in rules {
            latest.insert(rule.source, rule.target);
        }

        let rules = latest
            .into_iter()
            .filter_map(|(source, target)| {
                compile(&source, target).map(|compiled| (source, compiled))
            })
            .collect();

        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replacement registered for `source`
    pub fn get(&self, source: &str) -> Option<&str> {
        self.rules.get(source).map(|rule| rule.target.as_str())
    }

    /// Rules in application order
    pub fn rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|(source, rule)| (source.as_str(), rule.target.as_str()))
    }

    /// Sources that were not valid patterns and are matched literally
    pub fn literal_sources(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.literal)
            .map(|(source, _)| source.as_str())
            .collect()
    }

    /// Rewrite every match of every rule in `line`
    ///
    /// Borrows the input when nothing matched.
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(line);
        for rule in self.rules.values() {
            let replaced = match rule.pattern.replace_all(&current, NoExpand(&rule.target)) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = replaced {
                current = Cow::Owned(rewritten);
            }
        }
        current
    }
}

fn compile(source: &str, target: String) -> Option<CompiledRule> {
    if source.is_empty() {
        warn!("Ignoring replacement rule with an empty source");
        return None;
    }

    match Regex::new(source) {
        Ok(pattern) => Some(CompiledRule {
            target,
            pattern,
            literal: false,
        }),
        Err(err) => {
            warn!(
                "Replacement source {:?} is not a valid pattern ({}), matching it literally",
                source, err
            );
            match Regex::new(&regex::escape(source)) {
                Ok(pattern) => Some(CompiledRule {
                    target,
                    pattern,
                    literal: true,
                }),
                Err(err) => {
                    warn!("Dropping replacement rule for {:?}: {}", source, err);
                    None
                }
            }
        }
    }
}
