//! Property tests for the pure pipeline functions
//!
//! Verifies:
//! - Determinism: the same line and table always give the same pairs
//! - Identity: an empty table is plain whitespace tokenization
//! - Order independence of the summing reducer
//! - Repeating a line N times multiplies every count by N
//! - A rule rewrites its source on every line it appears in

use proptest::prelude::*;
use std::collections::BTreeMap;
use wordcount_replace::dictionary::{parse_line, ParsedLine, ReplacementRule};
use wordcount_replace::engine::partition_for;
use wordcount_replace::{aggregate, count_lines, transform_and_emit, ReplacementTable};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..12).prop_map(|words| words.join(" "))
}

fn rules() -> impl Strategy<Value = Vec<ReplacementRule>> {
    prop::collection::vec(
        (word(), word()).prop_map(|(source, target)| ReplacementRule::new(source, target)),
        0..5,
    )
}

proptest! {
    #[test]
    fn prop_empty_table_is_tokenization(line in "[a-z \\t]{0,40}") {
        let pairs = transform_and_emit(&line, &ReplacementTable::empty());
        let words: Vec<&str> = pairs.iter().map(|pair| pair.word.as_str()).collect();
        let expected: Vec<&str> = line.split_whitespace().collect();
        prop_assert_eq!(words, expected);
        prop_assert!(pairs.iter().all(|pair| pair.count == 1));
    }

    #[test]
    fn prop_transform_is_deterministic(line in line(), rules in rules()) {
        let table = ReplacementTable::from_rules(rules);
        let first = transform_and_emit(&line, &table);
        let second = transform_and_emit(&line, &table);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_table_is_not_consumed(lines in prop::collection::vec(line(), 1..6), rules in rules()) {
        let table = ReplacementTable::from_rules(rules);
        let before = table.len();
        let once = count_lines(&lines, &table);
        let again = count_lines(&lines, &table);
        prop_assert_eq!(table.len(), before);
        prop_assert_eq!(once, again);
    }

    #[test]
    fn prop_aggregate_ignores_order(mut counts in prop::collection::vec(0u64..1000, 0..50)) {
        let forward = aggregate("w", counts.clone());
        counts.reverse();
        let backward = aggregate("w", counts.clone());
        prop_assert_eq!(forward.count, counts.iter().sum::<u64>());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_repeated_line_scales_counts(line in line(), times in 1usize..8) {
        let table = ReplacementTable::empty();
        let single = count_lines([line.as_str()], &table);
        let repeated = count_lines(std::iter::repeat(line.as_str()).take(times), &table);

        let scaled: BTreeMap<String, u64> = single
            .into_iter()
            .map(|(word, count)| (word, count * times as u64))
            .collect();
        prop_assert_eq!(repeated, scaled);
    }

    #[test]
    fn prop_rule_rewrites_every_line(
        source in word(),
        target in "[A-Z]{1,6}",
        pads in prop::collection::vec(("[ \\t]{0,3}", "[ \\t]{0,3}"), 1..8),
    ) {
        let rule = ReplacementRule::new(source.clone(), target.clone());
        let table = ReplacementTable::from_rules([rule]);
        let lines: Vec<String> = pads
            .iter()
            .map(|(lead, trail)| format!("{lead}{source}{trail}"))
            .collect();

        let counts = count_lines(&lines, &table);
        prop_assert_eq!(counts, BTreeMap::from([(target, pads.len() as u64)]));
    }

    #[test]
    fn prop_total_count_matches_token_count(lines in prop::collection::vec(line(), 0..10)) {
        let counts = count_lines(&lines, &ReplacementTable::empty());
        let tokens: usize = lines.iter().map(|line| line.split_whitespace().count()).sum();
        prop_assert_eq!(counts.values().sum::<u64>(), tokens as u64);
    }

    #[test]
    fn prop_partition_in_range(word in "\\PC{0,20}", reducers in 1usize..16) {
        prop_assert!(partition_for(&word, reducers) < reducers);
    }

    #[test]
    fn prop_two_token_lines_parse(source in word(), target in word(), pad in "[ \\t]{0,3}") {
        let line = format!("{pad}{source}{pad} {target}{pad}");
        prop_assert_eq!(parse_line(&line), ParsedLine::Rule(ReplacementRule::new(source, target)));
    }
}
