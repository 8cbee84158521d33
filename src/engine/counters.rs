use serde::{Deserialize, Serialize};

/// Job-wide counters, summed over every worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounters {
    pub map_input_records: u64,
    pub map_output_records: u64,
    pub combine_input_records: u64,
    pub combine_output_records: u64,
    pub reduce_input_groups: u64,
    pub reduce_input_records: u64,
    pub reduce_output_records: u64,
    /// Rules loaded, counted once per worker
    pub dictionary_rules: u64,
    /// Malformed dictionary lines, counted once per worker
    pub dictionary_warnings: u64,
    /// Rules whose source was not a valid pattern, counted once per worker
    pub dictionary_literal_rules: u64,
}

impl JobCounters {
    pub fn merge(&mut self, other: &JobCounters) {
        self.map_input_records += other.map_input_records;
        self.map_output_records += other.map_output_records;
        self.combine_input_records += other.combine_input_records;
        self.combine_output_records += other.combine_output_records;
        self.reduce_input_groups += other.reduce_input_groups;
        self.reduce_input_records += other.reduce_input_records;
        self.reduce_output_records += other.reduce_output_records;
        self.dictionary_rules += other.dictionary_rules;
        self.dictionary_warnings += other.dictionary_warnings;
        self.dictionary_literal_rules += other.dictionary_literal_rules;
    }
}

impl<'a> std::iter::Sum<&'a JobCounters> for JobCounters {
    fn sum<I: Iterator<Item = &'a JobCounters>>(iter: I) -> Self {
        iter.fold(JobCounters::default(), |mut total, counters| {
            total.merge(counters);
            total
        })
    }
}
