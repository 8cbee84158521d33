//! Reduce side of the word count

use super::types::WordCount;
use crate::engine::context::Reducer;

/// Sum every partial count grouped under `word`
///
/// Order of `counts` does not matter. The sum saturates at `u64::MAX`.
pub fn aggregate<I>(word: impl Into<String>, counts: I) -> WordCount
where
    I: IntoIterator<Item = u64>,
{
    let count = counts.into_iter().fold(0u64, u64::saturating_add);
    WordCount::new(word, count)
}

/// Reducer that sums counts; also used as the map-side combiner
#[derive(Debug, Clone, Copy, Default)]
pub struct SumReducer;

impl Reducer for SumReducer {
    fn reduce(&self, word: &str, counts: &mut dyn Iterator<Item = u64>) -> WordCount {
        aggregate(word, counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_sums() {
        assert_eq!(aggregate("qux", vec![1, 1, 3]), WordCount::new("qux", 5));
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        assert_eq!(aggregate("none", Vec::new()), WordCount::new("none", 0));
    }

    #[test]
    fn test_aggregate_saturates() {
        assert_eq!(aggregate("big", vec![u64::MAX, 1]).count, u64::MAX);
    }

    #[test]
    fn test_sum_reducer_consumes_iterator() {
        let mut counts = vec![2u64, 2, 2].into_iter();
        let pair = SumReducer.reduce("w", &mut counts);
        assert_eq!(pair, WordCount::new("w", 6));
        assert_eq!(counts.next(), None);
    }
}
