/// Reducer index for `word`
///
/// Uses a 31-multiplier string hash so a word always lands in the same
/// partition, across workers and across runs.
pub fn partition_for(word: &str, num_partitions: usize) -> usize {
    if num_partitions <= 1 {
        return 0;
    }
    let hash = word
        .bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(u32::from(byte)));
    hash as usize % num_partitions
}
