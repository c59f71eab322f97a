/// Upper bound on how many uploaded assets are sent to the model in one run.
pub const DEFAULT_SAMPLE_CAP: usize = 6;

/// Pick at most `cap` items from `batch`, uniformly at random and without replacement.
///
/// Batches that already fit are returned untouched, in their original order.
#[must_use]
pub fn sample_batch<T>(mut batch: Vec<T>, cap: usize, rng: &mut fastrand::Rng) -> Vec<T> {
    if batch.len() <= cap {
        return batch;
    }
    rng.shuffle(&mut batch);
    batch.truncate(cap);
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_small_batches_are_unchanged() {
        let mut rng = fastrand::Rng::with_seed(7);
        for len in 0..=DEFAULT_SAMPLE_CAP {
            let batch: Vec<usize> = (0..len).collect();
            assert_eq!(
                sample_batch(batch.clone(), DEFAULT_SAMPLE_CAP, &mut rng),
                batch
            );
        }
    }

    #[test]
    fn test_large_batches_are_capped_without_duplicates() {
        let mut rng = fastrand::Rng::with_seed(42);
        for len in [7, 10, 50] {
            let batch: Vec<usize> = (0..len).collect();
            let sample = sample_batch(batch, DEFAULT_SAMPLE_CAP, &mut rng);

            assert_eq!(sample.len(), DEFAULT_SAMPLE_CAP);
            assert!(sample.iter().all(|item| *item < len));
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), DEFAULT_SAMPLE_CAP);
        }
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let batch: Vec<String> = (0..20).map(|i| format!("asset_{i}.png")).collect();
        let first = sample_batch(batch.clone(), 3, &mut fastrand::Rng::with_seed(1234));
        let second = sample_batch(batch, 3, &mut fastrand::Rng::with_seed(1234));
        assert_eq!(first, second);
    }
}
