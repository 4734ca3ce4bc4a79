use rand::Rng;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

/// Shuffles a copy of `data` and cuts it into two disjoint parts of
/// `floor(k·fraction)` and `floor(k·(1-fraction))` samples.
///
/// At `fraction = 0.5` both halves hold `floor(k/2)` samples and, for odd
/// `k`, the leftover sample belongs to neither half. The input dataset is
/// never mutated. Fails with `DatasetTooSmall` when either part would be
/// empty.
pub fn split<R: Rng>(data: &Dataset, fraction: f64, rng: &mut R) -> Result<(Dataset, Dataset)> {
    let k = data.len();
    let a_len = (k as f64 * fraction).floor() as usize;
    let b_len = (k as f64 * (1.0 - fraction)).floor() as usize;
    if a_len == 0 || b_len == 0 {
        return Err(Error::DatasetTooSmall { len: k });
    }

    let mut shuffled = data.clone();
    shuffled.shuffle(rng);
    Ok((shuffled.subset(0, a_len), shuffled.subset(a_len, b_len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Sample;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(k: usize) -> Dataset {
        let samples = (0..k)
            .map(|i| Sample {
                input: vec![i as f64],
                target: vec![0.0],
            })
            .collect();
        Dataset::from_samples(samples).unwrap()
    }

    fn ids(data: &Dataset) -> Vec<usize> {
        data.samples().iter().map(|s| s.input[0] as usize).collect()
    }

    #[test]
    fn even_half_split_is_disjoint_and_covering() {
        let data = numbered(10);
        let mut rng = StdRng::seed_from_u64(1);
        let (a, b) = split(&data, 0.5, &mut rng).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 5);

        let mut all: Vec<usize> = ids(&a).into_iter().chain(ids(&b)).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 10, "halves must be disjoint");
        assert!(all.iter().all(|&i| i < 10));
    }

    #[test]
    fn odd_half_split_drops_one_sample() {
        let data = numbered(7);
        let mut rng = StdRng::seed_from_u64(2);
        let (a, b) = split(&data, 0.5, &mut rng).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);

        let mut all: Vec<usize> = ids(&a).into_iter().chain(ids(&b)).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn original_dataset_is_untouched() {
        let data = numbered(8);
        let before = ids(&data);
        let mut rng = StdRng::seed_from_u64(3);
        let _ = split(&data, 0.5, &mut rng).unwrap();
        assert_eq!(ids(&data), before);
    }

    #[test]
    fn rejects_datasets_too_small_to_split() {
        let mut rng = StdRng::seed_from_u64(4);
        let one = numbered(1);
        assert!(matches!(
            split(&one, 0.5, &mut rng),
            Err(Error::DatasetTooSmall { len: 1 })
        ));
    }

    #[test]
    fn uneven_fraction_sizes_floor_on_both_sides() {
        let data = numbered(10);
        let mut rng = StdRng::seed_from_u64(5);
        let (a, b) = split(&data, 0.3, &mut rng).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 7);
    }
}
