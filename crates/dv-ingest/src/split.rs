//! Train/test splitting of a source dataset.

use polars::prelude::{DataFrame, IdxCa, IdxSize};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Fraction of rows held out for the test split when none is configured.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Seed used for the row shuffle when none is configured.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of rows assigned to the test split, in (0, 1).
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

/// Shuffles rows with a seeded RNG and splits them into `(train, test)`.
///
/// The test split gets `ceil(rows * test_ratio)` rows. Both splits must end up
/// non-empty. The same seed always yields the same split.
pub fn train_test_split(df: &DataFrame, options: SplitOptions) -> Result<(DataFrame, DataFrame)> {
    let ratio = options.test_ratio;
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(IngestError::InvalidSplitRatio { ratio });
    }

    let rows = df.height();
    let test_rows = (rows as f64 * ratio).ceil() as usize;
    if test_rows == 0 || test_rows >= rows {
        return Err(IngestError::SplitTooSmall { rows, ratio });
    }

    let mut indices: Vec<IdxSize> = (0..rows as IdxSize).collect();
    let mut rng = StdRng::seed_from_u64(options.seed);
    indices.shuffle(&mut rng);
    let train_indices = indices.split_off(test_rows);

    let test = df.take(&IdxCa::from_vec("index".into(), indices))?;
    let train = df.take(&IdxCa::from_vec("index".into(), train_indices))?;

    debug!(
        rows,
        train_rows = train.height(),
        test_rows = test.height(),
        seed = options.seed,
        "split dataset"
    );
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn frame(rows: i64) -> DataFrame {
        DataFrame::new(vec![
            Series::new("id".into(), (0..rows).collect::<Vec<_>>()).into(),
        ])
        .unwrap()
    }

    fn ids(df: &DataFrame) -> Vec<i64> {
        df.column("id")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(&frame(10), SplitOptions::default()).unwrap();
        assert_eq!(train.height(), 8);
        assert_eq!(test.height(), 2);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let options = SplitOptions {
            test_ratio: 0.25,
            seed: 7,
        };
        let (train, test) = train_test_split(&frame(5), options).unwrap();
        assert_eq!(test.height(), 2);
        assert_eq!(train.height(), 3);
    }

    #[test]
    fn test_split_is_partition() {
        let (train, test) = train_test_split(&frame(50), SplitOptions::default()).unwrap();
        let mut all = ids(&train);
        all.extend(ids(&test));
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let options = SplitOptions {
            test_ratio: 0.3,
            seed: 11,
        };
        let (_, first) = train_test_split(&frame(40), options).unwrap();
        let (_, second) = train_test_split(&frame(40), options).unwrap();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_invalid_ratio() {
        for ratio in [0.0, 1.0, -0.5, f64::NAN] {
            let options = SplitOptions {
                test_ratio: ratio,
                seed: 1,
            };
            let err = train_test_split(&frame(10), options).unwrap_err();
            assert!(matches!(err, IngestError::InvalidSplitRatio { .. }));
        }
    }

    #[test]
    fn test_too_small_to_split() {
        let err = train_test_split(&frame(1), SplitOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::SplitTooSmall { rows: 1, .. }));
    }
}
