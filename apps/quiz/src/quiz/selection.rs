//! Balanced Selector: draws an equal number of questions per dimension.
//!
//! Randomness comes from a single `StdRng` seeded by the caller, so a stored
//! seed reproduces the exact quiz instance (same questions, same order).

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::errors::QuizError;
use crate::models::{Dimension, Question};

/// Quiz sizes offered to test-takers. Each is divisible by the number of dimensions.
pub const ALLOWED_TOTALS: [usize; 3] = [20, 40, 60];

/// Selects `total` questions, `total / 4` per dimension, then shuffles the combined set.
///
/// Algorithm:
/// 1. Reject any `total` not in `ALLOWED_TOTALS`
/// 2. Bucket the pool by dimension (unknown dimension codes are dropped)
/// 3. Per dimension in canonical order, sample without replacement
/// 4. Shuffle the concatenation so dimension order is not revealed
///
/// `seed = None` draws from OS entropy (non-reproducible).
pub fn select_balanced(
    questions: &[Question],
    total: usize,
    seed: Option<u64>,
) -> Result<Vec<Question>, QuizError> {
    if !ALLOWED_TOTALS.contains(&total) {
        return Err(QuizError::InvalidParameter(format!(
            "Invalid total={total}; expected one of 20/40/60"
        )));
    }

    let per_dim = total / Dimension::ALL.len();
    let buckets = bucket_by_dimension(questions);

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut picked: Vec<Question> = Vec::with_capacity(total);
    for dim in Dimension::ALL {
        let pool = &buckets[&dim];
        if pool.len() < per_dim {
            return Err(QuizError::InsufficientPool {
                dimension: dim.code().to_string(),
                need: per_dim,
                have: pool.len(),
            });
        }
        picked.extend(pool.choose_multiple(&mut rng, per_dim).map(|q| (*q).clone()));
    }

    picked.shuffle(&mut rng);

    debug!(total, per_dim, pool = questions.len(), ?seed, "Balanced selection complete");
    Ok(picked)
}

/// Number of candidate questions per known dimension (zero entries included).
pub fn dimension_counts(questions: &[Question]) -> BTreeMap<Dimension, usize> {
    bucket_by_dimension(questions)
        .into_iter()
        .map(|(dim, bucket)| (dim, bucket.len()))
        .collect()
}

/// Largest allowed quiz size the pool can satisfy, or `None` if even the smallest can't be drawn.
pub fn max_balanced_total(questions: &[Question]) -> Option<usize> {
    let smallest = dimension_counts(questions)
        .into_values()
        .min()
        .unwrap_or(0);
    ALLOWED_TOTALS
        .iter()
        .copied()
        .filter(|total| total / Dimension::ALL.len() <= smallest)
        .max()
}

fn bucket_by_dimension(questions: &[Question]) -> BTreeMap<Dimension, Vec<&Question>> {
    let mut buckets: BTreeMap<Dimension, Vec<&Question>> =
        Dimension::ALL.into_iter().map(|d| (d, Vec::new())).collect();
    for q in questions {
        if let Some(dim) = q.parsed_dimension() {
            if let Some(bucket) = buckets.get_mut(&dim) {
                bucket.push(q);
            }
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pool(per_dim: usize) -> Vec<Question> {
        let mut questions = Vec::new();
        for dim in ["EI", "SN", "TF", "JP"] {
            for i in 0..per_dim {
                let pole = dim.chars().next().unwrap();
                questions.push(Question::new(format!("{dim}-{i}"), dim, pole, ""));
            }
        }
        questions
    }

    fn count_by_dim(picked: &[Question]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for q in picked {
            *counts.entry(q.dimension.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_balanced_counts_for_every_allowed_total() {
        let pool = make_pool(30);
        for total in ALLOWED_TOTALS {
            let picked = select_balanced(&pool, total, Some(1)).unwrap();
            assert_eq!(picked.len(), total);
            let counts = count_by_dim(&picked);
            assert_eq!(counts.len(), 4);
            assert!(counts.values().all(|&c| c == total / 4), "counts {counts:?}");
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let pool = make_pool(30);
        let a = select_balanced(&pool, 40, Some(42)).unwrap();
        let b = select_balanced(&pool, 40, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let pool = make_pool(30);
        let a = select_balanced(&pool, 40, Some(1)).unwrap();
        let b = select_balanced(&pool, 40, Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_no_duplicates_in_draw() {
        let pool = make_pool(15);
        let picked = select_balanced(&pool, 60, Some(7)).unwrap();
        let ids: std::collections::HashSet<_> = picked.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), 60);
    }

    #[test]
    fn test_rejects_invalid_total() {
        let pool = make_pool(30);
        let err = select_balanced(&pool, 10, Some(1)).unwrap_err();
        assert!(matches!(err, QuizError::InvalidParameter(_)));
        assert!(err.to_string().to_lowercase().contains("total"));
    }

    #[test]
    fn test_insufficient_pool_names_dimension() {
        let pool: Vec<_> = (0..10)
            .map(|i| Question::new(format!("{i}"), "EI", 'E', ""))
            .collect();
        let err = select_balanced(&pool, 20, Some(1)).unwrap_err();
        match err {
            QuizError::InsufficientPool {
                dimension,
                need,
                have,
            } => {
                assert_eq!(dimension, "SN");
                assert_eq!(need, 5);
                assert_eq!(have, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dimensions_dropped() {
        let mut pool = make_pool(5);
        pool.push(Question::new("x-1", "XY", 'X', ""));
        let picked = select_balanced(&pool, 20, Some(3)).unwrap();
        assert!(picked.iter().all(|q| q.dimension != "XY"));
    }

    #[test]
    fn test_max_balanced_total() {
        assert_eq!(max_balanced_total(&make_pool(15)), Some(60));
        assert_eq!(max_balanced_total(&make_pool(12)), Some(40));
        assert_eq!(max_balanced_total(&make_pool(4)), None);
        assert_eq!(max_balanced_total(&[]), None);
    }

    #[test]
    fn test_dimension_counts_include_empty_buckets() {
        let pool = vec![Question::new("1", "TF", 'T', "")];
        let counts = dimension_counts(&pool);
        assert_eq!(counts[&Dimension::Tf], 1);
        assert_eq!(counts[&Dimension::Ei], 0);
        assert_eq!(counts.len(), 4);
    }
}
