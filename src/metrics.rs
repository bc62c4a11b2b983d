//! Scores for comparing cluster labels against known groups.
//!
//! Cluster ids are arbitrary, so both scores are invariant to relabelling:
//! `[0, 0, 1, 1]` and `[1, 1, 0, 0]` describe the same partition.
//!
//! | Metric | Range | Best | Properties |
//! |--------|-------|------|------------|
//! | [`ari`] | [-1, 1] | 1 | Adjusted for chance |
//! | [`purity`] | [0, 1] | 1 | Simple, biased toward many clusters |
//!
//! # References
//!
//! - Hubert & Arabie (1985). "Comparing partitions" (ARI)

use std::collections::HashMap;

/// Adjusted Rand Index between two labelings.
///
/// 0 means no better than chance, 1 means the same partition.
/// Mismatched lengths or empty input score 0.
///
/// ```rust
/// use vitals::metrics::ari;
///
/// let pred = [1, 1, 0, 0];
/// let truth = [0, 0, 1, 1];
/// assert!((ari(&pred, &truth) - 1.0).abs() < 1e-12);
/// ```
pub fn ari(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.len() != truth.len() || pred.is_empty() {
        return 0.0;
    }

    let joint = contingency(pred, truth);

    let mut row_sums: HashMap<usize, usize> = HashMap::new();
    let mut col_sums: HashMap<usize, usize> = HashMap::new();
    for (&(p, t), &count) in &joint {
        *row_sums.entry(p).or_default() += count;
        *col_sums.entry(t).or_default() += count;
    }

    let pairs_joint: f64 = joint.values().map(|&c| comb2(c)).sum();
    let pairs_pred: f64 = row_sums.values().map(|&c| comb2(c)).sum();
    let pairs_truth: f64 = col_sums.values().map(|&c| comb2(c)).sum();
    let pairs_all = comb2(pred.len());

    let expected = pairs_pred * pairs_truth / pairs_all;
    let max_index = (pairs_pred + pairs_truth) / 2.0;

    let denom = max_index - expected;
    if denom.abs() < 1e-10 {
        return 1.0;
    }
    (pairs_joint - expected) / denom
}

/// Fraction of points whose cluster's majority group is their own group.
///
/// Reaches 1.0 trivially when every point is its own cluster.
pub fn purity(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.len() != truth.len() || pred.is_empty() {
        return 0.0;
    }

    let mut majority: HashMap<usize, usize> = HashMap::new();
    for (&(p, _), &count) in &contingency(pred, truth) {
        let best = majority.entry(p).or_default();
        *best = (*best).max(count);
    }

    majority.values().sum::<usize>() as f64 / pred.len() as f64
}

fn contingency(pred: &[usize], truth: &[usize]) -> HashMap<(usize, usize), usize> {
    let mut table = HashMap::new();
    for (&p, &t) in pred.iter().zip(truth) {
        *table.entry((p, t)).or_insert(0) += 1;
    }
    table
}

fn comb2(n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        (n * (n - 1) / 2) as f64
    }
}
