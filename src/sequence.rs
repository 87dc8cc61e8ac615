//! Position-sequence scoring: longest increasing subsequence and the
//! reciprocal-gap contiguity average.
//!
//! The ranking model multiplies the two: a long in-order match that is nearly
//! contiguous in the document outranks the same tokens scattered around it.

/// Longest strictly increasing subsequence of `xs`, patience-sorting style,
/// O(n log n). Deterministic: when several subsequences tie in length the
/// earliest-position chain wins, because an incoming value always replaces
/// the first tail that is not smaller than it.
pub fn longest_increasing_subsequence(xs: &[u32]) -> Vec<u32> {
    if xs.is_empty() {
        return Vec::new();
    }

    // tails[k] = index into xs of the smallest tail of any chain of length k+1
    let mut tails: Vec<usize> = Vec::with_capacity(xs.len());
    // parent[i] = index of the element preceding xs[i] in its chain
    let mut parent: Vec<Option<usize>> = vec![None; xs.len()];

    for (i, &x) in xs.iter().enumerate() {
        let slot = tails.partition_point(|&t| xs[t] < x);
        if slot > 0 {
            parent[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut chain = Vec::with_capacity(tails.len());
    let mut at = tails.last().copied();
    while let Some(i) = at {
        chain.push(xs[i]);
        at = parent[i];
    }
    chain.reverse();
    chain
}

/// Average reciprocal gap of an ascending sequence.
///
/// Adjacent elements (gap 1) contribute 1.0, wider gaps dilute the average.
/// Singletons score 1.0; the empty sequence scores 0.0.
pub fn reciprocal_gap_avg(ys: &[u32]) -> f64 {
    match ys.len() {
        0 => 0.0,
        1 => 1.0,
        m => {
            let sum: f64 = ys
                .windows(2)
                .map(|w| 1.0 / f64::from(w[1] - w[0]))
                .sum();
            sum / (m - 1) as f64
        }
    }
}

/// Positional score of a match: chain length weighted by its contiguity.
pub fn positional_score(lis: &[u32]) -> f64 {
    lis.len() as f64 * reciprocal_gap_avg(lis)
}
