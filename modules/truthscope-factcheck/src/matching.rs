// Token-set fuzzy matching.
//
// Both strings are split into whitespace token sets. The shared tokens
// ("sect") are compared against sect + each side's leftovers, and the two
// "sect + leftovers" strings against each other; the best score wins. Word
// order and repeated words do not matter, and a claim whose tokens are a
// subset of a headline's scores 100.

use std::collections::BTreeSet;

/// Minimum score (exclusive) for a cached headline to count as evidence.
pub const MATCH_THRESHOLD: f64 = 60.0;

/// Token-set similarity of `a` and `b` on a 0–100 scale.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let t0 = sect.join(" ");
    let t1 = join_nonempty(&t0, &diff_ab.join(" "));
    let t2 = join_nonempty(&t0, &diff_ba.join(" "));

    let mut best = ratio(&t1, &t2);
    if !t0.is_empty() {
        best = best.max(ratio(&t0, &t1)).max(ratio(&t0, &t2));
    }
    best
}

/// True when `candidate` matches `claim` strictly above [`MATCH_THRESHOLD`].
pub fn is_match(claim: &str, candidate: &str) -> bool {
    token_set_ratio(claim, candidate) > MATCH_THRESHOLD
}

/// Normalized insert/delete similarity on a 0–100 scale.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let indel = total - 2 * lcs_len(&a, &b);
    100.0 * (1.0 - indel as f64 / total as f64)
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Longest common subsequence length, one rolling row.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}
