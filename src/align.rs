//! Character-level sequence matching.
//!
//! Implements the Ratcliff/Obershelp family of operations used by the
//! verification cascade: single longest common run, recursive
//! matching-block decomposition, and the derived similarity ratio.
//!
//! All offsets are character indices (not bytes), so spans compose with
//! the character offsets recorded by the chapter index.

use std::collections::HashMap;

/// An equal-content run: `len` characters starting at `a` in the first
/// sequence and `b` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Start offset in the first sequence.
    pub a: usize,
    /// Start offset in the second sequence.
    pub b: usize,
    /// Length of the run.
    pub len: usize,
}

/// Index of positions per character in `b`, queried with window bounds
/// during the recursive decomposition.
fn position_index(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }
    b2j
}

/// Longest contiguous common run within `a[alo..ahi]` x `b[blo..bhi]`.
///
/// Of all maximal runs, returns the one starting earliest in `a`, and of
/// those, earliest in `b`.
fn longest_match_in(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Match {
    let mut best = Match { a: alo, b: blo, len: 0 };
    // j2len[j] = length of the common run ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, &ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j > blo {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_j2len.insert(j, k);
                if k > best.len {
                    best = Match { a: i + 1 - k, b: j + 1 - k, len: k };
                }
            }
        }
        j2len = new_j2len;
    }
    best
}

/// Longest contiguous common run between two strings.
pub fn longest_match(a: &str, b: &str) -> Match {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let b2j = position_index(&b_chars);
    longest_match_in(&a_chars, &b2j, 0, a_chars.len(), 0, b_chars.len())
}

/// Ordered, non-overlapping equal-content runs between two strings.
///
/// Recursively takes the longest common run, then decomposes the regions
/// to its left and right. Adjacent runs are merged. Runs appear in
/// ascending order of both `a` and `b`.
pub fn matching_blocks(a: &str, b: &str) -> Vec<Match> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let b2j = position_index(&b_chars);

    let mut queue = vec![(0, a_chars.len(), 0, b_chars.len())];
    let mut raw: Vec<Match> = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let m = longest_match_in(&a_chars, &b2j, alo, ahi, blo, bhi);
        if m.len == 0 {
            continue;
        }
        if alo < m.a && blo < m.b {
            queue.push((alo, m.a, blo, m.b));
        }
        if m.a + m.len < ahi && m.b + m.len < bhi {
            queue.push((m.a + m.len, ahi, m.b + m.len, bhi));
        }
        raw.push(m);
    }
    raw.sort_by_key(|m| (m.a, m.b));

    // Merge runs that touch in both sequences
    let mut blocks: Vec<Match> = Vec::new();
    for m in raw {
        match blocks.last_mut() {
            Some(last) if last.a + last.len == m.a && last.b + last.len == m.b => {
                last.len += m.len;
            }
            _ => blocks.push(m),
        }
    }
    blocks
}

/// Ratcliff/Obershelp similarity: `2 * M / (|a| + |b|)` where `M` is the
/// total matched character count. Two empty strings are fully similar.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|m| m.len).sum();
    #[allow(clippy::cast_precision_loss)]
    {
        2.0 * matched as f64 / total as f64
    }
}
