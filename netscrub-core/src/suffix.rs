// netscrub-core/src/suffix.rs
//! Right-anchored label matching between a candidate domain and the operator's
//! trusted reference domains.
//!
//! Both names are split on `.` and aligned at their right ends. Every label of
//! the candidate that lines up with a reference label must be byte-for-byte
//! equal; candidate labels left over once the reference is exhausted are
//! *foreign* and are the only ones ever rewritten. Labels that line up with the
//! reference stay readable.

/// Outcome of matching one candidate against the whole trusted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch {
    /// Index of the accepting reference in registration order.
    pub reference_index: usize,
    /// Number of leading candidate labels with no reference counterpart.
    pub foreign_labels: usize,
}

/// Aligns `found` against `reference` from the right.
///
/// Returns the number of leading foreign labels in `found` when every aligned
/// position matches, or `None` on the first mismatch. A candidate shorter than
/// the reference accepts with zero foreign labels as long as every label it has
/// lines up.
pub fn foreign_label_count(reference: &[&str], found: &[&str]) -> Option<usize> {
    let n = found.len();
    let m = reference.len();
    let mut foreign = 0;
    for i in 0..n {
        let f = n - i - 1;
        match m.checked_sub(i + 1) {
            Some(u) => {
                if reference[u] != found[f] {
                    return None;
                }
            }
            None => foreign += 1,
        }
    }
    Some(foreign)
}

/// Tries each trusted reference in order; the first one that accepts wins.
pub fn match_trusted_suffix<S: AsRef<str>>(candidate: &str, trusted: &[S]) -> Option<SuffixMatch> {
    let found: Vec<&str> = candidate.split('.').collect();
    trusted.iter().enumerate().find_map(|(reference_index, reference)| {
        let reference: Vec<&str> = reference.as_ref().split('.').collect();
        foreign_label_count(&reference, &found).map(|foreign_labels| SuffixMatch {
            reference_index,
            foreign_labels,
        })
    })
}

/// Rewrites the foreign labels of `candidate` through `rewrite`.
///
/// Returns `None` when no trusted reference accepts the candidate. On
/// acceptance returns the rebuilt name together with the match details; the
/// name is identical to `candidate` when there were no foreign labels or when
/// `rewrite` declined every label.
pub fn rewrite_foreign_labels<S, F>(candidate: &str, trusted: &[S], mut rewrite: F) -> Option<(String, SuffixMatch)>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Option<String>,
{
    let matched = match_trusted_suffix(candidate, trusted)?;
    let rebuilt = candidate
        .split('.')
        .enumerate()
        .map(|(idx, label)| {
            if idx < matched.foreign_labels {
                rewrite(label).unwrap_or_else(|| label.to_string())
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".");
    Some((rebuilt, matched))
}
