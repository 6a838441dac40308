//! Enumeration of forbidden-node combinations.
//!
//! A generator run consumes one concrete combination of forbidden nodes. In
//! custom mode that combination is spelled out in the configuration; in
//! all-patterns mode every way of forbidding a configured number of words per
//! phase is enumerated, as the cartesian product over per-phase choices.

use itertools::Itertools;

use crate::alphabet::Alphabet;
use crate::graph::Node;

/// The single combination described by an explicit `(word, phase)` list.
pub fn custom_combination(words: &[(String, u32)]) -> Vec<Node> {
    words
        .iter()
        .map(|(label, phase)| Node::new(label.clone(), *phase))
        .collect()
}

/// Lazily enumerates every forbidden-node combination of the all-patterns mode:
/// for each phase `p` below `period`, choose `per_position[p]` of the
/// `alphabet_size^word_length` candidate words at that phase, then combine the
/// per-phase choices in every possible way.
///
/// `per_position` must hold one count per phase and no count may exceed the
/// candidate pool; the configuration layer checks both.
pub fn all_patterns<'a>(
    alphabet: &Alphabet,
    word_length: usize,
    per_position: &'a [u32],
    period: u32,
) -> impl Iterator<Item = Vec<Node>> + 'a {
    let words: Vec<String> = alphabet.words_of_length(word_length).collect();

    (0..period)
        .map(move |phase| {
            let candidates: Vec<Node> = words
                .iter()
                .map(|word| Node::new(word.clone(), phase))
                .collect();
            let count = per_position[phase as usize] as usize;
            candidates.into_iter().combinations(count)
        })
        .multi_cartesian_product()
        .map(|choice| choice.into_iter().flatten().collect())
}

/// The number of combinations [`all_patterns`] will produce, or `None` on
/// overflow. Useful for reporting before running a long enumeration.
pub fn all_patterns_count(
    alphabet: &Alphabet,
    word_length: usize,
    per_position: &[u32],
) -> Option<u128> {
    let pool = alphabet.word_count(word_length)? as u128;
    per_position
        .iter()
        .map(|&count| binomial(pool, count as u128))
        .try_fold(1u128, |acc, choices| acc.checked_mul(choices?))
}

fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        result = result.checked_mul(n - i)?;
        result /= i + 1;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::{all_patterns, all_patterns_count, custom_combination};
    use crate::alphabet::Alphabet;
    use crate::graph::Node;

    #[test]
    fn custom_mode_passes_words_through() {
        let combination =
            custom_combination(&[("010".to_string(), 1), ("12".to_string(), 0)]);
        assert_eq!(
            combination,
            vec![Node::new("010", 1), Node::new("12", 0)]
        );
    }

    #[test]
    fn all_patterns_counts() {
        let alphabet = Alphabet::new(2);
        // 4 words of length 2 per phase; choose 1 at phase 0 and 2 at phase 1
        let combinations: Vec<_> = all_patterns(&alphabet, 2, &[1, 2], 2).collect();
        assert_eq!(combinations.len(), 4 * 6);
        assert_eq!(
            all_patterns_count(&alphabet, 2, &[1, 2]),
            Some(24)
        );

        for combination in &combinations {
            assert_eq!(combination.len(), 3);
            assert!(combination.iter().take(1).all(|n| n.phase() == 0));
            assert!(combination.iter().skip(1).all(|n| n.phase() == 1));
        }
    }

    #[test]
    fn combinations_are_distinct() {
        let alphabet = Alphabet::new(2);
        let combinations: Vec<_> = all_patterns(&alphabet, 1, &[1, 1], 2).collect();
        assert_eq!(combinations.len(), 4);
        for (i, left) in combinations.iter().enumerate() {
            for right in &combinations[i + 1..] {
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn binomial_edge_cases() {
        assert_eq!(super::binomial(4, 2), Some(6));
        assert_eq!(super::binomial(4, 0), Some(1));
        assert_eq!(super::binomial(2, 3), Some(0));
    }
}
