//! Shannon entropy of categorical distributions, in bits.

use crate::error::{DspError, DspResult};
use std::collections::BTreeMap;

/// `-Σ p·log2(p)` over the nonzero entries of `weights`.
///
/// Weights are normalized by their sum first, so raw counts work as well as
/// probabilities.
pub fn shannon_entropy(weights: &[f64]) -> DspResult<f64> {
    if let Some(&bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(DspError::InvalidProbability(bad));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(DspError::EmptyDistribution);
    }

    let h: f64 = weights
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum();
    Ok(h.max(0.0))
}

/// Occurrence count of every character in `text`, ordered by character.
pub fn char_frequencies(text: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Entropy of the empirical character distribution of `text` (bits per character).
///
/// Every character counts as a symbol, whitespace included; callers decide on
/// case folding.
pub fn text_entropy(text: &str) -> DspResult<f64> {
    let counts: Vec<f64> = char_frequencies(text).values().map(|&c| c as f64).collect();
    if counts.is_empty() {
        return Err(DspError::EmptyInput);
    }
    shannon_entropy(&counts)
}

/// Entropy of `k` equiprobable outcomes, `log2(k)`.
pub fn uniform_entropy(k: usize) -> DspResult<f64> {
    if k == 0 {
        return Err(DspError::InvalidParameter(
            "a uniform distribution needs at least one outcome".into(),
        ));
    }
    shannon_entropy(&vec![1.0 / k as f64; k])
}

/// Entropy of a two-outcome process with probabilities `(p, 1 - p)`.
pub fn binary_entropy(p: f64) -> DspResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DspError::InvalidProbability(p));
    }
    shannon_entropy(&[p, 1.0 - p])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_dice() {
        for k in [6usize, 20] {
            let h = uniform_entropy(k).unwrap();
            assert!((h - (k as f64).log2()).abs() < 1e-12, "k={k}: {h}");
        }
        assert_eq!(uniform_entropy(1).unwrap(), 0.0);
        assert!(uniform_entropy(0).is_err());
    }

    #[test]
    fn test_binary_entropy_shape() {
        assert!((binary_entropy(0.5).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(binary_entropy(0.0).unwrap(), 0.0);
        assert_eq!(binary_entropy(1.0).unwrap(), 0.0);

        let mut previous = binary_entropy(0.5).unwrap();
        for p in [0.1, 0.01, 1e-4, 1e-8] {
            let low = binary_entropy(p).unwrap();
            let high = binary_entropy(1.0 - p).unwrap();
            assert!(low < previous, "H({p}) = {low} not below {previous}");
            assert!((low - high).abs() < 1e-6);
            previous = low;
        }
        assert!(previous < 1e-6);
        assert!(binary_entropy(1.5).is_err());
    }

    #[test]
    fn test_rare_event_entropy() {
        // Five 30-second earthquakes a year
        let p = 150.0 / 31_536_000.0;
        let h = binary_entropy(p).unwrap();
        assert!((h - 9.0964e-5).abs() < 1e-8, "got {h}");
    }

    #[test]
    fn test_english_pangram() {
        let text = "The quick brown fox jumps over the lazy dog".to_lowercase();
        let h = text_entropy(&text).unwrap();
        assert!((h - 4.3855).abs() < 1e-3, "got {h}");
    }

    #[test]
    fn test_spanish_sentence() {
        let text = "El rapido zorro marron salta sobre el perro perezoso".to_lowercase();
        let h = text_entropy(&text).unwrap();
        assert!((h - 3.4638).abs() < 1e-3, "got {h}");
    }

    #[test]
    fn test_char_frequencies_counts_spaces() {
        let counts = char_frequencies("aa b");
        assert_eq!(counts.get(&'a'), Some(&2));
        assert_eq!(counts.get(&' '), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_counts_are_normalized() {
        let from_counts = shannon_entropy(&[2.0, 2.0, 4.0]).unwrap();
        let from_probs = shannon_entropy(&[0.25, 0.25, 0.5]).unwrap();
        assert!((from_counts - 1.5).abs() < 1e-12);
        assert!((from_counts - from_probs).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_distributions() {
        assert_eq!(shannon_entropy(&[]).unwrap_err(), DspError::EmptyDistribution);
        assert_eq!(shannon_entropy(&[0.0, 0.0]).unwrap_err(), DspError::EmptyDistribution);
        assert_eq!(
            shannon_entropy(&[0.5, -0.5]).unwrap_err(),
            DspError::InvalidProbability(-0.5)
        );
        assert!(shannon_entropy(&[f64::NAN]).is_err());
        assert_eq!(text_entropy("").unwrap_err(), DspError::EmptyInput);
    }
}
