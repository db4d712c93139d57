//! Ballot-order shuffling and option draws, seeded or not.
//!
//! A non-empty seed string makes the whole stream reproducible: the same
//! seed and the same input set produce the same ordering on every platform,
//! forever. Without a seed, draws come from the process entropy source.
//! The seed is a convenience for reproducibility, not a security control.

use log::debug;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::VotingError;

/// A stream of uniform values in `[0, 1)`.
///
/// The seeded and unseeded paths implement this one interface so the
/// shuffle and draw logic exists exactly once. A source must not be shared
/// across concurrent calls: its internal state advances on every draw.
pub trait EntropySource {
    fn next_f64(&mut self) -> f64;
}

/// Deterministic generator seeded from a string.
///
/// The seed string is folded into a 32-bit state with an FNV-1a hash, and
/// the state drives a mulberry32 mixer. Identical seed strings yield
/// identical output streams.
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn from_seed(seed: &str) -> SeededRng {
        let state = fold_seed(seed);
        debug!("SeededRng: seed {:?} folded to {:#010x}", seed, state);
        SeededRng { state }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }
}

impl EntropySource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        (self.next_u32() as f64) / 4_294_967_296.0
    }
}

/// Non-reproducible source backing unseeded calls.
pub struct ThreadEntropy(ThreadRng);

impl ThreadEntropy {
    pub fn new() -> ThreadEntropy {
        ThreadEntropy(rand::thread_rng())
    }
}

impl Default for ThreadEntropy {
    fn default() -> Self {
        ThreadEntropy::new()
    }
}

impl EntropySource for ThreadEntropy {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

// 32-bit FNV-1a over the Unicode scalar values of the seed.
fn fold_seed(seed: &str) -> u32 {
    let mut acc: u32 = 0x811C_9DC5;
    for c in seed.chars() {
        acc ^= c as u32;
        acc = acc.wrapping_mul(0x0100_0193);
    }
    acc
}

/// Picks the entropy source for an optional seed string. Empty seeds count
/// as absent.
pub fn entropy_for(seed: Option<&str>) -> Box<dyn EntropySource> {
    match seed {
        Some(s) if !s.is_empty() => Box::new(SeededRng::from_seed(s)),
        _ => Box::new(ThreadEntropy::new()),
    }
}

/// Returns a permutation of `items`, reproducible when `seed` is given.
pub fn shuffle<T: Clone>(items: &[T], seed: Option<&str>) -> Vec<T> {
    let mut rng = entropy_for(seed);
    shuffle_with(items, rng.as_mut())
}

/// Fisher-Yates over an explicit entropy source.
pub fn shuffle_with<T: Clone>(items: &[T], rng: &mut dyn EntropySource) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64) as usize;
        out.swap(i, j);
    }
    out
}

/// Draws `k` entries from `items`.
///
/// Without replacement the draw is the first `k` entries of the full
/// shuffle, so a draw of `items.len()` doubles as an order preview. With
/// replacement every draw is an independent index on the same stream, so a
/// seeded draw sequence is reproducible as a whole, not per entry.
///
/// `k == 0` produces an empty draw without error; drawing from an empty
/// set fails.
pub fn sample<T: Clone>(
    items: &[T],
    k: usize,
    with_replacement: bool,
    seed: Option<&str>,
) -> Result<Vec<T>, VotingError> {
    let mut rng = entropy_for(seed);
    sample_with(items, k, with_replacement, rng.as_mut())
}

/// [`sample`] over an explicit entropy source.
pub fn sample_with<T: Clone>(
    items: &[T],
    k: usize,
    with_replacement: bool,
    rng: &mut dyn EntropySource,
) -> Result<Vec<T>, VotingError> {
    if k == 0 {
        return Ok(Vec::new());
    }
    if items.is_empty() {
        return Err(VotingError::EmptyDraw);
    }
    if with_replacement {
        let mut out: Vec<T> = Vec::with_capacity(k);
        for _ in 0..k {
            let j = (rng.next_f64() * items.len() as f64) as usize;
            out.push(items[j].clone());
        }
        Ok(out)
    } else {
        let mut out = shuffle_with(items, rng);
        out.truncate(k);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option-{}", i)).collect()
    }

    #[test]
    fn fold_seed_matches_the_fnv1a_vectors() {
        assert_eq!(fold_seed(""), 0x811C_9DC5);
        assert_eq!(fold_seed("a"), 0xE40C_292C);
        assert_eq!(fold_seed("foobar"), 0xBF9C_F968);
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let xs = items(12);
        let a = shuffle(&xs, Some("room-code"));
        let b = shuffle(&xs, Some("room-code"));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        for seed in [None, Some("s1"), Some("s2"), Some("")] {
            let xs = items(9);
            let mut shuffled = shuffle(&xs, seed);
            assert_eq!(shuffled.len(), xs.len());
            shuffled.sort();
            let mut expected = xs.clone();
            expected.sort();
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn shuffle_of_short_inputs_is_identity() {
        let empty: Vec<String> = Vec::new();
        assert!(shuffle(&empty, Some("x")).is_empty());
        let one = items(1);
        assert_eq!(shuffle(&one, Some("x")), one);
    }

    #[test]
    fn draw_without_replacement_is_a_shuffle_prefix() {
        let xs = items(8);
        let full = shuffle(&xs, Some("prefix-law"));
        for k in 0..=xs.len() {
            let drawn = sample(&xs, k, false, Some("prefix-law")).unwrap();
            assert_eq!(drawn.as_slice(), &full[..k]);
        }
    }

    #[test]
    fn oversized_draw_without_replacement_is_the_whole_shuffle() {
        let xs = items(5);
        let drawn = sample(&xs, 50, false, Some("s")).unwrap();
        assert_eq!(drawn, shuffle(&xs, Some("s")));
    }

    #[test]
    fn replacement_draw_prefix_does_not_depend_on_k() {
        let xs = items(6);
        let long = sample(&xs, 10, true, Some("stream")).unwrap();
        let short = sample(&xs, 4, true, Some("stream")).unwrap();
        assert_eq!(&long[..4], short.as_slice());
    }

    #[test]
    fn replacement_draw_stays_in_bounds() {
        let xs = items(3);
        let drawn = sample(&xs, 64, true, Some("bounds")).unwrap();
        assert_eq!(drawn.len(), 64);
        assert!(drawn.iter().all(|d| xs.contains(d)));
    }

    #[test]
    fn zero_draw_is_empty_even_for_empty_items() {
        let empty: Vec<String> = Vec::new();
        assert!(sample(&empty, 0, false, None).unwrap().is_empty());
        assert!(sample(&items(4), 0, true, None).unwrap().is_empty());
    }

    #[test]
    fn drawing_from_nothing_fails() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            sample(&empty, 2, false, Some("s")),
            Err(VotingError::EmptyDraw)
        );
        assert_eq!(
            sample(&empty, 1, true, None),
            Err(VotingError::EmptyDraw)
        );
    }

    #[test]
    fn unseeded_calls_still_permute() {
        let xs = items(7);
        let mut shuffled = shuffle(&xs, None);
        shuffled.sort();
        let mut expected = xs;
        expected.sort();
        assert_eq!(shuffled, expected);
    }
}
