//! Scheduling of update lines within one rank.
//!
//! Before the lines of a rank are evaluated, they pass through a `LineOrderer`. The
//! orderer returns positions within the rank's line list: it may permute the lines or
//! drop some of them, and positions outside of the list are ignored. Together with the mode, this
//! selects the update discipline of the simulation:
//!
//!  - `Shuffle` (default): every line is applied once per round in a random order.
//!  - `Identity`: lines are applied in source order.
//!  - `RandomChoice`: exactly one uniformly chosen line is applied per rank and round,
//!    which gives the classical single-flip asynchronous semantics.
//!
//! Any closure `FnMut(&[TokenLine], &mut StdRng) -> Vec<usize>` is also an orderer.

use crate::TokenLine;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

pub trait LineOrderer {
    /// Produce the positions of the lines to evaluate, in evaluation order.
    fn order(&mut self, lines: &[TokenLine], rng: &mut StdRng) -> Vec<usize>;
}

/// A uniformly random permutation of all lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shuffle;

/// Lines in their original order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

/// A single uniformly chosen line. Empty input yields no lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomChoice;

impl LineOrderer for Shuffle {
    fn order(&mut self, lines: &[TokenLine], rng: &mut StdRng) -> Vec<usize> {
        let mut result: Vec<usize> = (0..lines.len()).collect();
        result.shuffle(rng);
        result
    }
}

impl LineOrderer for Identity {
    fn order(&mut self, lines: &[TokenLine], _rng: &mut StdRng) -> Vec<usize> {
        (0..lines.len()).collect()
    }
}

impl LineOrderer for RandomChoice {
    fn order(&mut self, lines: &[TokenLine], rng: &mut StdRng) -> Vec<usize> {
        if lines.is_empty() {
            Vec::new()
        } else {
            vec![rng.gen_range(0..lines.len())]
        }
    }
}

impl<F> LineOrderer for F
where
    F: FnMut(&[TokenLine], &mut StdRng) -> Vec<usize>,
{
    fn order(&mut self, lines: &[TokenLine], rng: &mut StdRng) -> Vec<usize> {
        self(lines, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::{Identity, LineOrderer, RandomChoice, Shuffle};
    use crate::{tokenize_text, TokenLine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lines() -> Vec<TokenLine> {
        tokenize_text("A* = A\nB* = B\nC* = C\nD* = D\nE* = E").unwrap()
    }

    fn names(order: &[usize]) -> Vec<String> {
        let lines = lines();
        order
            .iter()
            .map(|it| lines[*it].targets()[0].to_string())
            .collect()
    }

    #[test]
    fn identity_keeps_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let ordered = Identity.order(&lines(), &mut rng);
        assert_eq!(vec!["A", "B", "C", "D", "E"], names(&ordered));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = names(&Shuffle.order(&lines(), &mut rng));
        shuffled.sort();
        assert_eq!(vec!["A", "B", "C", "D", "E"], shuffled);
    }

    #[test]
    fn shuffle_is_reproducible() {
        let first = Shuffle.order(&lines(), &mut StdRng::seed_from_u64(42));
        let second = Shuffle.order(&lines(), &mut StdRng::seed_from_u64(42));
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn random_choice_picks_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(1, RandomChoice.order(&lines(), &mut rng).len());
        }
        assert!(RandomChoice.order(&[], &mut rng).is_empty());
    }

    #[test]
    fn closure_orderer() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut reverse = |lines: &[TokenLine], _: &mut StdRng| {
            let mut result: Vec<usize> = (0..lines.len()).collect();
            result.reverse();
            result
        };
        assert_eq!(
            vec!["E", "D", "C", "B", "A"],
            names(&reverse.order(&lines(), &mut rng))
        );
    }
}
