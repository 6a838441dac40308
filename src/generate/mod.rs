//! The two graph generators and their common dispatch point.
//!
//! Both generators construct a labelled transition graph over a periodic phase
//! structure from a set of forbidden `(word, phase)` nodes. [`Beal`] builds the
//! prefix-closure automaton with longest-suffix fallback transitions, while
//! [`DeBruijn`] builds the full sliding-window graph and removes the forbidden
//! nodes afterwards.

mod beal;
mod de_bruijn;

pub use beal::Beal;
pub use de_bruijn::DeBruijn;

use crate::graph::{Graph, Node};

/// The closed set of graph generators. The variant set is fixed, so dispatch is
/// an enum rather than some open registration mechanism.
#[derive(Debug, Clone)]
pub enum GraphGenerator {
    /// Prefix-closure construction with longest-suffix fallback.
    Beal(Beal),
    /// Periodic sliding-window (de Bruijn) construction.
    DeBruijn(DeBruijn),
}

impl GraphGenerator {
    /// Creates a [`Beal`] generator.
    pub fn beal(alphabet_size: usize, period: u32) -> Self {
        Self::Beal(Beal::new(alphabet_size, period))
    }

    /// Creates a [`DeBruijn`] generator.
    pub fn de_bruijn(alphabet_size: usize, word_length: usize, period: u32) -> Self {
        Self::DeBruijn(DeBruijn::new(alphabet_size, word_length, period))
    }

    /// Generates the graph avoiding the given forbidden nodes.
    pub fn generate(&self, forbidden: &[Node]) -> Graph {
        match self {
            Self::Beal(generator) => generator.generate(forbidden),
            Self::DeBruijn(generator) => generator.generate(forbidden),
        }
    }
}
