/*!
This module handles random generation of [`Shape`]s.
*/

use rand::Rng;

use crate::Shape;

/// Handles the information of which shapes to hand out during a match.
///
/// To actually generate [`Shape`]s, the [`PieceSource::with_rng`] method
/// needs to be used to yield a [`ShapeIterator`] that implements
/// [`Iterator`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceSource {
    /// Uniformly random shape generator.
    Uniform,
    /// Debug generator which repeats a certain pattern of [`Shape`]s
    /// forever. Useful for reproducing exact piece sequences in tests.
    Cycle {
        /// The sequence of shapes that is repeated.
        pattern: Vec<Shape>,
        /// Index to the shape that will be yielded next.
        index: usize,
    },
}

impl PieceSource {
    /// Initialize an instance of the [`PieceSource::Uniform`] variant.
    pub const fn uniform() -> Self {
        Self::Uniform
    }

    /// Initialize a custom instance of the [`PieceSource::Cycle`] variant.
    pub const fn cycle(pattern: Vec<Shape>) -> Self {
        Self::Cycle { pattern, index: 0 }
    }

    /// Method that allows `PieceSource` to be used as [`Iterator`].
    pub fn with_rng<'a, 'b, R: Rng>(&'a mut self, rng: &'b mut R) -> ShapeIterator<'a, 'b, R> {
        ShapeIterator {
            piece_source: self,
            rng,
        }
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::Uniform
    }
}

/// Struct produced from [`PieceSource::with_rng`] which implements
/// [`Iterator`].
pub struct ShapeIterator<'a, 'b, R: Rng> {
    /// Selected piece source to use as information source.
    pub piece_source: &'a mut PieceSource,
    /// Random number generator for the raw source of randomness.
    pub rng: &'b mut R,
}

impl<R: Rng> Iterator for ShapeIterator<'_, '_, R> {
    type Item = Shape;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.piece_source {
            PieceSource::Uniform => Some(Shape::VARIANTS[self.rng.random_range(0..=6)]),
            PieceSource::Cycle { pattern, index } => {
                let shape = pattern[*index];
                *index += 1;
                if *index == pattern.len() {
                    *index = 0;
                }
                Some(shape)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn uniform_is_reproducible_per_seed() {
        let mut source_a = PieceSource::uniform();
        let mut source_b = PieceSource::uniform();
        let mut rng_a = ChaCha12Rng::seed_from_u64(7);
        let mut rng_b = ChaCha12Rng::seed_from_u64(7);
        let a: Vec<_> = source_a.with_rng(&mut rng_a).take(32).collect();
        let b: Vec<_> = source_b.with_rng(&mut rng_b).take(32).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn cycle_repeats_its_pattern() {
        let mut source = PieceSource::cycle(vec![Shape::O, Shape::I, Shape::T]);
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let shapes: Vec<_> = source.with_rng(&mut rng).take(7).collect();
        assert_eq!(
            shapes,
            [Shape::O, Shape::I, Shape::T, Shape::O, Shape::I, Shape::T, Shape::O]
        );
    }
}
