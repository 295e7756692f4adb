//! RNG module - shape sources for spawning
//!
//! Spawning asks a [`ShapeSource`] for the next shape. The default source picks
//! uniformly among the seven kinds with a seeded LCG so a seed reproduces a
//! whole game; tests plug in [`ScriptedShapes`] to fix the sequence.

use crate::types::ShapeKind;

/// Capability to pick the shape of the next piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform pick among all seven kinds
#[derive(Debug, Clone)]
pub struct UniformShapes {
    rng: SimpleRng,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl ShapeSource for UniformShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Fixed sequence of shapes, repeated forever
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl ScriptedShapes {
    /// Panics when `shapes` is empty.
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        assert!(!shapes.is_empty(), "scripted shape list must not be empty");
        Self { shapes, index: 0 }
    }

    /// Always the same shape
    pub fn repeat(shape: ShapeKind) -> Self {
        Self::new(vec![shape])
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}
