//! # Random Number Generation Infrastructure
//!
//! This module provides the uniform variates consumed by the rejection
//! sampler: one per proposal draw, one per acceptance test.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//! - **Static dispatch**: The engine is generic over [`UniformSource`]; no
//!   `Box<dyn Trait>` in the accept/reject loop
//!
//! ## Module Structure
//!
//! - `prng`: Pseudo-random number generator wrapper with seed management
//! - `source`: The [`UniformSource`] trait the engine is generic over
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_engine::rng::{SamplerRng, UniformSource};
//!
//! // Create a seeded RNG for reproducible sampling
//! let mut rng = SamplerRng::from_seed(12345);
//!
//! // Generate uniform random values in [0, 1)
//! let u = rng.uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Batch generation into pre-allocated buffer (zero allocation)
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_uniform(&mut buffer);
//! ```

mod prng;
mod source;

// Public re-exports
pub use prng::SamplerRng;
pub use source::UniformSource;
