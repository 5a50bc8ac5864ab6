//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared across all components:
//! 1. **Address Types:** Strong types for logical and physical addresses.
//! 2. **Error Handling:** The engine error enum.
//! 3. **Randomness:** The injected pseudo-random source for access patterns.

/// Address type definitions (logical and physical addresses).
pub mod addr;

/// Engine error definitions.
pub mod error;

/// Pseudo-random source abstraction and the default xorshift generator.
pub mod rng;

pub use addr::{LogicalAddr, PhysAddr};
pub use error::SimError;
pub use rng::{RandomSource, XorShiftRng};
