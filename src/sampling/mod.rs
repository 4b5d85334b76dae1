//! Sampling module - validation, randomness and the engine.

mod engine;
mod random;
mod validator;

pub use engine::*;
pub use random::*;
pub use validator::*;
