//! Platform service implementations
//!
//! `rand` covers both targets; on wasm32 its entropy comes from `getrandom`
//! with the `js` backend.

use rand::Rng;

use crate::ports::outbound::RandomProvider;

/// Random provider using the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomProvider;

impl RandomProvider for ThreadRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}
