//! Platform abstraction traits
//!
//! Platform services the controller needs but which differ per target or
//! must be controllable from tests.

/// Random number provider
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomProvider: Send + Sync {
    /// Generate random i32 in range [min, max] (inclusive)
    fn random_range(&self, min: i32, max: i32) -> i32;
}
