//! Configuration validation
//!
//! Validates pipeline configuration for correctness before execution.

mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use validator::ConfigValidator;
