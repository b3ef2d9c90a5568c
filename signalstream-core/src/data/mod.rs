//! Data sources

pub mod provider;
pub mod sample;

pub use provider::{DataError, DataProvider};
pub use sample::SampleProvider;
