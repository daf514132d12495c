// Utility functions

pub mod filename;
pub mod logger;

pub use logger::*;
