// Request-scoped scratch storage on the local filesystem

pub mod scratch;

pub use scratch::*;
