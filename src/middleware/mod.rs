// Middleware layers applied to every route

pub mod cors;

pub use cors::*;
