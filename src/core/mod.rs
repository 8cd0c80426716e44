//! Core engine: bounds math, debouncing, classification and the session
//! that ties them to a map bridge.

pub mod bounds;
pub mod classify;
pub mod debounce;
pub mod error;
pub mod model;
pub mod overlay;
pub mod session;
pub mod summary;
