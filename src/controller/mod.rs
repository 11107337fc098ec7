//! Screen-level data controllers
//!
//! - `fetch`: request lifecycle with stale-result discarding
//! - `debounce`: settled values for rapidly changing input

pub mod debounce;
pub mod fetch;

pub use debounce::{delay_from_millis, Debouncer};
pub use fetch::{FetchController, FetchError, FetchState, Pending};
