//! Chat-with-profile and profile search.

pub mod handlers;
