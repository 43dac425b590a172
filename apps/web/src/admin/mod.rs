//! Admin analytics dashboard. Payloads are opaque JSON owned by the backend.

pub mod handlers;
