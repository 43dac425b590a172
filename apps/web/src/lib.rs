//! CVChatter web gateway.
//!
//! Serves the `/api` surface the CVChatter UI talks to by forwarding each
//! call to the backend API, generates `sitemap.xml` and `robots.txt`, and
//! exposes the client-side state the UI drives (rate-limit modal, theme,
//! section ordering).

pub mod admin;
pub mod backend;
pub mod chat;
pub mod config;
pub mod content;
pub mod errors;
pub mod extract;
pub mod media;
pub mod preferences;
pub mod profile;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod sitemap;
pub mod state;
