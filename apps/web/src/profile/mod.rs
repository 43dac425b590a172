//! Profile pages: public profile lookup, the signed-in user's own profile,
//! and section ordering.

pub mod handlers;
pub mod reorder;
