//! AI content generation: cover letters and job matching, plus the user's
//! saved-letter history.

pub mod handlers;
