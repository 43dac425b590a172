//! Drag-and-drop reordering of profile sections.

use std::collections::HashSet;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("sections cannot be empty")]
    Empty,

    #[error("section names cannot be blank")]
    BlankSection,

    #[error("section '{0}' appears more than once")]
    Duplicate(String),

    #[error("position {index} is out of range for {len} sections")]
    OutOfRange { index: usize, len: usize },
}

/// Checks that an order is non-empty with unique, non-blank section names.
pub fn validate_section_order(order: &[String]) -> Result<(), ReorderError> {
    if order.is_empty() {
        return Err(ReorderError::Empty);
    }

    let mut seen = HashSet::with_capacity(order.len());
    for section in order {
        if section.trim().is_empty() {
            return Err(ReorderError::BlankSection);
        }
        if !seen.insert(section.as_str()) {
            return Err(ReorderError::Duplicate(section.clone()));
        }
    }
    Ok(())
}

/// Moves the section at `from` to `to`, shifting the ones in between.
pub fn move_section(order: &mut Vec<String>, from: usize, to: usize) -> Result<(), ReorderError> {
    let len = order.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::OutOfRange { index, len });
        }
    }

    let section = order.remove(from);
    order.insert(to, section);
    Ok(())
}
