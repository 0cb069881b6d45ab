//! Discord command implementations organized by area.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Medical claim commands
pub mod claim;

/// Employee record commands
pub mod employee;

/// General utility commands
pub mod general;

/// Leave request commands
pub mod leave;

/// Category limit commands
pub mod limits;

/// Argument parsing shared by commands
pub mod parse;

/// Usage summary commands
pub mod summary;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use claim::*;
pub use employee::*;
pub use general::*;
pub use leave::*;
pub use limits::*;
pub use summary::*;

/// Every top-level command registered with the framework.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        general::ping(),
        general::help(),
        claim::claim(),
        limits::limits(),
        summary::summary(),
        employee::employee(),
        leave::leave(),
    ]
}
