//! `tradeunion` - A trade union member roster backed by a JSON file
//!
//! This library provides the member record, the file-backed roster that
//! persists it, and the interactive menu and CLI built on top of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod member;
pub mod menu;
pub mod roster;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use member::Member;
pub use menu::Menu;
pub use roster::{LoadOutcome, Roster};
