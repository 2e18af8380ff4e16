//! One-shot subcommand handlers.
//!
//! Each handler writes its user-facing lines to `out` and reports whether the
//! operation succeeded. Duplicate and unknown ids are failures, not errors.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use crate::error::Result;
use crate::menu::{is_confirmation, write_details, write_listing};
use crate::roster::Roster;

use super::{AddCommand, ListCommand, RemoveCommand, ShowCommand};

/// Result of a subcommand, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation did what was asked (a cancelled removal counts).
    Success,
    /// Duplicate id on add, or unknown id on remove/show.
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::FAILURE,
        }
    }
}

/// Add a member.
///
/// # Errors
///
/// Returns an error if saving the roster or writing output fails.
pub fn handle_add(roster: &mut Roster, cmd: &AddCommand, out: &mut impl Write) -> Result<Outcome> {
    if roster.add_member(&cmd.member_id, &cmd.name, &cmd.email, &cmd.join_date)? {
        writeln!(out, "✓ Member '{}' added successfully!", cmd.name)?;
        Ok(Outcome::Success)
    } else {
        writeln!(out, "✗ Member with ID '{}' already exists!", cmd.member_id)?;
        Ok(Outcome::Failure)
    }
}

/// Remove a member, asking on `input` first unless `--yes` was given.
///
/// # Errors
///
/// Returns an error if saving the roster, reading input or writing output fails.
pub fn handle_remove(
    roster: &mut Roster,
    cmd: &RemoveCommand,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome> {
    let Some(name) = roster.get_member(&cmd.member_id).map(|m| m.name.clone()) else {
        writeln!(out, "✗ Member with ID '{}' not found!", cmd.member_id)?;
        return Ok(Outcome::Failure);
    };

    if !cmd.yes {
        write!(out, "Remove member '{name}' (ID: {})? (yes/no): ", cmd.member_id)?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !is_confirmation(&answer) {
            writeln!(out, "Removal cancelled.")?;
            return Ok(Outcome::Success);
        }
    }

    if roster.remove_member(&cmd.member_id)? {
        writeln!(out, "✓ Member '{name}' removed successfully!")?;
        Ok(Outcome::Success)
    } else {
        writeln!(out, "✗ Failed to remove member!")?;
        Ok(Outcome::Failure)
    }
}

/// List all members, as text or a JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing output fails.
pub fn handle_list(roster: &Roster, cmd: &ListCommand, out: &mut impl Write) -> Result<Outcome> {
    if cmd.json {
        writeln!(out, "{}", serde_json::to_string_pretty(roster.list_members())?)?;
    } else {
        write_listing(out, roster.list_members())?;
    }
    Ok(Outcome::Success)
}

/// Show one member's details.
///
/// # Errors
///
/// Returns an error if serialization or writing output fails.
pub fn handle_show(roster: &Roster, cmd: &ShowCommand, out: &mut impl Write) -> Result<Outcome> {
    let Some(member) = roster.get_member(&cmd.member_id) else {
        writeln!(out, "✗ Member with ID '{}' not found!", cmd.member_id)?;
        return Ok(Outcome::Failure);
    };

    if cmd.json {
        writeln!(out, "{}", serde_json::to_string_pretty(member)?)?;
    } else {
        write_details(out, member)?;
    }
    Ok(Outcome::Success)
}
