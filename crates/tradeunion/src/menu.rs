//! Interactive text menu over a roster.
//!
//! The menu reads from any `BufRead` and writes to any `Write`, so the binary
//! drives it with stdin/stdout and tests drive it with in-memory buffers.
//! End of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use tracing::error;

use crate::error::Result;
use crate::member::Member;
use crate::roster::Roster;

const MENU_TITLE: &str = "=== Trade Union Management System ===";
const MENU_RULE_WIDTH: usize = 36;

/// A top-level menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a member.
    Add,
    /// Remove a member after confirmation.
    Remove,
    /// List every member.
    List,
    /// Show one member's fields.
    View,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Parse the user's (already trimmed) selection.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::List),
            "4" => Some(Self::View),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu session.
#[derive(Debug)]
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the menu and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until Exit or end of input.
    ///
    /// Failed saves are reported on the output and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self, roster: &mut Roster) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_member(roster)?,
                Some(MenuChoice::Remove) => self.remove_member(roster)?,
                Some(MenuChoice::List) => {
                    writeln!(self.output, "\n--- All Members ---")?;
                    write_listing(&mut self.output, roster.list_members())?;
                    Flow::Continue
                }
                Some(MenuChoice::View) => self.view_member(roster)?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    writeln!(self.output, "\n✗ Invalid choice! Please enter 1-5.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "\nGoodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{MENU_TITLE}")?;
        writeln!(self.output, "1. Add member")?;
        writeln!(self.output, "2. Remove member")?;
        writeln!(self.output, "3. List all members")?;
        writeln!(self.output, "4. View member details")?;
        writeln!(self.output, "5. Exit")?;
        writeln!(self.output, "{}", "=".repeat(MENU_RULE_WIDTH))?;
        Ok(())
    }

    /// Write `label`, then read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_member(&mut self, roster: &mut Roster) -> Result<Flow> {
        writeln!(self.output, "\n--- Add New Member ---")?;
        let Some(member_id) = self.prompt("Member ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(join_date) = self.prompt("Join Date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };

        match roster.add_member(&member_id, &name, &email, &join_date) {
            Ok(true) => writeln!(self.output, "✓ Member '{name}' added successfully!")?,
            Ok(false) => writeln!(
                self.output,
                "✗ Member with ID '{member_id}' already exists!"
            )?,
            Err(e) => {
                error!("Saving roster after add failed: {}", e);
                writeln!(self.output, "✗ Could not save members: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn remove_member(&mut self, roster: &mut Roster) -> Result<Flow> {
        writeln!(self.output, "\n--- Remove Member ---")?;
        let Some(member_id) = self.prompt("Enter Member ID to remove: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(name) = roster.get_member(&member_id).map(|m| m.name.clone()) else {
            writeln!(self.output, "✗ Member with ID '{member_id}' not found!")?;
            return Ok(Flow::Continue);
        };

        let question = format!("Remove member '{name}' (ID: {member_id})? (yes/no): ");
        let Some(answer) = self.prompt(&question)? else {
            return Ok(Flow::Exit);
        };
        if !is_confirmation(&answer) {
            writeln!(self.output, "Removal cancelled.")?;
            return Ok(Flow::Continue);
        }

        match roster.remove_member(&member_id) {
            Ok(true) => writeln!(self.output, "✓ Member '{name}' removed successfully!")?,
            Ok(false) => writeln!(self.output, "✗ Failed to remove member!")?,
            Err(e) => {
                error!("Saving roster after remove failed: {}", e);
                writeln!(self.output, "✗ Could not save members: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn view_member(&mut self, roster: &Roster) -> Result<Flow> {
        writeln!(self.output, "\n--- View Member Details ---")?;
        let Some(member_id) = self.prompt("Enter Member ID: ")? else {
            return Ok(Flow::Exit);
        };

        match roster.get_member(&member_id) {
            Some(member) => {
                writeln!(self.output)?;
                write_details(&mut self.output, member)?;
            }
            None => writeln!(self.output, "✗ Member with ID '{member_id}' not found!")?,
        }
        Ok(Flow::Continue)
    }
}

/// Whether a confirmation answer means yes (`yes` or `y`, any case).
#[must_use]
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Write the count-prefixed member listing.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_listing(out: &mut impl Write, members: &[Member]) -> Result<()> {
    if members.is_empty() {
        writeln!(out, "No members found.")?;
        return Ok(());
    }

    writeln!(out, "Total members: {}", members.len())?;
    writeln!(out)?;
    for member in members {
        writeln!(out, "{member}")?;
    }
    Ok(())
}

/// Write the labeled field dump for one member.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_details(out: &mut impl Write, member: &Member) -> Result<()> {
    writeln!(out, "Member Details:")?;
    writeln!(out, "  ID: {}", member.member_id)?;
    writeln!(out, "  Name: {}", member.name)?;
    writeln!(out, "  Email: {}", member.email)?;
    writeln!(out, "  Join Date: {}", member.join_date)?;
    Ok(())
}
