//! File-backed member roster.
//!
//! The roster keeps every member in memory in insertion order and mirrors
//! that sequence to a JSON file. The file is read once when the roster is
//! opened and fully rewritten after every successful add or remove.

pub mod format;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::member::Member;

/// Default backing file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "members.json";

/// What happened when the backing file was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file exists at the path; the roster starts empty.
    Missing,
    /// The file was parsed and held this many members.
    Loaded(usize),
    /// The file could not be read or parsed; the roster starts empty.
    Corrupt,
}

/// An ordered set of members keyed by `member_id`, persisted to a JSON file.
///
/// No two members in a roster share a `member_id`.
#[derive(Debug)]
pub struct Roster {
    /// Path to the backing file.
    path: PathBuf,
    /// Members in insertion order.
    members: Vec<Member>,
}

impl Roster {
    /// Open a roster backed by the file at `path` and load it.
    ///
    /// Never fails: a missing, unreadable or malformed file yields an empty
    /// roster. A malformed file is left untouched until the next mutation
    /// overwrites it.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let mut roster = Self {
            path: path.as_ref().to_path_buf(),
            members: Vec::new(),
        };
        roster.load();
        roster
    }

    /// Get the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory members with the contents of the backing file.
    ///
    /// There is no partial recovery: one bad entry discards the whole file.
    pub fn load(&mut self) -> LoadOutcome {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No roster file at {}, starting empty", self.path.display());
                self.members.clear();
                return LoadOutcome::Missing;
            }
            Err(e) => {
                warn!(
                    "Could not read roster file {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                self.members.clear();
                return LoadOutcome::Corrupt;
            }
        };

        match format::decode(&text) {
            Ok(members) => {
                info!(
                    "Loaded {} members from {}",
                    members.len(),
                    self.path.display()
                );
                self.members = members;
                LoadOutcome::Loaded(self.members.len())
            }
            Err(e) if e.is_record_error() => {
                warn!(
                    "Roster file {} holds an invalid member record ({}); starting empty",
                    self.path.display(),
                    e
                );
                self.members.clear();
                LoadOutcome::Corrupt
            }
            Err(e) => {
                warn!(
                    "Roster file {} is not a JSON member array ({}); starting empty",
                    self.path.display(),
                    e
                );
                self.members.clear();
                LoadOutcome::Corrupt
            }
        }
    }

    /// Rewrite the backing file with the current members.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let text = format::encode(&self.members)?;
        std::fs::write(&self.path, text)?;
        debug!(
            "Saved {} members to {}",
            self.members.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Add a member and persist the roster.
    ///
    /// Returns `Ok(false)` without touching memory or disk if `member_id` is
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails. The member stays added in memory.
    pub fn add_member(
        &mut self,
        member_id: &str,
        name: &str,
        email: &str,
        join_date: &str,
    ) -> Result<bool> {
        if self.get_member(member_id).is_some() {
            debug!("Rejecting duplicate member id {}", member_id);
            return Ok(false);
        }

        self.members.push(Member::new(member_id, name, email, join_date));
        self.save()?;
        info!("Added member {}", member_id);
        Ok(true)
    }

    /// Remove the member with `member_id` and persist the roster.
    ///
    /// Returns `Ok(false)` without side effects if no such member exists.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails. The member stays removed in memory.
    pub fn remove_member(&mut self, member_id: &str) -> Result<bool> {
        let Some(index) = self.position(member_id) else {
            debug!("No member with id {} to remove", member_id);
            return Ok(false);
        };

        self.members.remove(index);
        self.save()?;
        info!("Removed member {}", member_id);
        Ok(true)
    }

    /// Look up a member by exact `member_id`.
    #[must_use]
    pub fn get_member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    /// All members in insertion order.
    #[must_use]
    pub fn list_members(&self) -> &[Member] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    fn position(&self, member_id: &str) -> Option<usize> {
        self.members.iter().position(|m| m.member_id == member_id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::open(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use tempfile::TempDir;

    fn create_test_roster() -> (TempDir, Roster) {
        init_test_logging();
        let dir = TempDir::new().expect("failed to create temp dir");
        let roster = Roster::open(dir.path().join("test_members.json"));
        (dir, roster)
    }

    fn add_three(roster: &mut Roster) {
        assert!(roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap());
        assert!(roster
            .add_member("002", "Jane Smith", "jane@example.com", "2024-01-02")
            .unwrap());
        assert!(roster
            .add_member("003", "Bob Wilson", "bob@example.com", "2024-01-03")
            .unwrap());
    }

    fn ids(roster: &Roster) -> Vec<&str> {
        roster
            .list_members()
            .iter()
            .map(|m| m.member_id.as_str())
            .collect()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_dir, roster) = create_test_roster();
        assert_eq!(roster.member_count(), 0);
        assert!(roster.list_members().is_empty());
        assert!(!roster.path().exists());
    }

    #[test]
    fn test_load_outcome_missing() {
        let (_dir, mut roster) = create_test_roster();
        assert_eq!(roster.load(), LoadOutcome::Missing);
    }

    #[test]
    fn test_add_member() {
        let (_dir, mut roster) = create_test_roster();
        let added = roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();

        assert!(added);
        assert_eq!(roster.member_count(), 1);
        assert!(roster.path().exists());
    }

    #[test]
    fn test_add_then_get_returns_same_fields() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("007", "", "no email", "whenever")
            .unwrap();

        let member = roster.get_member("007").unwrap();
        assert_eq!(member, &Member::new("007", "", "no email", "whenever"));
    }

    #[test]
    fn test_add_duplicate_member() {
        let (_dir, mut roster) = create_test_roster();
        assert!(roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap());
        assert_eq!(roster.member_count(), 1);

        let added = roster
            .add_member("001", "Jane Doe", "jane@example.com", "2024-01-02")
            .unwrap();
        assert!(!added);
        assert_eq!(roster.member_count(), 1);

        let member = roster.get_member("001").unwrap();
        assert_eq!(member.name, "John Doe");
        assert_eq!(member.email, "john@example.com");
        assert_eq!(member.join_date, "2024-01-01");
    }

    #[test]
    fn test_add_duplicate_leaves_file_unchanged() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();
        let before = std::fs::read_to_string(roster.path()).unwrap();

        roster
            .add_member("001", "Jane Doe", "jane@example.com", "2024-01-02")
            .unwrap();
        let after = std::fs::read_to_string(roster.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_member() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();

        assert!(roster.remove_member("001").unwrap());
        assert_eq!(roster.member_count(), 0);
        assert!(roster.get_member("001").is_none());
    }

    #[test]
    fn test_remove_nonexistent_member() {
        let (_dir, mut roster) = create_test_roster();
        add_three(&mut roster);

        assert!(!roster.remove_member("999").unwrap());
        assert_eq!(ids(&roster), vec!["001", "002", "003"]);
    }

    #[test]
    fn test_remove_nonexistent_does_not_create_file() {
        let (_dir, mut roster) = create_test_roster();
        assert!(!roster.remove_member("999").unwrap());
        assert!(!roster.path().exists());
    }

    #[test]
    fn test_remove_middle_member_preserves_order() {
        let (_dir, mut roster) = create_test_roster();
        add_three(&mut roster);
        assert_eq!(roster.member_count(), 3);

        assert!(roster.remove_member("002").unwrap());
        assert_eq!(roster.member_count(), 2);
        assert!(roster.get_member("001").is_some());
        assert!(roster.get_member("002").is_none());
        assert!(roster.get_member("003").is_some());
        assert_eq!(ids(&roster), vec!["001", "003"]);
    }

    #[test]
    fn test_get_nonexistent_member() {
        let (_dir, roster) = create_test_roster();
        assert!(roster.get_member("999").is_none());
    }

    #[test]
    fn test_get_member_exact_match_only() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();

        assert!(roster.get_member("1").is_none());
        assert!(roster.get_member("001 ").is_none());
    }

    #[test]
    fn test_list_members_in_insertion_order() {
        let (_dir, mut roster) = create_test_roster();
        roster.add_member("b", "B", "b@example.com", "2024-02-01").unwrap();
        roster.add_member("a", "A", "a@example.com", "2024-01-01").unwrap();

        assert_eq!(ids(&roster), vec!["b", "a"]);
    }

    #[test]
    fn test_persistence() {
        let (_dir, mut roster) = create_test_roster();
        add_three(&mut roster);

        let reopened = Roster::open(roster.path());
        assert_eq!(reopened.member_count(), 3);
        assert_eq!(reopened.list_members(), roster.list_members());
    }

    #[test]
    fn test_persistence_after_removal() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();
        roster
            .add_member("002", "Jane Smith", "jane@example.com", "2024-01-02")
            .unwrap();
        roster.remove_member("001").unwrap();

        let reopened = Roster::open(roster.path());
        assert_eq!(reopened.member_count(), 1);
        assert!(reopened.get_member("001").is_none());
        assert!(reopened.get_member("002").is_some());
    }

    #[test]
    fn test_load_outcome_loaded() {
        let (_dir, mut roster) = create_test_roster();
        add_three(&mut roster);
        assert_eq!(roster.load(), LoadOutcome::Loaded(3));
    }

    #[test]
    fn test_saved_file_layout() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();

        let text = std::fs::read_to_string(roster.path()).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"member_id\": \"001\",\n    \"name\": \"John Doe\",\n    \"email\": \"john@example.com\",\n    \"join_date\": \"2024-01-01\"\n  }\n]"
        );
    }

    #[test]
    fn test_remove_last_member_writes_empty_array() {
        let (_dir, mut roster) = create_test_roster();
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();
        roster.remove_member("001").unwrap();

        let text = std::fs::read_to_string(roster.path()).unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("members.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let mut roster = Roster::open(&path);
        assert_eq!(roster.member_count(), 0);
        assert_eq!(roster.load(), LoadOutcome::Corrupt);

        // Untouched until the next mutation.
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{ this is not json"
        );
    }

    #[test]
    fn test_missing_key_discards_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("members.json");
        std::fs::write(
            &path,
            r#"[
                {"member_id": "001", "name": "A", "email": "a", "join_date": "x"},
                {"member_id": "002", "name": "B", "join_date": "y"}
            ]"#,
        )
        .unwrap();

        let roster = Roster::open(&path);
        assert_eq!(roster.member_count(), 0);
        assert!(roster.get_member("001").is_none());
    }

    #[test]
    fn test_corrupt_file_overwritten_on_mutation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("members.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut roster = Roster::open(&path);
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();

        let reopened = Roster::open(&path);
        assert_eq!(reopened.member_count(), 1);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("members.json");

        let mut roster = Roster::open(&path);
        roster
            .add_member("001", "John Doe", "john@example.com", "2024-01-01")
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_directory_as_backing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::open(dir.path());
        assert_eq!(roster.member_count(), 0);
        assert_eq!(roster.load(), LoadOutcome::Corrupt);
    }

    #[test]
    fn test_save_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::open(dir.path());

        let result = roster.add_member("001", "John Doe", "john@example.com", "2024-01-01");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_default_opens_members_json_in_working_directory() {
        figment::Jail::expect_with(|jail| {
            let mut roster = Roster::default();
            assert_eq!(roster.path(), Path::new("members.json"));
            assert_eq!(roster.member_count(), 0);

            roster
                .add_member("001", "John Doe", "john@example.com", "2024-01-01")
                .map_err(|e| e.to_string())?;
            assert!(jail.directory().join("members.json").exists());

            let reopened = Roster::default();
            assert_eq!(reopened.member_count(), 1);
            Ok(())
        });
    }

    #[test]
    fn test_path() {
        let (dir, roster) = create_test_roster();
        assert_eq!(roster.path(), dir.path().join("test_members.json"));
    }
}
