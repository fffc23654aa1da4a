//! Parser for `git status --porcelain=v1 -z` output.
//!
//! Each entry lands in exactly one [`WorkingTreeStatus`] category so the
//! flattened file list never reports a path twice.

use crate::error::{GitError, Result};
use crate::git::WorkingTreeStatus;

/// Unmerged XY pairs, see git-status(1)
const UNMERGED: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Parse NUL-separated porcelain v1 status output
pub fn parse_status(raw: &str) -> Result<WorkingTreeStatus> {
    let mut status = WorkingTreeStatus::default();
    let mut entries = raw.split('\0').filter(|entry| !entry.is_empty());

    while let Some(entry) = entries.next() {
        if entry.len() < 4 || !entry.is_char_boundary(2) || !entry.is_char_boundary(3) {
            return Err(GitError::Parse {
                reason: format!("malformed status entry '{}'", entry),
            }
            .into());
        }

        let code = &entry[..2];
        let path = entry[3..].to_string();
        let index = code.as_bytes()[0];
        let worktree = code.as_bytes()[1];

        if code == "!!" {
            continue;
        }

        if UNMERGED.contains(&code) {
            status.conflicted.push(path);
        } else if code == "??" {
            status.not_added.push(path);
        } else if index == b'R' || worktree == b'R' {
            // With -z the original path follows as its own field
            let from = entries.next().ok_or_else(|| GitError::Parse {
                reason: format!("rename entry '{}' is missing its source path", entry),
            })?;
            status.renamed.push(format!("{} -> {}", from, path));
        } else if index == b'C' || worktree == b'C' {
            entries.next().ok_or_else(|| GitError::Parse {
                reason: format!("copy entry '{}' is missing its source path", entry),
            })?;
            status.created.push(path);
        } else if index == b'A' {
            status.created.push(path);
        } else if index == b'D' || worktree == b'D' {
            status.deleted.push(path);
        } else {
            status.modified.push(path);
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_output() {
        let status = parse_status("").unwrap();
        assert!(status.is_clean());
    }

    #[test]
    fn test_parse_each_category() {
        let raw = " M src/lib.rs\0?? notes.txt\0A  new.rs\0 D gone.rs\0UU both.rs\0R  after.rs\0before.rs\0";
        let status = parse_status(raw).unwrap();

        assert_eq!(status.modified, vec!["src/lib.rs"]);
        assert_eq!(status.not_added, vec!["notes.txt"]);
        assert_eq!(status.created, vec!["new.rs"]);
        assert_eq!(status.deleted, vec!["gone.rs"]);
        assert_eq!(status.conflicted, vec!["both.rs"]);
        assert_eq!(status.renamed, vec!["before.rs -> after.rs"]);
    }

    #[test]
    fn test_added_then_modified_counts_once() {
        let status = parse_status("AM staged.rs\0").unwrap();
        assert_eq!(status.created, vec!["staged.rs"]);
        assert!(status.modified.is_empty());
        assert_eq!(status.dirty_files().len(), 1);
    }

    #[test]
    fn test_paths_with_spaces_survive() {
        let status = parse_status("MM dir/with space.txt\0").unwrap();
        assert_eq!(status.modified, vec!["dir/with space.txt"]);
    }

    #[test]
    fn test_ignored_entries_skipped() {
        let status = parse_status("!! target/\0").unwrap();
        assert!(status.is_clean());
    }

    #[test]
    fn test_rename_without_source_is_error() {
        assert!(parse_status("R  after.rs\0").is_err());
    }

    #[test]
    fn test_worktree_rename_consumes_source_path() {
        let status = parse_status(" R b.txt\0a.txt\0").unwrap();
        assert_eq!(status.renamed, vec!["a.txt -> b.txt"]);
        assert_eq!(status.dirty_files(), vec!["a.txt -> b.txt"]);

        let status = parse_status(" R b\0a\0 M other.rs\0").unwrap();
        assert_eq!(status.renamed, vec!["a -> b"]);
        assert_eq!(status.modified, vec!["other.rs"]);
    }

    #[test]
    fn test_copy_in_either_column_counts_as_created() {
        let status = parse_status("C  copy.rs\0orig.rs\0 C twin.rs\0orig.rs\0").unwrap();
        assert_eq!(status.created, vec!["copy.rs", "twin.rs"]);
        assert_eq!(status.dirty_files().len(), 2);
    }

    #[test]
    fn test_short_entry_is_error() {
        assert!(parse_status("M\0").is_err());
    }
}
