//! Line-level diff computation between two versions of file content.

use similar::{ChangeTag, TextDiff};

use crate::commit::Commit;
use crate::digest::Digest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

/// One coalesced run of lines sharing the same diff classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPart {
    pub kind: DiffKind,
    pub text: String,
}

/// How one file in a commit relates to its parent commit.
#[derive(Debug, Clone)]
pub enum FileChange {
    /// The commit has no parent; there is nothing to diff against.
    FirstCommit,
    /// The path does not appear in the parent commit's file list.
    NewFile,
    /// The path exists in both; the line-level delta between the two.
    Modified(Vec<DiffPart>),
}

/// Diff report for one file entry of a commit.
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub path: String,
    pub content: String,
    pub change: FileChange,
}

/// Full diff report for a commit against its parent.
#[derive(Debug, Clone)]
pub struct CommitDiff {
    pub digest: Digest,
    pub commit: Commit,
    pub files: Vec<FileDiff>,
}

/// Compute a line-based LCS diff, coalescing contiguous same-kind lines into
/// a single part. A moved block shows up as a remove plus an add; no
/// cross-line reordering detection is attempted.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffPart> {
    let diff = TextDiff::from_lines(old_text, new_text);
    let mut parts: Vec<DiffPart> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Unchanged,
            ChangeTag::Insert => DiffKind::Added,
            ChangeTag::Delete => DiffKind::Removed,
        };
        match parts.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => parts.push(DiffPart {
                kind,
                text: change.value().to_string(),
            }),
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_replacement() {
        let parts = diff_lines("a\nb\nc\n", "a\nx\nc\n");

        assert_eq!(
            parts,
            vec![
                DiffPart {
                    kind: DiffKind::Unchanged,
                    text: "a\n".to_string()
                },
                DiffPart {
                    kind: DiffKind::Removed,
                    text: "b\n".to_string()
                },
                DiffPart {
                    kind: DiffKind::Added,
                    text: "x\n".to_string()
                },
                DiffPart {
                    kind: DiffKind::Unchanged,
                    text: "c\n".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_contiguous_runs_are_coalesced() {
        let parts = diff_lines("a\n", "a\nb\nc\n");

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].kind, DiffKind::Unchanged);
        assert_eq!(parts[1].kind, DiffKind::Added);
        assert_eq!(parts[1].text, "b\nc\n");
    }

    #[test]
    fn test_identical_content_is_one_unchanged_part() {
        let parts = diff_lines("same\nlines\n", "same\nlines\n");

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].kind, DiffKind::Unchanged);
        assert_eq!(parts[0].text, "same\nlines\n");
    }

    #[test]
    fn test_empty_old_content_is_all_added() {
        let parts = diff_lines("", "new\nfile\n");

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].kind, DiffKind::Added);
        assert_eq!(parts[0].text, "new\nfile\n");
    }

    #[test]
    fn test_full_removal() {
        let parts = diff_lines("old\nlines\n", "");

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].kind, DiffKind::Removed);
        assert_eq!(parts[0].text, "old\nlines\n");
    }
}
