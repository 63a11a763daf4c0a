//! Pairing of removed hunks with the added hunk that follows them.

use std::iter::Peekable;
use std::slice;

use flowcheck_diff::{DiffHunk, HunkKind};

/// One step over the hunk sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HunkGroup<'a> {
    /// Lines shared by both documents.
    Unchanged(&'a DiffHunk),
    /// A changed region: a removed hunk, an added hunk, or a removed hunk
    /// followed directly by an added hunk. At least one side is present.
    Changed {
        removed: Option<&'a DiffHunk>,
        added: Option<&'a DiffHunk>,
    },
}

/// Iterator grouping hunks into [`HunkGroup`]s.
///
/// An added hunk consumed as the partner of a removed hunk is never yielded
/// again on its own.
pub struct HunkPairs<'a> {
    inner: Peekable<slice::Iter<'a, DiffHunk>>,
}

/// Group `hunks` into unchanged runs and changed regions.
pub fn pair_hunks(hunks: &[DiffHunk]) -> HunkPairs<'_> {
    HunkPairs {
        inner: hunks.iter().peekable(),
    }
}

impl<'a> Iterator for HunkPairs<'a> {
    type Item = HunkGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let hunk = self.inner.next()?;
        Some(match hunk.kind {
            HunkKind::Unchanged => HunkGroup::Unchanged(hunk),
            HunkKind::Removed => HunkGroup::Changed {
                removed: Some(hunk),
                added: self.inner.next_if(|next| next.kind == HunkKind::Added),
            },
            HunkKind::Added => HunkGroup::Changed {
                removed: None,
                added: Some(hunk),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunk(kind: HunkKind, text: &str) -> DiffHunk {
        DiffHunk::new(kind, text)
    }

    #[test]
    fn removed_pairs_with_following_added() {
        let hunks = vec![
            hunk(HunkKind::Unchanged, "a\n"),
            hunk(HunkKind::Removed, "b\n"),
            hunk(HunkKind::Added, "X\n"),
            hunk(HunkKind::Unchanged, "c\n"),
        ];
        let groups: Vec<_> = pair_hunks(&hunks).collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups[1],
            HunkGroup::Changed {
                removed: Some(&hunks[1]),
                added: Some(&hunks[2]),
            }
        );
    }

    #[test]
    fn unpaired_hunks_stand_alone() {
        let hunks = vec![
            hunk(HunkKind::Added, "new\n"),
            hunk(HunkKind::Unchanged, "a\n"),
            hunk(HunkKind::Removed, "gone\n"),
        ];
        let groups: Vec<_> = pair_hunks(&hunks).collect();
        assert_eq!(
            groups,
            vec![
                HunkGroup::Changed { removed: None, added: Some(&hunks[0]) },
                HunkGroup::Unchanged(&hunks[1]),
                HunkGroup::Changed { removed: Some(&hunks[2]), added: None },
            ]
        );
    }

    #[test]
    fn each_added_hunk_is_consumed_once() {
        let hunks = vec![
            hunk(HunkKind::Removed, "a\n"),
            hunk(HunkKind::Added, "b\n"),
            hunk(HunkKind::Added, "c\n"),
        ];
        let added_seen: usize = pair_hunks(&hunks)
            .map(|g| match g {
                HunkGroup::Changed { added: Some(_), .. } => 1,
                _ => 0,
            })
            .sum();
        assert_eq!(added_seen, 2);
        assert_eq!(pair_hunks(&hunks).count(), 2);
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(pair_hunks(&[]).count(), 0);
    }
}
