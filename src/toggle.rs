//! Collapsing and expanding a single comment.
//!
//! A toggle touches only the toggled comment's descendant block, and reports
//! which visible rows disappeared or appeared so the UI can animate a single
//! batched delete or insert instead of reloading the list.

use crate::error::{InvalidTarget, ThreadError};
use crate::visibility::{visible_in, ThreadView};

/// What happened to the toggled comment's replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisibility {
    Visible,
    Hidden,
}

/// Row changes produced by one toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Visible row of the toggled comment. It is never removed or inserted,
    /// but its disclosure state changed so it needs a reload.
    pub row: usize,
    /// Ascending visible rows that changed. For [`ChildVisibility::Hidden`]
    /// these are rows before the toggle (deletions); for
    /// [`ChildVisibility::Visible`] they are rows after it (insertions).
    pub affected_rows: Vec<usize>,
    pub child_visibility: ChildVisibility,
}

impl ToggleOutcome {
    /// Whether any row besides the toggled one changed.
    #[must_use]
    pub fn changes_rows(&self) -> bool {
        !self.affected_rows.is_empty()
    }
}

impl ThreadView {
    /// Flip the collapse flag of the comment at full-list `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::InvalidToggleTarget`] if `index` is out of range
    /// or the comment is hidden under a collapsed ancestor. The thread is left
    /// untouched in that case.
    pub fn toggle(&mut self, index: usize) -> Result<ToggleOutcome, ThreadError> {
        let len = self.list.len();
        if index >= len {
            return Err(ThreadError::InvalidToggleTarget {
                index,
                reason: InvalidTarget::OutOfRange { len },
            });
        }
        let Some(row) = self.visible_index_of(index) else {
            return Err(ThreadError::InvalidToggleTarget {
                index,
                reason: InvalidTarget::Hidden,
            });
        };

        let block = self.list.descendant_block(index);
        let collapsing = !self.list.nodes()[index].is_collapsed();
        self.list.set_collapsed(index, collapsing);

        // Shown descendants sit right after the toggled row, since the block
        // is contiguous and the projection is sorted.
        let first = row + 1;
        let outcome = if collapsing {
            let last = first + self.visible[first..].partition_point(|&i| i < block.end);
            self.visible.drain(first..last);
            ToggleOutcome {
                row,
                affected_rows: (first..last).collect(),
                child_visibility: ChildVisibility::Hidden,
            }
        } else {
            debug_assert!(
                self.visible.get(first).is_none_or(|&i| i >= block.end),
                "descendants of a collapsed comment must not be visible"
            );
            let shown = visible_in(&self.list, block);
            let count = shown.len();
            self.visible.splice(first..first, shown);
            ToggleOutcome {
                row,
                affected_rows: (first..first + count).collect(),
                child_visibility: ChildVisibility::Visible,
            }
        };

        tracing::debug!(
            index,
            row,
            collapsed = collapsing,
            affected = outcome.affected_rows.len(),
            "toggled comment"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Visibility;
    use crate::list::tests::list_from_depths;
    use crate::list::CommentList;
    use crate::visibility::visible_projection;

    fn scenario_list() -> CommentList {
        list_from_depths(&[0, 1, 2, 1])
    }

    fn ids(view: &ThreadView) -> Vec<String> {
        view.visible_projection().map(|n| n.id.clone()).collect()
    }

    /// Every toggle must leave the cached projection equal to a recompute.
    fn assert_consistent(view: &ThreadView) {
        assert_eq!(view.visible_indices(), visible_projection(view.list()).as_slice());
    }

    #[test]
    fn test_scenario_collapse_and_expand_root() {
        let mut view = ThreadView::new(scenario_list());

        let collapse = view.toggle(0).unwrap();
        assert_eq!(collapse.row, 0);
        assert_eq!(collapse.affected_rows, vec![1, 2, 3]);
        assert_eq!(collapse.child_visibility, ChildVisibility::Hidden);
        assert_eq!(ids(&view), vec!["1"]);

        let expand = view.toggle(0).unwrap();
        assert_eq!(expand.affected_rows, vec![1, 2, 3]);
        assert_eq!(expand.child_visibility, ChildVisibility::Visible);
        assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
        assert_consistent(&view);
    }

    #[test]
    fn test_scenario_nested_collapse_survives_root_round_trip() {
        let mut view = ThreadView::new(scenario_list());

        let inner = view.toggle(1).unwrap();
        assert_eq!(inner.affected_rows, vec![2]);
        assert_eq!(ids(&view), vec!["1", "2", "4"]);

        // "3" is already hidden, so only the rows of "2" and "4" go away.
        let outer = view.toggle(0).unwrap();
        assert_eq!(outer.affected_rows, vec![1, 2]);
        assert_eq!(ids(&view), vec!["1"]);

        let reopen = view.toggle(0).unwrap();
        assert_eq!(reopen.affected_rows, vec![1, 2]);
        assert_eq!(ids(&view), vec!["1", "2", "4"]);
        assert_eq!(view.visibility(1), Some(Visibility::VisibleCollapsed));
        assert_eq!(view.visibility(2), Some(Visibility::Hidden));
        assert_consistent(&view);
    }

    #[test]
    fn test_sibling_after_subtree_is_untouched() {
        // "4" is a second root here, outside the first root's block.
        let mut view = ThreadView::new(list_from_depths(&[0, 1, 2, 0]));
        view.toggle(1).unwrap();

        let outer = view.toggle(0).unwrap();
        assert_eq!(outer.affected_rows, vec![1]);
        assert_eq!(ids(&view), vec!["1", "4"]);
    }

    #[test]
    fn test_leaf_toggle_has_no_affected_rows() {
        let mut view = ThreadView::new(scenario_list());
        let outcome = view.toggle(2).unwrap();
        assert_eq!(outcome.row, 2);
        assert!(!outcome.changes_rows());
        assert_eq!(outcome.child_visibility, ChildVisibility::Hidden);
        assert_eq!(view.visibility(2), Some(Visibility::VisibleCollapsed));
        assert_eq!(view.visible_len(), 4);
    }

    #[test]
    fn test_toggle_hidden_target_is_rejected() {
        let mut view = ThreadView::new(scenario_list());
        view.toggle(1).unwrap();
        let before = view.visible_indices().to_vec();

        assert_eq!(
            view.toggle(2),
            Err(ThreadError::InvalidToggleTarget {
                index: 2,
                reason: InvalidTarget::Hidden
            })
        );
        assert_eq!(view.visible_indices(), before.as_slice());
        assert!(!view.list().get(2).unwrap().is_collapsed());
    }

    #[test]
    fn test_toggle_out_of_range_is_rejected() {
        let mut view = ThreadView::new(scenario_list());
        assert_eq!(
            view.toggle(4),
            Err(ThreadError::InvalidToggleTarget {
                index: 4,
                reason: InvalidTarget::OutOfRange { len: 4 }
            })
        );

        let mut empty = ThreadView::new(CommentList::default());
        assert!(empty.toggle(0).is_err());
    }

    #[test]
    fn test_affected_rows_are_relative_to_the_whole_projection() {
        let mut view = ThreadView::new(list_from_depths(&[0, 1, 0, 1, 2, 1, 0]));
        let outcome = view.toggle(2).unwrap();
        assert_eq!(outcome.row, 2);
        assert_eq!(outcome.affected_rows, vec![3, 4, 5]);
        assert_eq!(view.visible_indices(), &[0, 1, 2, 6]);
    }

    const DEPTHS: [usize; 9] = [0, 1, 2, 2, 1, 2, 3, 0, 1];

    fn flagged_view(mask: u32) -> ThreadView {
        let mut view = ThreadView::new(list_from_depths(&DEPTHS));
        for i in 0..DEPTHS.len() {
            if mask & (1 << i) != 0 {
                view.list.set_collapsed(i, true);
            }
        }
        view.visible = visible_projection(&view.list);
        view
    }

    /// Run `check` for every collapse-flag combination and every shown index.
    fn for_each_state(mut check: impl FnMut(ThreadView, usize)) {
        for mask in 0u32..(1 << DEPTHS.len()) {
            let view = flagged_view(mask);
            for &index in view.visible_indices() {
                check(view.clone(), index);
            }
        }
    }

    #[test]
    fn test_incremental_projection_matches_recompute() {
        for_each_state(|mut view, index| {
            view.toggle(index).unwrap();
            assert_consistent(&view);
        });
    }

    #[test]
    fn test_visible_count_is_monotonic() {
        for_each_state(|mut view, index| {
            let before = view.visible_len();
            let outcome = view.toggle(index).unwrap();
            match outcome.child_visibility {
                ChildVisibility::Hidden => {
                    assert_eq!(view.visible_len(), before - outcome.affected_rows.len());
                }
                ChildVisibility::Visible => {
                    assert_eq!(view.visible_len(), before + outcome.affected_rows.len());
                }
            }
        });
    }

    #[test]
    fn test_double_toggle_restores_projection() {
        for_each_state(|mut view, index| {
            let before = view.visible_indices().to_vec();
            let first = view.toggle(index).unwrap();
            let second = view.toggle(index).unwrap();
            assert_eq!(view.visible_indices(), before.as_slice());
            assert_eq!(first.affected_rows, second.affected_rows);
            assert_ne!(first.child_visibility, second.child_visibility);
        });
    }

    #[test]
    fn test_toggle_is_local_to_descendant_block() {
        for_each_state(|mut view, index| {
            let before: Vec<Option<Visibility>> =
                (0..DEPTHS.len()).map(|i| view.visibility(i)).collect();
            let block = view.list().descendant_block(index);
            view.toggle(index).unwrap();
            for i in (0..DEPTHS.len()).filter(|i| *i != index && !block.contains(i)) {
                assert_eq!(view.visibility(i), before[i], "index {i} changed");
            }
        });
    }

    #[test]
    fn test_affected_rows_name_exactly_the_changed_comments() {
        for_each_state(|mut view, index| {
            let before = view.visible_indices().to_vec();
            let outcome = view.toggle(index).unwrap();
            let after = view.visible_indices().to_vec();
            let (source, other) = match outcome.child_visibility {
                ChildVisibility::Hidden => (&before, &after),
                ChildVisibility::Visible => (&after, &before),
            };
            let changed: Vec<usize> = outcome.affected_rows.iter().map(|&r| source[r]).collect();
            let expected: Vec<usize> = source.iter().copied().filter(|i| !other.contains(i)).collect();
            assert_eq!(changed, expected);
        });
    }

    #[test]
    fn test_leaves_never_report_changes() {
        for_each_state(|mut view, index| {
            if view.list().has_children(index) {
                return;
            }
            assert!(!view.toggle(index).unwrap().changes_rows());
        });
    }
}
