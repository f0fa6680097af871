//! Selection classification.
//!
//! Classification only looks at how many items of each type are selected.
//! Rules are checked in [`WorkflowKind::PRIORITY`] order and the first rule
//! that holds wins, so a selection always maps to at most one workflow even
//! if two rules were ever to overlap.

use easel_core::canvas::{Selection, SelectionCounts};
use easel_core::generation::WorkflowKind;
use serde::{Deserialize, Serialize};

/// Tracing target for classification.
pub const TRACING_TARGET: &str = "easel_workflow::classify";

/// Result of classifying a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "match", content = "workflow", rename_all = "snake_case")]
pub enum WorkflowMatch {
    /// The selection does not correspond to any supported workflow.
    NoMatch,
    /// The selection has the shape of this workflow.
    Matched(WorkflowKind),
}

impl WorkflowMatch {
    /// Returns the matched workflow, if any.
    pub fn workflow(&self) -> Option<WorkflowKind> {
        match self {
            Self::NoMatch => None,
            Self::Matched(kind) => Some(*kind),
        }
    }
}

/// Classifies a selection snapshot.
pub fn classify(selection: &Selection) -> WorkflowMatch {
    let counts = selection.counts();
    let result = classify_counts(counts);

    tracing::debug!(
        target: TRACING_TARGET,
        images = counts.images,
        stickers = counts.stickers,
        connectors = counts.connectors,
        shapes = counts.shapes,
        unsupported = counts.unsupported,
        total = counts.total,
        workflow = ?result.workflow(),
        "Selection classified"
    );

    result
}

/// Classifies per-type counts.
pub fn classify_counts(counts: SelectionCounts) -> WorkflowMatch {
    WorkflowKind::PRIORITY
        .into_iter()
        .find(|kind| rule_holds(*kind, counts))
        .map_or(WorkflowMatch::NoMatch, WorkflowMatch::Matched)
}

/// Returns true if the counts satisfy the selection rule of `kind`.
pub fn rule_holds(kind: WorkflowKind, counts: SelectionCounts) -> bool {
    let SelectionCounts {
        images,
        stickers,
        connectors,
        shapes,
        total,
        ..
    } = counts;

    match kind {
        WorkflowKind::StickersToImage => stickers > 0 && stickers == total,
        WorkflowKind::Inpainting => {
            total == 4 && images == 1 && stickers == 1 && connectors == 1 && shapes == 1
        }
        WorkflowKind::ImageChange => {
            total == 3 && images == 1 && stickers == 1 && connectors == 1
        }
        WorkflowKind::StyleTransfer => total == 3 && images == 2 && connectors == 1,
    }
}

#[cfg(test)]
mod tests {
    use easel_test::fixtures::{connector, image, shape, sticky_note, unsupported};

    use super::*;

    fn counts(images: usize, stickers: usize, connectors: usize, shapes: usize) -> SelectionCounts {
        SelectionCounts {
            images,
            stickers,
            connectors,
            shapes,
            unsupported: 0,
            total: images + stickers + connectors + shapes,
        }
    }

    /// Every count combination with up to `max` items of each type.
    fn all_counts(max: usize) -> impl Iterator<Item = SelectionCounts> {
        (0..=max).flat_map(move |i| {
            (0..=max).flat_map(move |s| {
                (0..=max).flat_map(move |c| (0..=max).map(move |r| counts(i, s, c, r)))
            })
        })
    }

    #[test]
    fn test_sticker_only_selections() {
        for stickers in 1..=12 {
            assert_eq!(
                classify_counts(counts(0, stickers, 0, 0)),
                WorkflowMatch::Matched(WorkflowKind::StickersToImage)
            );
        }
    }

    #[test]
    fn test_each_rule_has_exactly_its_shape() {
        for counts in all_counts(4) {
            let expected = match (counts.images, counts.stickers, counts.connectors, counts.shapes)
            {
                (0, s, 0, 0) if s > 0 => Some(WorkflowKind::StickersToImage),
                (1, 1, 1, 1) => Some(WorkflowKind::Inpainting),
                (1, 1, 1, 0) => Some(WorkflowKind::ImageChange),
                (2, 0, 1, 0) => Some(WorkflowKind::StyleTransfer),
                _ => None,
            };
            assert_eq!(classify_counts(counts).workflow(), expected, "{counts:?}");
        }
    }

    #[test]
    fn test_rules_are_disjoint() {
        for counts in all_counts(4) {
            let holding = WorkflowKind::PRIORITY
                .into_iter()
                .filter(|kind| rule_holds(*kind, counts))
                .count();
            assert!(holding <= 1, "{counts:?} satisfies {holding} rules");
        }
    }

    #[test]
    fn test_empty_selection_is_no_match() {
        assert_eq!(classify(&Selection::default()), WorkflowMatch::NoMatch);
    }

    #[test]
    fn test_near_misses_are_no_match() {
        let cases = [
            // image and sticker without a connector
            vec![image("1"), sticky_note("2", "line art")],
            // two images without a connector
            vec![image("1"), image("2"), shape("3", None)],
            // inpainting shape with an extra sticker
            vec![
                image("1"),
                shape("2", Some("1")),
                sticky_note("3", "remove background"),
                sticky_note("4", "no blur"),
                connector("5", "1", "3"),
            ],
            // stickers plus one image
            vec![sticky_note("1", "a cat"), image("2")],
            // style transfer with an extra connector
            vec![
                image("1"),
                image("2"),
                connector("3", "1", "2"),
                connector("4", "2", "1"),
            ],
        ];

        for objects in cases {
            let selection = Selection::new(objects);
            assert_eq!(classify(&selection), WorkflowMatch::NoMatch, "{selection:?}");
        }
    }

    #[test]
    fn test_unsupported_item_breaks_every_rule() {
        let matching = [
            vec![sticky_note("1", "a cat"), sticky_note("2", "no blur")],
            vec![
                image("1"),
                shape("2", Some("1")),
                sticky_note("3", "remove background"),
                connector("4", "1", "3"),
            ],
            vec![
                image("1"),
                sticky_note("2", "turn into line art"),
                connector("3", "1", "2"),
            ],
            vec![image("1"), image("2"), connector("3", "1", "2")],
        ];

        for (objects, kind) in matching.into_iter().zip(WorkflowKind::PRIORITY) {
            let selection = Selection::new(objects.clone());
            assert_eq!(classify(&selection), WorkflowMatch::Matched(kind));

            for tag in ["text", "frame", "card"] {
                let mut objects = objects.clone();
                objects.push(unsupported("9", tag));
                let selection = Selection::new(objects);

                assert_eq!(selection.counts().unsupported, 1);
                assert_eq!(classify(&selection), WorkflowMatch::NoMatch, "{kind} + {tag}");
            }
        }
    }

    #[test]
    fn test_unsupported_items_alone_are_no_match() {
        let selection = Selection::new(vec![unsupported("1", "text"), unsupported("2", "frame")]);
        assert_eq!(classify(&selection), WorkflowMatch::NoMatch);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let selection = Selection::new(vec![
            image("1"),
            sticky_note("2", "turn into line art"),
            connector("3", "1", "2"),
        ]);

        let first = classify(&selection);
        let second = classify(&selection);
        assert_eq!(first, second);
        assert_eq!(first, WorkflowMatch::Matched(WorkflowKind::ImageChange));
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = Selection::new(vec![
            image("1"),
            shape("2", Some("1")),
            sticky_note("3", "remove background"),
            connector("4", "1", "3"),
        ]);
        let reversed: Selection = forward.iter().rev().cloned().collect();

        assert_eq!(classify(&forward), classify(&reversed));
        assert_eq!(
            classify(&reversed),
            WorkflowMatch::Matched(WorkflowKind::Inpainting)
        );
    }
}
