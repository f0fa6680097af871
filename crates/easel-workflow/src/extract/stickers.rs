use easel_core::canvas::Selection;
use easel_core::generation::{GenerationPayload, StickerPrompt, StickersToImage};
use easel_core::{Error, Result};

use super::{Role, RoleBindings};

/// Collects every sticky note, in selection order, as one prompt group.
pub(super) fn extract(selection: &Selection) -> Result<(RoleBindings, GenerationPayload)> {
    let partition = selection.partition();
    if partition.stickers.is_empty() {
        return Err(Error::malformed_selection().with_message("no sticky note selected"));
    }
    if partition.stickers.len() != partition.total {
        return Err(
            Error::malformed_selection().with_message("selection holds items other than stickers")
        );
    }

    let mut bindings = RoleBindings::new();
    for (index, note) in partition.stickers.iter().enumerate() {
        bindings.bind(Role::PromptGroup(index), &note.id)?;
    }

    let prompts = partition
        .stickers
        .iter()
        .map(|note| StickerPrompt::from(*note))
        .collect();

    Ok((bindings, StickersToImage { prompts }.into()))
}

#[cfg(test)]
mod tests {
    use easel_core::canvas::{CanvasObject, StickyColor, StickyNote};
    use easel_core::generation::WorkflowKind;
    use easel_test::fixtures::sticky_note;

    use super::*;
    use crate::extract;

    fn prompt_texts(payload: &GenerationPayload) -> Vec<String> {
        match payload {
            GenerationPayload::StickersToImage(payload) => {
                payload.texts().map(str::to_owned).collect()
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_collects_every_sticker_text() {
        let selection = Selection::new(vec![
            sticky_note("1", "a cat, photorealistic"),
            sticky_note("2", "no blur"),
        ]);

        let extraction = extract(WorkflowKind::StickersToImage, &selection).unwrap();
        let mut texts = prompt_texts(&extraction.payload);
        texts.sort();
        assert_eq!(texts, ["a cat, photorealistic", "no blur"]);
        assert_eq!(extraction.bindings.len(), 2);
    }

    #[test]
    fn test_keeps_selection_order() {
        let selection = Selection::new(vec![
            sticky_note("9", "third"),
            sticky_note("3", "first"),
            sticky_note("5", "second"),
        ]);

        let extraction = extract(WorkflowKind::StickersToImage, &selection).unwrap();
        assert_eq!(prompt_texts(&extraction.payload), ["third", "first", "second"]);
        assert_eq!(
            extraction.bindings.get(Role::PromptGroup(0)),
            Some(&"9".into())
        );
    }

    #[test]
    fn test_carries_color_untouched() {
        let note: CanvasObject = StickyNote::new("1", "no blur")
            .with_color(StickyColor::Red)
            .into();

        let extraction =
            extract(WorkflowKind::StickersToImage, &Selection::new(vec![note])).unwrap();
        let GenerationPayload::StickersToImage(payload) = extraction.payload else {
            panic!("expected a stickers payload");
        };
        assert_eq!(payload.prompts[0].color, StickyColor::Red);
    }
}
