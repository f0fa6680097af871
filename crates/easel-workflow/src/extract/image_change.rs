use easel_core::canvas::Selection;
use easel_core::generation::{GenerationPayload, ImageChange, ImageRef, StickerPrompt};
use easel_core::{Error, Result};

use super::{Role, RoleBindings, TRACING_TARGET, single};

/// Binds the image, the instruction sticker and the connector joining them.
pub(super) fn extract(selection: &Selection) -> Result<(RoleBindings, GenerationPayload)> {
    let partition = selection.partition();
    if partition.total != 3 {
        return Err(Error::malformed_selection().with_message(format!(
            "expected three items, found {}",
            partition.total
        )));
    }

    let image = single(&partition.images, "image")?;
    let note = single(&partition.stickers, "sticky note")?;
    let arrow = single(&partition.connectors, "connector")?;

    let mut bindings = RoleBindings::new();
    bindings.bind(Role::SourceImage, &image.id)?;
    bindings.bind(Role::PromptSticker, &note.id)?;
    bindings.bind(Role::ConnectingArrow, &arrow.id)?;

    if !arrow.links(&image.id, &note.id) {
        tracing::warn!(
            target: TRACING_TARGET,
            connector = %arrow.id,
            "Connector does not join the image and the sticky note"
        );
    }

    let payload = ImageChange {
        source_image: ImageRef::from(image),
        prompt: StickerPrompt::from(note),
    };

    Ok((bindings, payload.into()))
}
