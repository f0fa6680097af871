use easel_core::canvas::Selection;
use easel_core::generation::{GenerationPayload, ImageRef, Inpainting, Region, StickerPrompt};
use easel_core::{Error, Result};

use super::{Role, RoleBindings, TRACING_TARGET, single};

/// Binds the image, region shape, prompt sticker and connector.
///
/// The connector only records how the items were tied together; it adds
/// nothing to the payload. A shape that does not sit on the image, or a
/// connector that does not join the image and the sticker, is logged but
/// does not reject the selection.
pub(super) fn extract(selection: &Selection) -> Result<(RoleBindings, GenerationPayload)> {
    let partition = selection.partition();
    if partition.total != 4 {
        return Err(Error::malformed_selection().with_message(format!(
            "expected four items, found {}",
            partition.total
        )));
    }

    let image = single(&partition.images, "image")?;
    let shape = single(&partition.shapes, "shape")?;
    let note = single(&partition.stickers, "sticky note")?;
    let arrow = single(&partition.connectors, "connector")?;

    let mut bindings = RoleBindings::new();
    bindings.bind(Role::SourceImage, &image.id)?;
    bindings.bind(Role::RegionShape, &shape.id)?;
    bindings.bind(Role::PromptSticker, &note.id)?;
    bindings.bind(Role::ConnectingArrow, &arrow.id)?;

    if shape.overlaps.as_ref() != Some(&image.id) {
        tracing::warn!(
            target: TRACING_TARGET,
            shape = %shape.id,
            image = %image.id,
            "Region shape does not sit on the selected image"
        );
    }
    if !arrow.links(&image.id, &note.id) {
        tracing::warn!(
            target: TRACING_TARGET,
            connector = %arrow.id,
            "Connector does not join the image and the sticky note"
        );
    }

    let payload = Inpainting {
        source_image: ImageRef::from(image),
        region: Region::from(shape),
        prompt: StickerPrompt::from(note),
    };

    Ok((bindings, payload.into()))
}
