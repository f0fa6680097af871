use easel_core::canvas::{Image, ObjectId, Selection};
use easel_core::generation::{GenerationPayload, ImageRef, StyleTransfer};
use easel_core::{Error, Result};

use super::{Role, RoleBindings, single};

/// Resolves the connector's endpoints to the two images.
///
/// The image at the connector's start provides the style and the image at
/// its end provides the content. Images are looked up by identifier, so the
/// order in which the board reported them is irrelevant.
pub(super) fn extract(selection: &Selection) -> Result<(RoleBindings, GenerationPayload)> {
    let partition = selection.partition();
    if partition.total != 3 || partition.images.len() != 2 {
        return Err(
            Error::malformed_selection().with_message("expected two images and one connector")
        );
    }

    let arrow = single(&partition.connectors, "connector")?;
    let (Some(start), Some(end)) = (&arrow.start, &arrow.end) else {
        return Err(Error::malformed_selection()
            .with_message(format!("connector {} is not attached at both ends", arrow.id)));
    };
    if start == end {
        return Err(Error::malformed_selection()
            .with_message(format!("connector {} starts and ends on {start}", arrow.id)));
    }

    let style = resolve(&partition.images, start)?;
    let content = resolve(&partition.images, end)?;

    let mut bindings = RoleBindings::new();
    bindings.bind(Role::SourceStyle, &style.id)?;
    bindings.bind(Role::TargetContent, &content.id)?;
    bindings.bind(Role::ConnectingArrow, &arrow.id)?;

    let payload = StyleTransfer {
        source_style: ImageRef::from(style),
        target_content: ImageRef::from(content),
    };

    Ok((bindings, payload.into()))
}

fn resolve<'a>(images: &[&'a Image], id: &ObjectId) -> Result<&'a Image> {
    images
        .iter()
        .copied()
        .find(|image| &image.id == id)
        .ok_or_else(|| {
            Error::malformed_selection()
                .with_message(format!("connector endpoint {id} is not a selected image"))
        })
}

#[cfg(test)]
mod tests {
    use easel_core::ErrorKind;
    use easel_core::canvas::Connector;
    use easel_core::generation::WorkflowKind;
    use easel_test::fixtures::{connector, image};

    use super::*;
    use crate::extract;

    fn roles(selection: &Selection) -> (String, String) {
        let extraction = extract(WorkflowKind::StyleTransfer, selection).unwrap();
        let GenerationPayload::StyleTransfer(payload) = extraction.payload else {
            panic!("expected a style transfer payload");
        };
        (
            payload.source_style.id.to_string(),
            payload.target_content.id.to_string(),
        )
    }

    #[test]
    fn test_roles_follow_connector_direction() {
        let selection = Selection::new(vec![image("1"), image("2"), connector("3", "2", "1")]);
        assert_eq!(roles(&selection), ("2".to_owned(), "1".to_owned()));
    }

    #[test]
    fn test_roles_ignore_selection_order() {
        let orders = [
            vec![image("1"), image("2"), connector("3", "2", "1")],
            vec![image("2"), image("1"), connector("3", "2", "1")],
            vec![connector("3", "2", "1"), image("1"), image("2")],
            vec![image("2"), connector("3", "2", "1"), image("1")],
        ];

        for objects in orders {
            assert_eq!(
                roles(&Selection::new(objects)),
                ("2".to_owned(), "1".to_owned())
            );
        }
    }

    #[test]
    fn test_unattached_connector_is_malformed() {
        let selection = Selection::new(vec![
            image("1"),
            image("2"),
            Connector::detached("3").into(),
        ]);

        let error = extract(WorkflowKind::StyleTransfer, &selection).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
    }

    #[test]
    fn test_endpoint_outside_selection_is_malformed() {
        let selection = Selection::new(vec![image("1"), image("2"), connector("3", "7", "1")]);

        let error = extract(WorkflowKind::StyleTransfer, &selection).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
    }

    #[test]
    fn test_self_loop_is_malformed() {
        let selection = Selection::new(vec![image("1"), image("2"), connector("3", "1", "1")]);

        let error = extract(WorkflowKind::StyleTransfer, &selection).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
    }
}
