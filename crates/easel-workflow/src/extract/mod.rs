//! Workflow extractors.
//!
//! An extractor runs after classification. It binds selected items to the
//! roles of the matched workflow and builds the payload of its backend call.
//! Extraction is all-or-nothing: if any expected item cannot be bound the
//! whole extraction fails with [`ErrorKind::MalformedSelection`] and no
//! payload is produced.
//!
//! [`ErrorKind::MalformedSelection`]: easel_core::ErrorKind::MalformedSelection

mod image_change;
mod inpainting;
mod stickers;
mod style_transfer;

use std::collections::BTreeMap;
use std::fmt;

use easel_core::canvas::{ObjectId, Selection};
use easel_core::generation::{GenerationPayload, WorkflowKind};
use easel_core::{Error, Result};
use serde::{Serialize, Serializer};

/// Tracing target for extraction.
pub const TRACING_TARGET: &str = "easel_workflow::extract";

/// Part an item plays in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    SourceImage,
    TargetContent,
    SourceStyle,
    PromptSticker,
    RegionShape,
    /// The connector that tied the other items together.
    ConnectingArrow,
    /// One sticky note of a stickers-to-image group, by position.
    PromptGroup(usize),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceImage => f.write_str("source_image"),
            Self::TargetContent => f.write_str("target_content"),
            Self::SourceStyle => f.write_str("source_style"),
            Self::PromptSticker => f.write_str("prompt_sticker"),
            Self::RegionShape => f.write_str("region_shape"),
            Self::ConnectingArrow => f.write_str("connecting_arrow"),
            Self::PromptGroup(index) => write!(f, "prompt_group[{index}]"),
        }
    }
}

/// Assignment of selected items to roles.
///
/// A role is bound at most once and an item fills at most one role.
/// Serializes as a map from role name to item identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleBindings {
    roles: BTreeMap<Role, ObjectId>,
}

impl RoleBindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to `role`.
    pub fn bind(&mut self, role: Role, id: &ObjectId) -> Result<()> {
        if let Some(bound) = self.roles.get(&role) {
            return Err(Error::malformed_selection().with_message(format!(
                "role {role} is already bound to item {bound}"
            )));
        }

        if let Some((other, _)) = self.roles.iter().find(|(_, bound)| *bound == id) {
            return Err(Error::malformed_selection().with_message(format!(
                "item {id} already plays role {other}"
            )));
        }

        self.roles.insert(role, id.clone());
        Ok(())
    }

    /// Returns the item bound to `role`.
    pub fn get(&self, role: Role) -> Option<&ObjectId> {
        self.roles.get(&role)
    }

    /// Iterates over bindings in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &ObjectId)> {
        self.roles.iter().map(|(role, id)| (*role, id))
    }

    /// Number of bound roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if no role is bound.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns true if every bound item belongs to `selection`.
    pub fn all_within(&self, selection: &Selection) -> bool {
        self.roles.values().all(|id| selection.contains(id))
    }
}

impl Serialize for RoleBindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.roles.iter().map(|(role, id)| (role.to_string(), id)))
    }
}

/// Role bindings and payload extracted for one matched workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub kind: WorkflowKind,
    pub bindings: RoleBindings,
    pub payload: GenerationPayload,
}

/// Extracts the payload of `kind` from a selection it was matched against.
pub fn extract(kind: WorkflowKind, selection: &Selection) -> Result<Extraction> {
    let result = match kind {
        WorkflowKind::StickersToImage => stickers::extract(selection),
        WorkflowKind::Inpainting => inpainting::extract(selection),
        WorkflowKind::ImageChange => image_change::extract(selection),
        WorkflowKind::StyleTransfer => style_transfer::extract(selection),
    };

    let (bindings, payload) = result.map_err(|error| error.with_context(kind.description()))?;

    tracing::debug!(
        target: TRACING_TARGET,
        workflow = %kind,
        roles = bindings.len(),
        "Selection extracted"
    );

    Ok(Extraction {
        kind,
        bindings,
        payload,
    })
}

/// Returns the single item of a partition list.
fn single<'a, T>(items: &[&'a T], what: &str) -> Result<&'a T> {
    match items {
        [item] => Ok(*item),
        [] => Err(Error::malformed_selection().with_message(format!("no {what} selected"))),
        _ => Err(Error::malformed_selection().with_message(format!(
            "expected one {what}, found {}",
            items.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use easel_core::ErrorKind;
    use easel_test::fixtures::{connector, image, sticky_note};

    use super::*;

    #[test]
    fn test_role_cannot_be_bound_twice() {
        let mut bindings = RoleBindings::new();
        bindings.bind(Role::SourceImage, &"1".into()).unwrap();

        let error = bindings.bind(Role::SourceImage, &"2".into()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
        assert_eq!(bindings.get(Role::SourceImage), Some(&ObjectId::from("1")));
    }

    #[test]
    fn test_item_cannot_fill_two_roles() {
        let mut bindings = RoleBindings::new();
        bindings.bind(Role::SourceStyle, &"1".into()).unwrap();

        let error = bindings.bind(Role::TargetContent, &"1".into()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::ConnectingArrow.to_string(), "connecting_arrow");
        assert_eq!(Role::PromptGroup(2).to_string(), "prompt_group[2]");
    }

    #[test]
    fn test_bindings_serialize_by_role_name() {
        let mut bindings = RoleBindings::new();
        bindings.bind(Role::PromptGroup(0), &"7".into()).unwrap();
        bindings.bind(Role::SourceImage, &"1".into()).unwrap();

        let json = serde_json::to_value(&bindings).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "source_image": "1", "prompt_group[0]": "7" })
        );
    }

    #[test]
    fn test_bindings_reference_the_selection() {
        let selection = Selection::new(vec![
            image("1"),
            sticky_note("2", "turn into line art"),
            connector("3", "1", "2"),
        ]);

        let extraction = extract(WorkflowKind::ImageChange, &selection).unwrap();
        assert!(extraction.bindings.all_within(&selection));
        assert_eq!(extraction.payload.kind(), WorkflowKind::ImageChange);
    }

    #[test]
    fn test_mismatched_selection_is_malformed() {
        let selection = Selection::new(vec![sticky_note("1", "a cat")]);

        let error = extract(WorkflowKind::StyleTransfer, &selection).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedSelection);
        assert_eq!(error.context.as_deref(), Some("image style transfer"));
    }
}
