//! Model loading and symbolic reference resolution.

use std::path::Path;

use crate::entity::{ApiEntity, EntityKind, EntityPath};

/// Failed to load or validate an API model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// I/O error reading the model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed model JSON.
    #[error("malformed model: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level entity was not a model root.
    #[error("model root has kind {kind}, expected Model")]
    InvalidRoot {
        /// Kind found at the top level.
        kind: EntityKind,
    },
}

/// A resolved symbolic reference: the target entity plus its hierarchy path.
#[derive(Clone, Debug)]
pub struct EntityHit<'a> {
    /// The resolved entity.
    pub entity: &'a ApiEntity,
    /// The resolved entity's hierarchy path, for link derivation.
    pub path: EntityPath,
}

/// The API model: a validated entity tree rooted at a [`EntityKind::Model`]
/// entity. Read-only input to the page generator.
#[derive(Clone, Debug)]
pub struct ApiModel {
    root: ApiEntity,
}

impl ApiModel {
    /// Wrap a root entity.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRoot`] if the entity is not a model root.
    pub fn new(root: ApiEntity) -> Result<Self, ModelError> {
        if root.kind != EntityKind::Model {
            return Err(ModelError::InvalidRoot { kind: root.kind });
        }
        Ok(Self { root })
    }

    /// Parse a model from its JSON serialization.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let root: ApiEntity = serde_json::from_str(json)?;
        Self::new(root)
    }

    /// Load a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The model root entity.
    pub fn root(&self) -> &ApiEntity {
        &self.root
    }

    /// Navigate to the entity at the given hierarchy path.
    pub fn entity_at(&self, path: &EntityPath) -> Option<&ApiEntity> {
        let mut current = &self.root;
        for seg in path.segments() {
            current = current.members.iter().find(|m| {
                m.kind == seg.kind && m.name == seg.name && m.overload_index == seg.overload_index
            })?;
        }
        Some(current)
    }

    /// Resolve a symbolic cross-reference, scoped by the entity whose doc
    /// comment contains it.
    ///
    /// The reference is a dotted member path (e.g. `Widget.render`), with an
    /// optional trailing `:N` overload selector. Resolution tries the
    /// context entity's own scope first, then each enclosing scope outward,
    /// ending at the model root; the first hit wins, so references may
    /// resolve to siblings (including sibling overloads).
    ///
    /// # Errors
    ///
    /// Returns a human-readable failure message. Resolution failures are
    /// recoverable for callers: the offending link is omitted, not fatal.
    pub fn resolve_reference(
        &self,
        reference: &str,
        context: &EntityPath,
    ) -> Result<EntityHit<'_>, String> {
        let (parts, selector) = parse_reference(reference)
            .ok_or_else(|| format!("malformed reference '{reference}' in {context}"))?;

        let mut scope = Some(context.clone());
        while let Some(scope_path) = scope {
            if let Some(scope_entity) = self.entity_at(&scope_path) {
                if let Some(hit) = resolve_in(scope_entity, &scope_path, &parts, selector) {
                    return Ok(hit);
                }
            }
            scope = scope_path.parent();
        }
        Err(format!("unresolved reference '{reference}' in {context}"))
    }
}

/// Split a reference into dotted name parts and an optional `:N` overload
/// selector on the final part. Returns `None` for empty references.
fn parse_reference(reference: &str) -> Option<(Vec<&str>, Option<u32>)> {
    let (path_part, selector) = match reference.rsplit_once(':') {
        Some((head, tail)) => (head, Some(tail.parse().ok()?)),
        None => (reference, None),
    };
    if path_part.is_empty() {
        return None;
    }
    let parts: Vec<&str> = path_part.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some((parts, selector))
}

/// Walk the dotted parts down from one scope entity.
fn resolve_in<'a>(
    scope: &'a ApiEntity,
    scope_path: &EntityPath,
    parts: &[&str],
    selector: Option<u32>,
) -> Option<EntityHit<'a>> {
    let mut current = scope;
    let mut path = scope_path.clone();
    for (i, part) in parts.iter().enumerate() {
        let sel = if i == parts.len() - 1 { selector } else { None };
        let chain = find_member(current, part, sel)?;
        for entity in chain {
            path = path.join(entity);
            current = entity;
        }
    }
    Some(EntityHit {
        entity: current,
        path,
    })
}

/// Find a member by name, looking through entry-point grouping levels.
///
/// Returns the chain of entities traversed (entry point included when one
/// was looked through) so the caller can extend the hierarchy path.
fn find_member<'a>(
    parent: &'a ApiEntity,
    name: &str,
    selector: Option<u32>,
) -> Option<Vec<&'a ApiEntity>> {
    for member in &parent.members {
        if member.kind == EntityKind::EntryPoint {
            if let Some(mut chain) = find_member(member, name, selector) {
                chain.insert(0, member);
                return Some(chain);
            }
        } else if member.name == name && overload_matches(member.overload_index, selector) {
            return Some(vec![member]);
        }
    }
    None
}

/// Overload indices 0 and 1 both mean "first overload".
fn overload_matches(index: u32, selector: Option<u32>) -> bool {
    match selector {
        None => true,
        Some(n) => index == n || (n <= 1 && index <= 1),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_model() -> ApiModel {
        let mut render_1 = ApiEntity::new(EntityKind::Method, "render");
        render_1.overload_index = 1;
        let mut render_2 = ApiEntity::new(EntityKind::Method, "render");
        render_2.overload_index = 2;

        let mut widget = ApiEntity::new(EntityKind::Class, "Widget");
        widget.members = vec![render_1, render_2];

        let helper = ApiEntity::new(EntityKind::Function, "helper");

        let mut entry = ApiEntity::new(EntityKind::EntryPoint, "");
        entry.members = vec![widget, helper];

        let mut pkg = ApiEntity::new(EntityKind::Package, "toolkit");
        pkg.members = vec![entry];

        let mut root = ApiEntity::new(EntityKind::Model, "model");
        root.members = vec![pkg];
        ApiModel::new(root).unwrap()
    }

    fn widget_path(model: &ApiModel) -> EntityPath {
        let pkg = &model.root().members[0];
        let entry = &pkg.members[0];
        let widget = &entry.members[0];
        EntityPath::root().join(pkg).join(entry).join(widget)
    }

    #[test]
    fn test_new_rejects_non_model_root() {
        let err = ApiModel::new(ApiEntity::new(EntityKind::Package, "pkg")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRoot { .. }));
    }

    #[test]
    fn test_resolve_from_root_through_entry_point() {
        let model = sample_model();
        let hit = model
            .resolve_reference("toolkit.helper", &EntityPath::root())
            .unwrap();
        assert_eq!(hit.entity.name, "helper");
        // Path includes the entry-point grouping level.
        assert_eq!(hit.path.segments().len(), 3);
        assert_eq!(hit.path.segments()[1].kind, EntityKind::EntryPoint);
    }

    #[test]
    fn test_resolve_sibling_from_member_context() {
        let model = sample_model();
        let context = widget_path(&model);
        // "helper" is not a member of Widget; resolution walks outward.
        let hit = model.resolve_reference("helper", &context).unwrap();
        assert_eq!(hit.entity.kind, EntityKind::Function);
    }

    #[test]
    fn test_resolve_member_from_class_context() {
        let model = sample_model();
        let context = widget_path(&model);
        let hit = model.resolve_reference("render", &context).unwrap();
        assert_eq!(hit.entity.overload_index, 1);
    }

    #[test]
    fn test_resolve_overload_selector() {
        let model = sample_model();
        let context = widget_path(&model);
        let hit = model.resolve_reference("render:2", &context).unwrap();
        assert_eq!(hit.entity.overload_index, 2);
    }

    #[test]
    fn test_resolve_failure_is_message() {
        let model = sample_model();
        let err = model
            .resolve_reference("NoSuchThing", &EntityPath::root())
            .unwrap_err();
        assert!(err.contains("NoSuchThing"));
    }

    #[test]
    fn test_malformed_reference() {
        let model = sample_model();
        assert!(
            model
                .resolve_reference("", &EntityPath::root())
                .is_err()
        );
        assert!(
            model
                .resolve_reference("a..b", &EntityPath::root())
                .is_err()
        );
    }

    #[test]
    fn test_entity_at_root() {
        let model = sample_model();
        let root = model.entity_at(&EntityPath::root()).unwrap();
        assert_eq!(root.kind, EntityKind::Model);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "kind": "model",
            "name": "model",
            "members": [
                {
                    "kind": "package",
                    "name": "toolkit",
                    "members": [
                        {
                            "kind": "entryPoint",
                            "name": "",
                            "members": [
                                { "kind": "function", "name": "helper" }
                            ]
                        }
                    ]
                }
            ]
        }"#;
        let model = ApiModel::from_json_str(json).unwrap();
        let hit = model
            .resolve_reference("toolkit.helper", &EntityPath::root())
            .unwrap();
        assert_eq!(hit.entity.kind, EntityKind::Function);
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{ "kind": "gadget", "name": "x" }"#;
        assert!(matches!(
            ApiModel::from_json_str(json),
            Err(ModelError::Json(_))
        ));
    }
}
