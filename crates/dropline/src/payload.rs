#![forbid(unsafe_code)]

//! Drag payload model.
//!
//! The host hands the resolver the set of objects under the pointer as a
//! closed set of tagged variants. Classification pattern-matches on the tag;
//! nothing downstream inspects runtime types.

use std::fmt;

/// Identity of an item (a component instance) in the host's object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// Identity of the object that owns a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// A component instance: an item attached to an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub id: ItemId,
    pub owner: OwnerId,
}

impl ComponentRef {
    /// Create a new component reference.
    #[must_use]
    pub const fn new(id: ItemId, owner: OwnerId) -> Self {
        Self { id, owner }
    }
}

/// A reference to a script type from which new components can be created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptRef {
    /// Fully qualified type name of the script's component class.
    pub type_name: String,
}

impl ScriptRef {
    /// Create a script reference.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

/// One object referenced by a drag payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DraggedObject {
    /// A component instance.
    ///
    /// `is_root` marks the distinguished component every owner carries (the
    /// transform); it can never be reordered.
    Component { item: ComponentRef, is_root: bool },
    /// A script reference.
    Script(ScriptRef),
    /// Anything else (assets, owners, files).
    Other,
}

impl DraggedObject {
    /// A reorderable, non-root component.
    #[must_use]
    pub const fn component(item: ComponentRef) -> Self {
        Self::Component {
            item,
            is_root: false,
        }
    }

    /// The owner's root component.
    #[must_use]
    pub const fn root_component(item: ComponentRef) -> Self {
        Self::Component {
            item,
            is_root: true,
        }
    }

    /// A script reference.
    #[must_use]
    pub fn script(type_name: impl Into<String>) -> Self {
        Self::Script(ScriptRef::new(type_name))
    }
}

/// The objects currently being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// Nothing is referenced (e.g. a file path or plain text drag).
    #[default]
    Empty,
    /// One or more referenced objects, in drag order.
    Items(Vec<DraggedObject>),
}

impl Payload {
    /// Build a payload from objects; an empty list becomes [`Payload::Empty`].
    #[must_use]
    pub fn from_objects(objects: Vec<DraggedObject>) -> Self {
        if objects.is_empty() {
            Self::Empty
        } else {
            Self::Items(objects)
        }
    }

    /// Referenced objects (empty slice for [`Payload::Empty`]).
    #[must_use]
    pub fn objects(&self) -> &[DraggedObject] {
        match self {
            Self::Empty => &[],
            Self::Items(objects) => objects,
        }
    }

    /// Number of referenced objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    /// Returns true if nothing is referenced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    /// Components in the payload, in drag order. Root components are skipped.
    pub fn components(&self) -> impl Iterator<Item = ComponentRef> + '_ {
        self.objects().iter().filter_map(|o| match o {
            DraggedObject::Component {
                item,
                is_root: false,
            } => Some(*item),
            _ => None,
        })
    }

    /// Scripts in the payload, in drag order.
    pub fn scripts(&self) -> impl Iterator<Item = &ScriptRef> + '_ {
        self.objects().iter().filter_map(|o| match o {
            DraggedObject::Script(script) => Some(script),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(id: u64, owner: u64) -> ComponentRef {
        ComponentRef::new(ItemId(id), OwnerId(owner))
    }

    #[test]
    fn from_objects_empty_is_empty_variant() {
        assert_eq!(Payload::from_objects(Vec::new()), Payload::Empty);
        assert!(Payload::Empty.is_empty());
        assert_eq!(Payload::Empty.len(), 0);
    }

    #[test]
    fn components_skip_roots_and_scripts() {
        let p = Payload::from_objects(vec![
            DraggedObject::component(comp(1, 9)),
            DraggedObject::root_component(comp(2, 9)),
            DraggedObject::script("Mover"),
            DraggedObject::component(comp(3, 9)),
        ]);
        let ids: Vec<_> = p.components().map(|c| c.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
        let scripts: Vec<_> = p.scripts().map(|s| s.type_name.as_str()).collect();
        assert_eq!(scripts, vec!["Mover"]);
    }

    #[test]
    fn display_ids() {
        assert_eq!(ItemId(4).to_string(), "item#4");
        assert_eq!(OwnerId(7).to_string(), "owner#7");
        assert_eq!(ScriptRef::new("Spin").to_string(), "Spin");
    }
}
