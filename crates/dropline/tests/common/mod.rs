//! In-memory inspector used by the integration tests.
//!
//! Owners hold ordered component lists; the first component of every owner
//! is its root (transform). The inspector shows one panel per component slot
//! of the inspected owners: panel 0 is the root panel with a large header,
//! hidden components produce culled panels.

#![allow(dead_code)]

use std::collections::BTreeMap;

use dropline::{
    ComponentRef, DragFeedback, DragSink, DropZone, ItemId, ItemOps, MarkerSurface, OwnerId,
    PanelList, Rect, ScriptRef,
};
use dropline_core::color::PackedRgba;

pub const PANEL_HEIGHT: u16 = 4;
pub const PANEL_WIDTH: u16 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: ItemId,
    pub type_name: String,
    pub hidden: bool,
}

/// A script type the host knows how to instantiate.
#[derive(Debug, Clone)]
pub struct ScriptType {
    /// Components sharing a group are mutually exclusive on one owner.
    pub exclusive_group: Option<&'static str>,
    /// Abstract scripts fail `warn_can_add`.
    pub is_abstract: bool,
}

#[derive(Debug, Default)]
pub struct Inspector {
    pub owners: BTreeMap<OwnerId, Vec<Component>>,
    pub inspected: Vec<OwnerId>,
    pub scripts: BTreeMap<String, ScriptType>,
    pub groups: BTreeMap<String, &'static str>,
    next_id: u64,

    pub feedback: DragFeedback,
    pub accepted: usize,
    pub consumed: usize,
    pub unwinds: usize,
    pub warnings: Vec<String>,
    pub fills: Vec<Rect>,
}

impl Inspector {
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// Add an owner with a root transform followed by `components`.
    pub fn add_owner(&mut self, owner: u64, components: &[&str]) -> OwnerId {
        let owner = OwnerId(owner);
        let mut list = vec![self.make("Transform")];
        for name in components {
            list.push(self.make(name));
        }
        self.owners.insert(owner, list);
        owner
    }

    pub fn inspect(&mut self, owners: &[OwnerId]) {
        self.inspected = owners.to_vec();
    }

    pub fn register_script(&mut self, name: &str, group: Option<&'static str>, is_abstract: bool) {
        self.scripts.insert(
            name.to_string(),
            ScriptType {
                exclusive_group: group,
                is_abstract,
            },
        );
        if let Some(group) = group {
            self.groups.insert(name.to_string(), group);
        }
    }

    /// Declare that an existing component type belongs to an exclusive group.
    pub fn set_group(&mut self, type_name: &str, group: &'static str) {
        self.groups.insert(type_name.to_string(), group);
    }

    pub fn hide(&mut self, owner: OwnerId, type_name: &str) {
        if let Some(list) = self.owners.get_mut(&owner) {
            for c in list.iter_mut().filter(|c| c.type_name == type_name) {
                c.hidden = true;
            }
        }
    }

    fn make(&mut self, type_name: &str) -> Component {
        self.next_id += 1;
        Component {
            id: ItemId(self.next_id),
            type_name: type_name.to_string(),
            hidden: false,
        }
    }

    /// Type names on `owner`, in order.
    pub fn order(&self, owner: OwnerId) -> Vec<String> {
        self.owners
            .get(&owner)
            .map(|l| l.iter().map(|c| c.type_name.clone()).collect())
            .unwrap_or_default()
    }

    /// The component ref for `type_name` on `owner`.
    pub fn component(&self, owner: OwnerId, type_name: &str) -> ComponentRef {
        let id = self.owners[&owner]
            .iter()
            .find(|c| c.type_name == type_name)
            .map(|c| c.id)
            .unwrap_or_else(|| panic!("{owner} has no {type_name}"));
        ComponentRef::new(id, owner)
    }

    /// One zone per panel, stacked from row 0, plus the trailing zone.
    pub fn zones(&self) -> Vec<DropZone> {
        let count = self.panel_count();
        let mut zones: Vec<DropZone> = (0..count)
            .filter(|&i| !self.should_cull_panel(i))
            .map(|i| {
                let y = i as u16 * PANEL_HEIGHT;
                DropZone::Panel {
                    index: i,
                    rect: Rect::new(0, y, PANEL_WIDTH, PANEL_HEIGHT),
                    marker_y: y + PANEL_HEIGHT,
                }
            })
            .collect();
        zones.push(DropZone::Bottom {
            rect: Rect::new(0, count as u16 * PANEL_HEIGHT, PANEL_WIDTH, 20),
        });
        zones
    }

    fn primary(&self) -> Option<&Vec<Component>> {
        self.inspected.first().and_then(|o| self.owners.get(o))
    }

    fn position(&self, item: ComponentRef) -> Option<usize> {
        self.owners
            .get(&item.owner)?
            .iter()
            .position(|c| c.id == item.id)
    }

    fn group_of(&self, type_name: &str) -> Option<&'static str> {
        self.groups.get(type_name).copied()
    }

    fn can_place(&self, source: ComponentRef, target: ComponentRef, above: bool) -> bool {
        if source.owner != target.owner || source.id == target.id {
            return false;
        }
        let (Some(_), Some(t)) = (self.position(source), self.position(target)) else {
            return false;
        };
        // Nothing goes above the root, and the root never moves.
        !(above && t == 0) && self.position(source) != Some(0)
    }

    fn place(&mut self, item: ComponentRef, target: ComponentRef, above: bool) {
        let Some(list) = self.owners.get_mut(&item.owner) else {
            return;
        };
        let Some(from) = list.iter().position(|c| c.id == item.id) else {
            return;
        };
        let moved = list.remove(from);
        let Some(t) = list.iter().position(|c| c.id == target.id) else {
            list.insert(from, moved);
            return;
        };
        let at = if above { t } else { t + 1 };
        list.insert(at, moved);
    }
}

impl PanelList for Inspector {
    fn panel_count(&self) -> usize {
        self.primary().map_or(0, Vec::len)
    }

    fn should_cull_panel(&self, index: usize) -> bool {
        self.primary()
            .and_then(|l| l.get(index))
            .is_some_and(|c| c.hidden)
    }

    fn has_large_header(&self, index: usize) -> bool {
        index == 0
    }

    fn panel_targets(&self, index: usize) -> Vec<ComponentRef> {
        self.inspected
            .iter()
            .filter_map(|o| {
                let c = self.owners.get(o)?.get(index)?;
                Some(ComponentRef::new(c.id, *o))
            })
            .collect()
    }
}

impl ItemOps for Inspector {
    fn move_single(
        &mut self,
        source: ComponentRef,
        target: ComponentRef,
        above: bool,
        validate_only: bool,
    ) -> bool {
        if !self.can_place(source, target, above) {
            return false;
        }
        if !validate_only {
            self.place(source, target, above);
        }
        true
    }

    fn move_batch(
        &mut self,
        sources: &[ComponentRef],
        targets: &[ComponentRef],
        above: bool,
        validate_only: bool,
    ) -> bool {
        // Every source needs a target on its own owner.
        let pairs: Vec<(ComponentRef, ComponentRef)> = sources
            .iter()
            .filter_map(|s| targets.iter().find(|t| t.owner == s.owner).map(|t| (*s, *t)))
            .collect();
        if pairs.len() != sources.len()
            || pairs.iter().any(|(s, t)| !self.can_place(*s, *t, above))
        {
            return false;
        }
        if !validate_only {
            for (s, t) in pairs {
                self.place(s, t, above);
            }
        }
        true
    }

    fn create_item_from_script(
        &mut self,
        owner: OwnerId,
        script: &ScriptRef,
    ) -> Option<ComponentRef> {
        let group = self.scripts.get(&script.type_name)?.exclusive_group;
        let list = self.owners.get(&owner)?;
        if let Some(group) = group
            && list.iter().any(|c| self.group_of(&c.type_name) == Some(group))
        {
            return None;
        }
        let component = self.make(&script.type_name);
        let item = ComponentRef::new(component.id, owner);
        self.owners.get_mut(&owner)?.push(component);
        Some(item)
    }

    fn move_relative_to(&mut self, item: ComponentRef, target: ComponentRef, above: bool) {
        if self.can_place(item, target, above) {
            self.place(item, target, above);
        }
    }

    fn warn_can_add(&mut self, owner: OwnerId, script: &ScriptRef) -> bool {
        let ok = self
            .scripts
            .get(&script.type_name)
            .is_some_and(|s| !s.is_abstract);
        if !ok {
            self.warnings.push(format!("{owner}: cannot add {script}"));
        }
        ok
    }
}

impl DragSink for Inspector {
    fn set_feedback(&mut self, feedback: DragFeedback) {
        self.feedback = feedback;
    }

    fn accept_drag(&mut self) {
        self.accepted += 1;
    }

    fn consume_event(&mut self) {
        self.consumed += 1;
    }

    fn request_unwind(&mut self) {
        self.unwinds += 1;
    }
}

impl MarkerSurface for Inspector {
    fn fill(&mut self, area: Rect, _color: PackedRgba) {
        self.fills.push(area);
    }
}
