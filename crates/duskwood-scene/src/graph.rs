use hashbrown::HashMap;

use crate::material::MaterialKind;
use crate::primitive::{Handle, Primitive};

/// Anything that can hold positioned primitives. The streaming core only talks to this.
pub trait Surface {
    fn insert(&mut self, primitive: Primitive) -> Handle;
    /// Returns `false` when the handle is unknown or was already removed.
    fn remove(&mut self, handle: Handle) -> bool;
}

/// In-memory scene graph keyed by handle.
pub struct SceneGraph {
    nodes: HashMap<Handle, Primitive>,
    next_id: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_handle(&mut self) -> Handle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        Handle(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains_key(&handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&Primitive> {
        self.nodes.get(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Primitive)> + '_ {
        self.nodes.iter().map(|(h, p)| (*h, p))
    }

    pub fn count_by_material(&self, kind: MaterialKind) -> usize {
        self.nodes.values().filter(|p| p.material == kind).count()
    }
}

impl Surface for SceneGraph {
    fn insert(&mut self, primitive: Primitive) -> Handle {
        let handle = self.alloc_handle();
        self.nodes.insert(handle, primitive);
        handle
    }

    fn remove(&mut self, handle: Handle) -> bool {
        self.nodes.remove(&handle).is_some()
    }
}
