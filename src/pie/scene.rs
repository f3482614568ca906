use super::geometry::Point;
use derive_more::{Display, From, Into};

/// Handle of an actor in the host scene graph. The widget itself and each of
/// its children are addressed by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("actor#{_0}")]
pub struct ActorId(u64);

impl ActorId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// What the widget needs to know about the tree it lives in.
pub trait SceneGraph {
    /// True when `actor` is `ancestor` or sits anywhere below it.
    fn is_within(&self, actor: ActorId, ancestor: ActorId) -> bool;

    /// Deepest descendant of `root` under `point` (in `root`'s local frame),
    /// not counting `root` itself.
    fn hit_descendant(&self, root: ActorId, point: Point) -> Option<ActorId>;
}

/// A scene with no children: nothing is a descendant and nothing is hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl SceneGraph for Detached {
    fn is_within(&self, actor: ActorId, ancestor: ActorId) -> bool {
        actor == ancestor
    }

    fn hit_descendant(&self, _root: ActorId, _point: Point) -> Option<ActorId> {
        None
    }
}
