pub mod animation;
pub mod geometry;
pub mod hit;
pub mod interaction;
pub mod radial;
pub mod scene;
pub mod style;
pub mod view;
pub mod widget;

pub use animation::{AnimationController, Easing, Frame};
pub use geometry::Point;
pub use hit::{Hit, HitTester};
pub use interaction::{InteractionController, SelectionState};
pub use radial::{RadialConfig, RadialError};
pub use scene::{ActorId, SceneGraph};
pub use style::{Color, PieStyle};
pub use view::{Painter, draw};
pub use widget::{ChildPlacement, PieMenu};

pub const FULL_CIRCLE: f64 = 360.0;
pub const DEFAULT_RADIUS: f64 = 150.0;
pub const DEFAULT_ANIMATION_SECONDS: f64 = 0.4; // full sweep, scaled down for partial ones
