pub mod error;
pub mod geometry;
pub mod hit;
pub mod menu;
pub mod session;
pub mod surface;
pub mod timeline;

pub use error::{ConfigIssue, FanError};
pub use geometry::{Bounds, GeometryConfig, Point};
pub use hit::{HitTester, HitUpdate};
pub use menu::{IconId, IconSize, MenuItem, MenuSpec};
pub use session::{MenuSession, Outcome, Response, TouchEvent, TouchKind};
pub use surface::{FanSurface, ItemSlot, ItemTransform, Lifecycle};
pub use timeline::{AnimWindow, AnimationTiming, Timeline, TimelineState};
