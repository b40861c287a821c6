pub mod item;
pub mod layout;
pub mod model;
pub mod phase;
pub mod view;

pub use item::{MenuItem, TextureId};
pub use layout::{Placement, Ring};
pub use model::{DrawOutcome, Menu};
pub use phase::{Phase, Transition};
pub use view::Surface;

/// Below this distance progress and rotation snap to their targets.
pub const EPSILON: f64 = 1e-6;
pub const BEZEL_THICKNESS: f64 = 4.0;
pub const TILE_ROUNDING: f64 = 2.0;
pub const LABEL_SCALE: f64 = 0.5; // label font size relative to half the icon size
pub const LABEL_OFFSET: f64 = 0.6; // label top below the item center, in icon sizes
