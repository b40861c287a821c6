pub mod config;
pub mod geometry;
pub mod input;
pub mod menu;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Color, Colors, Config, KeyBindings, ParseColorError};
pub use geometry::{Point, Rect, Size};
pub use input::{Action, Input, KeyCode, KeyLatch};
pub use menu::{DrawOutcome, Menu, MenuItem, Phase, Surface, TextureId};
