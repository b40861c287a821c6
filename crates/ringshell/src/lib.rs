pub mod config;
pub mod events;
pub mod gui;
pub mod icon;
pub mod launch;
pub mod macros;
pub mod sys;
