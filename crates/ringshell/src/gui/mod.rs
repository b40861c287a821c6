pub mod app;
pub mod host;
pub mod surface;
pub mod theme;
pub mod window;
