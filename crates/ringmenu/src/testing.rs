use crate::geometry::{Point, Rect, Size};
use crate::menu::{Surface, TextureId};
use palette::Srgba;
use std::convert::Infallible;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rect {
        rect: Rect,
        color: Srgba<f64>,
        rounding: f64,
    },
    Image {
        texture: TextureId,
        rect: Rect,
        alpha: f64,
    },
    Text {
        origin: Point,
        font_size: f64,
        color: Srgba<f64>,
        text: String,
    },
    Line {
        from: Point,
        to: Point,
        color: Srgba<f64>,
        thickness: f64,
    },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
            Self::Line { .. } => "line",
        }
    }

    pub fn alpha(&self) -> f64 {
        match self {
            Self::Rect { color, .. } | Self::Text { color, .. } | Self::Line { color, .. } => {
                color.alpha
            }
            Self::Image { alpha, .. } => *alpha,
        }
    }
}

/// Surface that records every call. Text is measured as a fixed-pitch font.
pub struct RecordingSurface {
    pub viewport: Size,
    pub commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn text_width(text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * 0.5
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Srgba<f64>,
        rounding: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(Command::Rect {
            rect,
            color,
            rounding,
        });
        Ok(())
    }

    fn image(&mut self, texture: TextureId, rect: Rect, alpha: f64) -> Result<(), Infallible> {
        self.commands.push(Command::Image {
            texture,
            rect,
            alpha,
        });
        Ok(())
    }

    fn text(
        &mut self,
        origin: Point,
        font_size: f64,
        color: Srgba<f64>,
        text: &str,
    ) -> Result<(), Infallible> {
        self.commands.push(Command::Text {
            origin,
            font_size,
            color,
            text: text.to_string(),
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        Size::new(Self::text_width(text, font_size), font_size)
    }

    fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Srgba<f64>,
        thickness: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(Command::Line {
            from,
            to,
            color,
            thickness,
        });
        Ok(())
    }
}
