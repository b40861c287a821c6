use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use ringmenu::{Point, Rect, Size, Surface, TextureId};
use palette::Srgba;
use std::f64::consts::PI;

const FONT_FACE: &str = "Sans";

/// Pixbufs handed to the menu as [`TextureId`]s.
#[derive(Default)]
pub struct TextureStore {
    pixbufs: Vec<Pixbuf>,
}

impl TextureStore {
    pub fn insert(&mut self, pixbuf: Pixbuf) -> TextureId {
        self.pixbufs.push(pixbuf);
        TextureId::new(self.pixbufs.len() as u64 - 1)
    }

    pub fn get(&self, id: TextureId) -> Option<&Pixbuf> {
        self.pixbufs.get(id.get() as usize)
    }

    pub fn clear(&mut self) {
        self.pixbufs.clear();
    }
}

pub struct CairoSurface<'a> {
    cr: &'a Context,
    size: Size,
    textures: &'a TextureStore,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, size: Size, textures: &'a TextureStore) -> Self {
        Self { cr, size, textures }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn set_font(&self, font_size: f64) {
        self.cr
            .select_font_face(FONT_FACE, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        self.cr.set_font_size(font_size);
    }

    fn rounded_rect(&self, rect: Rect, rounding: f64) {
        let r = rounding.min(rect.width() * 0.5).min(rect.height() * 0.5).max(0.0);
        let (x0, y0, x1, y1) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);

        self.cr.new_sub_path();
        self.cr.arc(x1 - r, y0 + r, r, -PI * 0.5, 0.0);
        self.cr.arc(x1 - r, y1 - r, r, 0.0, PI * 0.5);
        self.cr.arc(x0 + r, y1 - r, r, PI * 0.5, PI);
        self.cr.arc(x0 + r, y0 + r, r, PI, PI * 1.5);
        self.cr.close_path();
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn viewport(&self) -> Size {
        self.size
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Srgba<f64>,
        rounding: f64,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.rounded_rect(rect, rounding);
        self.cr.fill()
    }

    fn image(&mut self, texture: TextureId, rect: Rect, alpha: f64) -> Result<(), cairo::Error> {
        let Some(pixbuf) = self.textures.get(texture) else {
            log::warn!("Unknown texture {}", texture);
            return Ok(());
        };

        // stretch the pixbuf over the cell
        let (sx, sy) = (
            rect.width() / f64::from(pixbuf.width()),
            rect.height() / f64::from(pixbuf.height()),
        );

        self.cr.save()?;
        self.cr.translate(rect.min.x, rect.min.y);
        self.cr.scale(sx, sy);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint_with_alpha(alpha)?;
        self.cr.restore()
    }

    fn text(
        &mut self,
        origin: Point,
        font_size: f64,
        color: Srgba<f64>,
        text: &str,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.set_font(font_size);
        // cairo places text by its baseline
        let ascent = self.cr.font_extents()?.ascent();
        self.cr.move_to(origin.x, origin.y + ascent);
        self.cr.show_text(text)
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        self.set_font(font_size);
        match (self.cr.text_extents(text), self.cr.font_extents()) {
            (Ok(text_ext), Ok(font_ext)) => Size::new(text_ext.x_advance(), font_ext.height()),
            _ => Size::new(0.0, font_size),
        }
    }

    fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Srgba<f64>,
        thickness: f64,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.set_line_width(thickness);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }
}
