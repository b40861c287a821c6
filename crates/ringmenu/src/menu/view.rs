use super::item::{MenuItem, TextureId};
use super::layout::Ring;
use super::model::Menu;
use super::{BEZEL_THICKNESS, LABEL_OFFSET, LABEL_SCALE, TILE_ROUNDING};
use crate::config::{Color, Colors, Config, quantize_alpha};
use crate::geometry::{Point, Rect, Size};
use palette::Srgba;

/// Drawing primitives provided by the host, in screen pixels. Later calls draw on top.
pub trait Surface {
    type Error;

    fn viewport(&self) -> Size;

    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Srgba<f64>,
        rounding: f64,
    ) -> Result<(), Self::Error>;

    fn image(&mut self, texture: TextureId, rect: Rect, alpha: f64) -> Result<(), Self::Error>;

    /// `origin` is the top-left corner of the text's bounding box.
    fn text(
        &mut self,
        origin: Point,
        font_size: f64,
        color: Srgba<f64>,
        text: &str,
    ) -> Result<(), Self::Error>;

    fn measure_text(&self, text: &str, font_size: f64) -> Size;

    fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Srgba<f64>,
        thickness: f64,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    Selected,
    Idle,
}

impl ItemState {
    fn resolve(selected: bool) -> Self {
        if selected { Self::Selected } else { Self::Idle }
    }

    fn label_color(&self, colors: &Colors) -> Color {
        match self {
            Self::Selected => colors.selected_label,
            Self::Idle => colors.default_label,
        }
    }

    /// Fill and glyph colors of the placeholder tile. The selected tile swaps them.
    fn tile_colors(&self, colors: &Colors) -> (Color, Color) {
        let light = colors.default_label;
        let dark = light.inverted();
        match self {
            Self::Selected => (light, dark),
            Self::Idle => (dark, light),
        }
    }
}

struct ItemRenderer<'a> {
    item: &'a MenuItem,
    config: &'a Config,
    center: Point,
    alpha: f64,
    state: ItemState,
}

impl<'a> ItemRenderer<'a> {
    fn new(
        item: &'a MenuItem,
        config: &'a Config,
        center: Point,
        alpha: f64,
        selected: bool,
    ) -> Self {
        Self {
            item,
            config,
            center,
            alpha,
            state: ItemState::resolve(selected),
        }
    }

    fn half_size(&self) -> f64 {
        self.config.icon_size * 0.5
    }

    fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        match self.item.icon {
            Some(texture) => self.draw_icon(surface, texture)?,
            None => self.draw_tile(surface)?,
        }
        self.draw_label(surface)
    }

    fn draw_icon<S: Surface>(&self, surface: &mut S, texture: TextureId) -> Result<(), S::Error> {
        let rect = Rect::centered(self.center, self.half_size());
        surface.image(texture, rect, quantize_alpha(self.alpha))
    }

    fn draw_tile<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let half = self.half_size();
        let (fill, glyph) = self.state.tile_colors(&self.config.colors);

        surface.fill_rect(
            Rect::centered(self.center, half),
            fill.with_alpha(self.alpha),
            TILE_ROUNDING,
        )?;

        let Some(initial) = self.item.initial() else {
            return Ok(());
        };
        let text = initial.to_string();
        let size = surface.measure_text(&text, half);
        surface.text(
            self.center.offset(-size.width * 0.5, -size.height * 0.5),
            half,
            glyph.with_alpha(self.alpha),
            &text,
        )
    }

    fn draw_label<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let font_size = self.half_size() * LABEL_SCALE;
        let size = surface.measure_text(&self.item.label, font_size);
        let color = self.state.label_color(&self.config.colors);
        surface.text(
            Point::new(
                self.center.x - size.width * 0.5,
                self.center.y + self.config.icon_size * LABEL_OFFSET,
            ),
            font_size,
            color.with_alpha(self.alpha),
            &self.item.label,
        )
    }
}

pub fn draw<S: Surface>(surface: &mut S, menu: &Menu) -> Result<(), S::Error> {
    let config = menu.config();
    let ring = Ring::from_viewport(surface.viewport(), config);
    let count = menu.len();

    for (i, item) in menu.items().iter().enumerate() {
        let placement = ring.place(i, count, menu.progress(), menu.current_angle());
        ItemRenderer::new(
            item,
            config,
            placement.center,
            placement.alpha,
            menu.selected() == Some(i),
        )
        .draw(surface)?;
    }

    draw_bezel(surface, ring.anchor(menu.progress()), config, menu.progress())
}

/// Four L-shaped corners framing the cell at `anchor`.
fn draw_bezel<S: Surface>(
    surface: &mut S,
    anchor: Point,
    config: &Config,
    alpha: f64,
) -> Result<(), S::Error> {
    let half = config.icon_size * 0.5;
    let arm = half * 0.5;
    let color = config.colors.bezel.with_alpha(alpha);

    let left = anchor.x - half - BEZEL_THICKNESS;
    let right = anchor.x + half + BEZEL_THICKNESS - 1.0;
    let top = anchor.y - half - BEZEL_THICKNESS;
    let bottom = anchor.y + half + BEZEL_THICKNESS - 1.0;

    // (corner, direction the arms point in)
    let corners = [
        (Point::new(left, top), (1.0, 1.0)),
        (Point::new(right, top), (-1.0, 1.0)),
        (Point::new(left, bottom), (1.0, -1.0)),
        (Point::new(right, bottom), (-1.0, -1.0)),
    ];

    for (corner, (dx, dy)) in corners {
        surface.line(corner, corner.offset(dx * arm, 0.0), color, BEZEL_THICKNESS)?;
        surface.line(corner, corner.offset(0.0, dy * arm), color, BEZEL_THICKNESS)?;
    }
    Ok(())
}
