use crate::config::{self, ItemConfig, Settings};
use crate::gui::surface::{CairoSurface, TextureStore};
use crate::icon;
use crate::launch;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use ringmenu::{Action, DrawOutcome, KeyCode, KeyLatch, Menu, MenuItem, Size};

const ICON_PIXELS: i32 = 256;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// The menu plus everything the GTK callbacks share to drive it.
pub struct MenuHost {
    pub menu: Menu,
    latch: KeyLatch,
    textures: TextureStore,
    entries: Vec<ItemConfig>,
    last_frame: Option<i64>,
}

impl MenuHost {
    pub fn new(settings: Settings) -> Self {
        let mut host = Self {
            menu: Menu::new(settings.menu.clone()),
            latch: KeyLatch::new(),
            textures: TextureStore::default(),
            entries: Vec::new(),
            last_frame: None,
        };
        host.apply(settings);
        host
    }

    /// Replaces config and items. Icons are looked up again and an open menu is shut.
    pub fn apply(&mut self, settings: Settings) {
        self.menu.clear();
        self.textures.clear();
        icon::refresh_cache();

        self.menu.set_config(settings.menu);
        for entry in &settings.items {
            let mut item = MenuItem::new(entry.label.as_str());
            if let Some(pixbuf) = entry.icon.as_ref().and_then(load_icon) {
                item = item.with_icon(self.textures.insert(pixbuf));
            }
            self.menu.add(item);
        }
        self.entries = settings.items;
    }

    pub fn key_pressed(&mut self, key: KeyCode) {
        self.latch.press(key);
    }

    pub fn key_released(&mut self, key: &KeyCode) {
        self.latch.release(key);
    }

    /// Opens the menu. Returns `false` when there is nothing to show.
    pub fn open(&mut self) -> bool {
        self.latch.reset();
        self.last_frame = None;
        self.menu.trigger(Action::Open);
        !self.menu.is_closed()
    }

    pub fn close(&mut self) {
        self.menu.trigger(Action::Close);
    }

    /// Advances the animation to the frame clock time, in microseconds.
    pub fn tick(&mut self, frame_time: i64) {
        let delta = self
            .last_frame
            .map(|last| (frame_time - last) as f64 / MICROS_PER_SECOND)
            .unwrap_or(0.0);
        self.last_frame = Some(frame_time);
        self.menu.update(delta);
    }

    pub fn draw(&mut self, cr: &Context, size: Size) -> Result<DrawOutcome, cairo::Error> {
        let mut surface = CairoSurface::new(cr, size, &self.textures);
        let outcome = self.menu.draw(&self.latch, &mut surface);
        self.latch.end_frame();
        outcome
    }

    pub fn entry(&self, index: usize) -> Option<&ItemConfig> {
        self.entries.get(index)
    }
}

fn load_icon(name: &icon::IconName) -> Option<Pixbuf> {
    let path = icon::find_icon_path(name)?;
    Pixbuf::from_file_at_scale(&path, ICON_PIXELS, ICON_PIXELS, true)
        .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
        .ok()
}

/// Runs whatever the confirmed entry points at.
pub fn activate(entry: &ItemConfig) {
    if entry.is_setup() {
        match config::write_default_config() {
            Ok(path) => {
                if let Err(e) = std::process::Command::new("xdg-open").arg(&path).spawn() {
                    log::error!("Failed to open {}: {}", path.display(), e);
                }
            }
            Err(e) => log::error!("Failed to write default config: {}", e),
        }
        return;
    }

    match &entry.exec {
        Some(exec) => {
            if let Err(e) = launch::spawn(exec) {
                log::error!("Failed to run '{}': {}", entry.label, e);
            }
        }
        None => log::info!("'{}' has nothing to run", entry.label),
    }
}
