use gtk::gdk;
use gtk4 as gtk;

pub const WINDOW_CLASS: &str = "ringshell-window";
pub const CANVAS_CLASS: &str = "ringshell-drawing-area";

/// The ring paints its own colors, so both the window and its canvas stay see-through.
fn stylesheet() -> String {
    format!(
        ".{WINDOW_CLASS}, .{CANVAS_CLASS} {{\n    background: none;\n    background-color: transparent;\n}}\n"
    )
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&stylesheet());

    match gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!("No display, transparent theme not loaded"),
    }
}
