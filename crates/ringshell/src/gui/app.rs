use crate::config::{self, Settings};
use crate::events::AppEvent;
use crate::gui::host::{self, MenuHost};
use crate::gui::{theme, window};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringmenu::{KeyCode, Size};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub host: Rc<RefCell<MenuHost>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Confirmed(usize),
    Closed,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn key_code(key: gtk::gdk::Key) -> Option<KeyCode> {
    key.name().map(|name| KeyCode::new(name.as_str()))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Settings, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Ring"),
            #[watch]
            set_visible: model.visible,
            add_css_class: theme::WINDOW_CLASS,
            set_decorated: false,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: theme::CANVAS_CLASS,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (settings, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let host = Rc::new(RefCell::new(MenuHost::new(settings)));

        let model = AppModel {
            host: host.clone(),
            visible: false,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let keys = gtk::EventControllerKey::new();
        {
            let host = host.clone();
            keys.connect_key_pressed(move |_, key, _, _| {
                if let Some(code) = key_code(key) {
                    host.borrow_mut().key_pressed(code);
                }
                glib::Propagation::Stop
            });
        }
        {
            let host = host.clone();
            keys.connect_key_released(move |_, key, _, _| {
                if let Some(code) = key_code(key) {
                    host.borrow_mut().key_released(&code);
                }
            });
        }
        root.add_controller(keys);

        {
            let host = host.clone();
            let sender = sender.clone();
            widgets
                .drawing_area
                .set_draw_func(move |_, cr, width, height| {
                    let size = Size::new(f64::from(width), f64::from(height));
                    match host.borrow_mut().draw(cr, size) {
                        Ok(outcome) => {
                            if outcome.confirmed
                                && let Some(index) = outcome.selected
                            {
                                sender.input(AppMsg::Confirmed(index));
                            }
                        }
                        Err(e) => log::error!("Drawing error: {}", e),
                    }
                });
        }

        {
            let host = host.clone();
            let sender = sender.clone();
            widgets
                .drawing_area
                .add_tick_callback(move |area, clock| {
                    let mut host = host.borrow_mut();
                    let was_open = !host.menu.is_closed();
                    host.tick(clock.frame_time());
                    if was_open && host.menu.is_closed() {
                        sender.input(AppMsg::Closed);
                    }
                    area.queue_draw();
                    glib::ControlFlow::Continue
                });
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => self.hide(),
            AppMsg::Toggle => {
                if self.visible && !self.host.borrow().menu.is_closed() {
                    self.hide();
                } else {
                    self.show();
                }
            }
            AppMsg::Confirmed(index) => {
                let host = self.host.borrow();
                match host.entry(index) {
                    Some(entry) => host::activate(entry),
                    None => log::warn!("Confirmed item {} no longer exists", index),
                }
            }
            AppMsg::Closed => {
                self.visible = false;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(settings) => {
                    let mut host = self.host.borrow_mut();
                    host.apply(settings);
                    if host.menu.is_closed() {
                        self.visible = false;
                    }
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn show(&mut self) {
        if self.host.borrow_mut().open() {
            self.visible = true;
            self.drawing_area.queue_draw();
        } else if self.host.borrow().menu.is_empty() {
            log::warn!("Nothing to show, the menu has no items");
        }
    }

    /// Starts the closing animation. The window goes away once it finishes.
    fn hide(&mut self) {
        let mut host = self.host.borrow_mut();
        host.close();
        if host.menu.is_closed() {
            self.visible = false;
        }
    }
}
