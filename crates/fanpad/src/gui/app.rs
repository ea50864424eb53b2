use crate::config::ConfigSources;
use crate::events::AppEvent;
use crate::gui::theme::ThemeColors;
use crate::gui::view::{self, FanState};
use fanmenu::{Bounds, Outcome, TouchEvent, TouchKind};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const IDLE_HINT: &str = "Press and hold anywhere to open the menu";
const OPEN_HINT: &str = "Drag onto an icon and release to choose it";

const STYLE: &str = "
.fanpad-surface { background-color: transparent; }
.fanpad-status { padding: 8px; }
";

pub struct AppModel {
    pub state: Rc<RefCell<FanState>>,
    pub sources: ConfigSources,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(TouchEvent),
    /// Frame clock time in microseconds.
    Tick(i64),
    Cancel,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        FanState,
        ConfigSources,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fanpad"),
            set_default_width: 540,
            set_default_height: 960,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Cancel);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                gtk::Label {
                    add_css_class: "fanpad-status",
                    #[watch]
                    set_label: &model.status,
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "fanpad-surface",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Touch(TouchEvent::down(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Touch(TouchEvent::moved(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Touch(TouchEvent::up(x + dx, y + dy)));
                            }
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, sources, rx) = init;

        relm4::set_global_css(STYLE);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            sources,
            status: IDLE_HINT.to_string(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = view::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_tick = sender.clone();
        let state_tick = model.state.clone();
        widgets.drawing_area.add_tick_callback(move |_, clock| {
            let animating = state_tick
                .try_borrow()
                .is_ok_and(|state| state.session.is_animating());
            if animating {
                sender_tick.input(AppMsg::Tick(clock.frame_time()));
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Touch(event) => {
                let bounds = Bounds::new(
                    f64::from(self.drawing_area.width()),
                    f64::from(self.drawing_area.height()),
                );
                let result = self.state.borrow_mut().session.handle(event, bounds);
                match result {
                    Ok(response) => {
                        if let Some(outcome) = response.outcome {
                            self.report(outcome);
                        } else if event.kind == TouchKind::Down {
                            self.status = OPEN_HINT.to_string();
                        }
                        if response.should_redraw {
                            self.drawing_area.queue_draw();
                        }
                    }
                    Err(e) => {
                        log::error!("Menu not shown: {}", e);
                        self.status = format!("Menu unavailable: {e}");
                    }
                }
            }
            AppMsg::Tick(frame_time) => {
                let now = Duration::from_micros(u64::try_from(frame_time).unwrap_or_default());
                if self.state.borrow_mut().session.tick(now) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Cancel => {
                let dismissed = self.state.borrow_mut().session.cancel();
                if let Some(outcome) = dismissed {
                    self.report(outcome);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match self.sources.load() {
                Ok(new_config) => {
                    let dismissed = self.state.borrow_mut().apply_config(&new_config);
                    if let Some(outcome) = dismissed {
                        self.report(outcome);
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
    fn report(&mut self, outcome: Outcome) {
        log::info!("Fan menu result: {:?}", outcome);
        self.status = match outcome {
            Outcome::Selected(i) => format!("Selected item {}", i + 1),
            Outcome::Dismissed => "Nothing selected".to_string(),
        };
    }
}
