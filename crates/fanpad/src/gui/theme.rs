use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgba, WithAlpha};

/// Paint colours taken from the active GTK theme.
pub struct ThemeColors {
    pub selected: Srgba<f64>,
    pub placeholder: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let named = |name: &str| context.lookup_color(name).map(to_srgba);

        Self {
            selected: named("theme_selected_bg_color")
                .unwrap_or(Srgba::new(0.4, 0.4, 0.8, 1.0))
                .with_alpha(0.6),
            placeholder: named("theme_bg_color")
                .unwrap_or(Srgba::new(0.15, 0.15, 0.15, 1.0))
                .with_alpha(0.85),
            label: named("theme_fg_color").unwrap_or(Srgba::new(1.0, 1.0, 1.0, 1.0)),
        }
    }
}

fn to_srgba(c: gtk::gdk::RGBA) -> Srgba<f64> {
    Srgba::new(c.red(), c.green(), c.blue(), c.alpha()).into_format()
}
