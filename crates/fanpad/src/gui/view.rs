use super::icons::IconSet;
use crate::config::Config;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use fanmenu::{IconSize, ItemTransform, MenuSession, Outcome};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

/// Everything the draw function needs, shared between the component and the
/// drawing area.
pub struct FanState {
    pub session: MenuSession,
    pub icons: IconSet,
    pub background: Option<Srgba<f64>>,
}

impl FanState {
    pub fn from_config(config: &Config) -> Self {
        let icons = IconSet::load(&config.icons);
        Self {
            session: MenuSession::new(icons.menu().clone(), config.timing, config.geometry),
            icons,
            background: config.background.map(|c| c.0),
        }
    }

    /// Swaps in a reloaded config. An open fan is dismissed because its
    /// bitmaps are about to be replaced.
    pub fn apply_config(&mut self, config: &Config) -> Option<Outcome> {
        let dismissed = self.session.cancel();
        self.icons = IconSet::load(&config.icons);
        self.session.set_menu(self.icons.menu().clone());
        self.session.set_timing(config.timing);
        self.session.set_geometry(config.geometry);
        self.background = config.background.map(|c| c.0);
        dismissed
    }
}

struct ItemRenderer<'a> {
    transform: &'a ItemTransform,
    pixbuf: Option<&'a Pixbuf>,
    size: IconSize,
}

impl<'a> ItemRenderer<'a> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if self.transform.selected {
            self.draw_highlight(cr, colors)?;
        }
        match self.pixbuf {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => self.draw_placeholder(cr, colors),
        }
    }

    fn radius(&self) -> f64 {
        self.size.radius() * self.transform.scale
    }

    fn draw_highlight(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.selected.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.arc(
            self.transform.center.x,
            self.transform.center.y,
            self.radius() * 1.1,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let (w, h) = (f64::from(pixbuf.width()), f64::from(pixbuf.height()));

        cr.save()?;
        cr.translate(self.transform.center.x, self.transform.center.y);
        cr.scale(self.transform.scale, self.transform.scale);
        cr.set_source_pixbuf(pixbuf, -w / 2.0, -h / 2.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_placeholder(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.placeholder.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.arc(
            self.transform.center.x,
            self.transform.center.y,
            self.radius(),
            0.0,
            2.0 * PI,
        );
        cr.fill()?;

        let label = (self.transform.index + 1).to_string();
        let (r, g, b, a) = colors.label.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.radius() * 0.8);
        if let Ok(ext) = cr.text_extents(&label) {
            cr.move_to(
                self.transform.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.transform.center.y + ext.height() / 2.0,
            );
            cr.show_text(&label)?;
        }
        Ok(())
    }
}

pub fn draw(cr: &Context, state: &FanState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if !state.session.is_active() {
        return Ok(());
    }

    if let Some(background) = state.background {
        let (r, g, b, a) = background.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.paint()?;
    }

    for transform in state.session.frame() {
        ItemRenderer {
            transform: &transform,
            pixbuf: state.icons.pixbuf(transform.index),
            size: state.icons.size(transform.index),
        }
        .draw(cr, colors)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanmenu::{Bounds, TouchEvent};
    use std::path::PathBuf;

    #[test]
    fn test_reload_dismisses_open_fan() {
        let mut state = FanState::from_config(&Config::default());
        state
            .session
            .handle(TouchEvent::down(540.0, 1800.0), Bounds::new(1080.0, 1920.0))
            .unwrap();

        let reloaded = Config {
            icons: vec![PathBuf::from("/nonexistent/a.png"); 3],
            ..Config::default()
        };
        assert_eq!(state.apply_config(&reloaded), Some(Outcome::Dismissed));
        assert!(!state.session.is_active());
        assert_eq!(state.session.menu().len(), 3);
        assert_eq!(state.apply_config(&reloaded), None);
    }
}
