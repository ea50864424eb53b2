use crate::error::FanError;
use crate::geometry::{Bounds, GeometryConfig, Point};
use crate::menu::MenuSpec;
use crate::surface::{FanSurface, ItemTransform, Lifecycle};
use crate::timeline::AnimationTiming;
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum TouchKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub point: Point,
}

impl TouchEvent {
    pub fn new(kind: TouchKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            point: Point::new(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(TouchKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(TouchKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(TouchKind::Up, x, y)
    }
}

/// Result of a finished gesture, reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Selected(usize),
    Dismissed,
}

impl Outcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Selected(i) => Some(*i),
            Self::Dismissed => None,
        }
    }
}

impl From<Option<usize>> for Outcome {
    fn from(selection: Option<usize>) -> Self {
        selection.map_or(Self::Dismissed, Self::Selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub should_redraw: bool,
    pub outcome: Option<Outcome>,
}

impl Response {
    fn redraw(should_redraw: bool) -> Self {
        Self {
            should_redraw,
            outcome: None,
        }
    }

    fn finished(outcome: Outcome) -> Self {
        Self {
            should_redraw: true,
            outcome: Some(outcome),
        }
    }
}

/// Routes a single finger's events to a gesture-scoped [`FanSurface`].
///
/// The surface lives from Down to Up (or [`MenuSession::cancel`]); menu,
/// timing and geometry changes apply from the next Down.
pub struct MenuSession {
    menu: MenuSpec,
    timing: AnimationTiming,
    geometry: GeometryConfig,
    surface: Option<FanSurface>,
    clock_origin: Option<Duration>,
}

impl MenuSession {
    pub fn new(menu: MenuSpec, timing: AnimationTiming, geometry: GeometryConfig) -> Self {
        Self {
            menu,
            timing,
            geometry,
            surface: None,
            clock_origin: None,
        }
    }

    pub fn handle(&mut self, event: TouchEvent, bounds: Bounds) -> Result<Response, FanError> {
        match event.kind {
            TouchKind::Down => self.begin(event.point, bounds),
            TouchKind::Move => Ok(Response::redraw(
                self.surface
                    .as_mut()
                    .is_some_and(|surface| surface.update_touch(event.point)),
            )),
            TouchKind::Up => Ok(self
                .surface
                .take()
                .map(|mut surface| Response::finished(Outcome::from(surface.commit())))
                .unwrap_or_default()),
        }
    }

    fn begin(&mut self, point: Point, bounds: Bounds) -> Result<Response, FanError> {
        let stray = self.cancel();
        if stray.is_some() {
            log::warn!("Touch down while a fan was still open, dismissing it");
        }

        let surface = FanSurface::begin(
            point,
            bounds,
            self.menu.clone(),
            self.timing,
            &self.geometry,
        )
        .inspect_err(|e| log::warn!("Fan not shown: {}", e))?;

        self.surface = Some(surface);
        self.clock_origin = None;

        Ok(Response {
            should_redraw: true,
            outcome: stray,
        })
    }

    /// Host frame clock. The first tick after Down marks t = 0.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let origin = *self.clock_origin.get_or_insert(now);
        surface.advance(now.saturating_sub(origin))
    }

    /// Tears down the live fan without a selection. Returns `Dismissed` only
    /// if there was one.
    pub fn cancel(&mut self) -> Option<Outcome> {
        self.clock_origin = None;
        self.surface.take().map(|mut surface| {
            surface.cancel();
            Outcome::Dismissed
        })
    }

    pub fn frame(&self) -> Vec<ItemTransform> {
        self.surface
            .as_ref()
            .map(FanSurface::frame)
            .unwrap_or_default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.surface
            .as_ref()
            .map_or(Lifecycle::Idle, FanSurface::lifecycle)
    }

    pub fn surface(&self) -> Option<&FanSurface> {
        self.surface.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// Whether the host frame clock still has work to do.
    pub fn is_animating(&self) -> bool {
        self.lifecycle() == Lifecycle::Animating
    }

    pub fn menu(&self) -> &MenuSpec {
        &self.menu
    }

    pub fn set_menu(&mut self, menu: MenuSpec) {
        self.menu = menu;
    }

    pub fn set_timing(&mut self, timing: AnimationTiming) {
        self.timing = timing;
    }

    pub fn set_geometry(&mut self, geometry: GeometryConfig) {
        self.geometry = geometry;
    }
}
