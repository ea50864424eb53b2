use crate::error::{ConfigIssue, FanError};
use crate::geometry::{self, Bounds, GeometryConfig, Point};
use crate::hit::HitTester;
use crate::menu::{MenuItem, MenuSpec};
use crate::timeline::{self, AnimWindow, AnimationTiming, Timeline};
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Lifecycle {
    Idle,
    Animating,
    Interactive,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSlot {
    pub angle_start: f64,
    pub angle_width: f64,
    pub anim: AnimWindow,
}

impl ItemSlot {
    /// First item is offset by half a slot so its icon sits centred in it.
    pub fn center_angle(&self) -> f64 {
        self.angle_start + self.angle_width / 2.0
    }
}

/// Where and how large to paint one icon. `rotation` is in degrees from the
/// vertical through the far corner, growing towards the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub index: usize,
    pub rotation: f64,
    pub scale: f64,
    pub translate_radius: f64,
    pub center: Point,
    pub selected: bool,
}

/// One gesture's worth of fan: layout, entrance animation and selection.
#[derive(Debug, Clone)]
pub struct FanSurface {
    anchor: Point,
    bounds: Bounds,
    menu: MenuSpec,
    icon_radii: Vec<f64>,
    timing: AnimationTiming,
    geometry: GeometryConfig,
    radius: f64,
    angle_width: f64,
    slots: Vec<ItemSlot>,
    timeline: Timeline,
    hit: HitTester,
    lifecycle: Lifecycle,
}

impl FanSurface {
    pub fn begin(
        touch: Point,
        bounds: Bounds,
        menu: MenuSpec,
        timing: AnimationTiming,
        layout: &GeometryConfig,
    ) -> Result<Self, FanError> {
        Self::validate(touch, bounds, &menu, &timing)?;
        layout.validate()?;

        // validated non-empty above
        let first_radius = menu.first_radius().unwrap_or_default();
        let last_radius = menu.last_radius().unwrap_or_default();

        let radius = geometry::compute_radius(bounds, touch, first_radius, layout);
        let angle_width = geometry::compute_item_angle_width(
            radius,
            bounds.width,
            last_radius,
            menu.len(),
            layout.max_arc_deg,
        );
        if angle_width <= 0.0 {
            log::debug!(
                "Fan arc exhausted for {} items (width {angle_width}), nothing will be selectable",
                menu.len()
            );
        }

        let slots = timeline::schedule(menu.len(), &timing)
            .into_iter()
            .enumerate()
            .map(|(i, anim)| ItemSlot {
                angle_start: angle_width * i as f64,
                angle_width,
                anim,
            })
            .collect();

        let mut timeline = Timeline::new(menu.len(), &timing);
        timeline.start();

        log::debug!(
            "Fan begun at ({:.1}, {:.1}) in {}x{}: radius {:.1}, slot {:.2} deg",
            touch.x,
            touch.y,
            bounds.width,
            bounds.height,
            radius,
            angle_width
        );

        Ok(Self {
            anchor: touch,
            bounds,
            icon_radii: menu.icon_radii(),
            menu,
            timing,
            geometry: *layout,
            radius,
            angle_width,
            slots,
            timeline,
            hit: HitTester::new(),
            lifecycle: Lifecycle::Animating,
        })
    }

    fn validate(
        touch: Point,
        bounds: Bounds,
        menu: &MenuSpec,
        timing: &AnimationTiming,
    ) -> Result<(), ConfigIssue> {
        if menu.is_empty() {
            return Err(ConfigIssue::EmptyMenu);
        }
        if timing.total.is_zero() {
            return Err(ConfigIssue::ZeroDuration("total duration"));
        }
        if timing.per_item.is_zero() {
            return Err(ConfigIssue::ZeroDuration("per-item duration"));
        }
        if !touch.is_finite() {
            return Err(ConfigIssue::NonFiniteTouch);
        }
        if bounds.is_empty() {
            return Err(ConfigIssue::EmptyBounds);
        }
        if !bounds.contains(touch) {
            return Err(ConfigIssue::TouchOutsideBounds);
        }
        Ok(())
    }

    /// Feeds the external clock. Returns whether the fan needs repainting.
    pub fn advance(&mut self, t: Duration) -> bool {
        if self.lifecycle != Lifecycle::Animating {
            return false;
        }

        let changed = self.timeline.advance(t);
        if self.timeline.is_finished() {
            log::debug!("Fan entrance finished at {:?}", t);
            self.lifecycle = Lifecycle::Interactive;
            return true;
        }
        changed
    }

    /// Hit-tests a finger move. Ignored until the entrance has settled.
    pub fn update_touch(&mut self, point: Point) -> bool {
        if self.lifecycle != Lifecycle::Interactive {
            return false;
        }

        self.hit
            .update(
                point,
                self.bounds,
                self.radius,
                self.angle_width,
                &self.icon_radii,
            )
            .changed
    }

    pub fn commit(&mut self) -> Option<usize> {
        let selection = self.selection();
        if self.lifecycle != Lifecycle::Committed {
            log::debug!("Fan committed with {:?}", selection);
            self.release();
        }
        selection
    }

    pub fn cancel(&mut self) {
        if self.lifecycle == Lifecycle::Committed {
            return;
        }
        log::debug!("Fan cancelled while {}", self.lifecycle);
        self.timeline.cancel();
        self.release();
    }

    fn release(&mut self) {
        self.hit.clear();
        self.menu = MenuSpec::default();
        self.icon_radii.clear();
        self.slots.clear();
        self.lifecycle = Lifecycle::Committed;
    }

    pub fn selection(&self) -> Option<usize> {
        match self.lifecycle {
            Lifecycle::Interactive => self.hit.last(),
            _ => None,
        }
    }

    pub fn render_transform_for(&self, index: usize, t: Duration) -> Option<ItemTransform> {
        if self.angle_width <= 0.0 {
            return None;
        }
        let slot = self.slots.get(index)?;

        let progress = timeline::progress_at(t, &slot.anim, self.timing.per_item);
        let selected = self.selection() == Some(index);
        let emphasis = if selected {
            self.geometry.emphasis_scale
        } else {
            1.0
        };

        let rotation = slot.center_angle();
        let translate_radius = progress * self.radius;

        Some(ItemTransform {
            index,
            rotation,
            scale: progress * emphasis,
            translate_radius,
            center: geometry::polar_to_container(self.bounds, rotation, translate_radius),
            selected,
        })
    }

    /// Draw list at the current clock; items that have not started are left out.
    pub fn frame(&self) -> Vec<ItemTransform> {
        let t = self.timeline.elapsed();
        (0..self.slots.len())
            .filter_map(|i| self.render_transform_for(i, t))
            .filter(|transform| transform.scale > 0.0)
            .collect()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle_width(&self) -> f64 {
        self.angle_width
    }

    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.menu.get(index)
    }

    pub fn progress(&self, index: usize) -> f64 {
        self.timeline.progress(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn phone_fan() -> FanSurface {
        FanSurface::begin(
            Point::new(540.0, 1800.0),
            Bounds::new(1080.0, 1920.0),
            MenuSpec::uniform(5, 100.0),
            AnimationTiming::from_millis(500, 200),
            &GeometryConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_begin_computes_layout() {
        let fan = phone_fan();
        let expected_radius = 540.0_f64.hypot(120.0) + 200.0;
        assert!((fan.radius() - expected_radius).abs() < 1e-9);
        assert!((fan.angle_width() - 18.0).abs() < 1e-9);
        assert_eq!(fan.lifecycle(), Lifecycle::Animating);
        assert_eq!(fan.slots().len(), 5);
        assert_eq!(fan.slots()[4].anim, AnimWindow::new(ms(300), ms(500)));
        assert!((fan.slots()[2].center_angle() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_begin_rejects_bad_input() {
        let bounds = Bounds::new(1080.0, 1920.0);
        let touch = Point::new(10.0, 10.0);
        let menu = MenuSpec::uniform(3, 96.0);
        let timing = AnimationTiming::default();

        let begin = |touch, bounds, menu, timing| {
            FanSurface::begin(touch, bounds, menu, timing, &GeometryConfig::default())
                .map(|_| ())
                .unwrap_err()
        };

        let cases = vec![
            (
                begin(touch, bounds, MenuSpec::default(), timing),
                ConfigIssue::EmptyMenu,
            ),
            (
                begin(touch, bounds, menu.clone(), AnimationTiming::from_millis(0, 200)),
                ConfigIssue::ZeroDuration("total duration"),
            ),
            (
                begin(touch, bounds, menu.clone(), AnimationTiming::from_millis(500, 0)),
                ConfigIssue::ZeroDuration("per-item duration"),
            ),
            (
                begin(Point::new(f64::NAN, 0.0), bounds, menu.clone(), timing),
                ConfigIssue::NonFiniteTouch,
            ),
            (
                begin(touch, Bounds::new(0.0, 0.0), menu.clone(), timing),
                ConfigIssue::EmptyBounds,
            ),
            (
                begin(Point::new(-5.0, 10.0), bounds, menu.clone(), timing),
                ConfigIssue::TouchOutsideBounds,
            ),
        ];

        for (err, issue) in cases {
            assert_eq!(err, FanError::InvalidConfiguration(issue));
        }
    }

    #[test]
    fn test_begin_rejects_arc_past_quarter_turn() {
        let layout = GeometryConfig {
            max_arc_deg: 180.0,
            ..GeometryConfig::default()
        };
        let err = FanSurface::begin(
            Point::new(540.0, 1800.0),
            Bounds::new(1080.0, 1920.0),
            MenuSpec::uniform(5, 100.0),
            AnimationTiming::from_millis(500, 200),
            &layout,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FanError::InvalidConfiguration(ConfigIssue::InvalidGeometry("max_arc_deg"))
        );
    }

    #[test]
    fn test_narrow_arc_fits_configured_limit() {
        let layout = GeometryConfig {
            max_arc_deg: 60.0,
            ..GeometryConfig::default()
        };
        let fan = FanSurface::begin(
            Point::new(540.0, 1800.0),
            Bounds::new(1080.0, 1920.0),
            MenuSpec::uniform(5, 100.0),
            AnimationTiming::from_millis(500, 200),
            &layout,
        )
        .unwrap();
        let sum: f64 = fan.slots().iter().map(|s| s.angle_width).sum();
        assert!((sum - 60.0).abs() < 1e-9);
        assert!((fan.slots()[4].center_angle() - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_touch_ignored_while_animating() {
        let mut fan = phone_fan();
        let center = geometry::polar_to_container(fan.bounds(), 45.0, fan.radius());

        assert!(fan.advance(ms(250)));
        assert!(!fan.update_touch(center));
        assert_eq!(fan.selection(), None);
        assert_eq!(fan.commit(), None);
        assert_eq!(fan.lifecycle(), Lifecycle::Committed);
    }

    #[test]
    fn test_select_and_commit() {
        let mut fan = phone_fan();
        assert!(fan.advance(ms(500)));
        assert_eq!(fan.lifecycle(), Lifecycle::Interactive);
        assert!((0..5).all(|i| fan.progress(i) == 1.0));

        let center = geometry::polar_to_container(fan.bounds(), 45.0, fan.radius());
        assert!(fan.update_touch(center));
        assert!(!fan.update_touch(center));
        assert_eq!(fan.selection(), Some(2));

        assert_eq!(fan.commit(), Some(2));
        assert_eq!(fan.lifecycle(), Lifecycle::Committed);
        assert_eq!(fan.commit(), None);
        assert!(fan.frame().is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut fan = phone_fan();
        fan.advance(ms(500));
        fan.update_touch(geometry::polar_to_container(fan.bounds(), 9.0, fan.radius()));
        fan.cancel();
        assert_eq!(fan.lifecycle(), Lifecycle::Committed);
        assert_eq!(fan.selection(), None);
        fan.cancel();
        assert_eq!(fan.commit(), None);
    }

    #[test]
    fn test_render_transform_grows_and_emphasises() {
        let mut fan = phone_fan();

        let early = fan.render_transform_for(0, ms(100)).unwrap();
        assert_eq!(early.scale, 0.5);
        assert!((early.translate_radius - fan.radius() / 2.0).abs() < 1e-9);
        assert!((early.rotation - 9.0).abs() < 1e-9);

        let not_started = fan.render_transform_for(4, ms(100)).unwrap();
        assert_eq!(not_started.scale, 0.0);

        fan.advance(ms(500));
        let target = geometry::polar_to_container(fan.bounds(), 63.0, fan.radius());
        fan.update_touch(target);

        let selected = fan.render_transform_for(3, ms(500)).unwrap();
        assert!(selected.selected);
        assert!((selected.scale - 1.2).abs() < 1e-9);
        assert!((selected.center.x - target.x).abs() < 1e-6);
        assert!((selected.center.y - target.y).abs() < 1e-6);

        let other = fan.render_transform_for(1, ms(500)).unwrap();
        assert!(!other.selected);
        assert_eq!(other.scale, 1.0);

        assert!(fan.render_transform_for(5, ms(500)).is_none());
    }

    #[test]
    fn test_frame_skips_unstarted_items() {
        let mut fan = phone_fan();
        fan.advance(ms(100));
        // items 0 and 1 have started (item 1 at 75ms)
        let indices: Vec<_> = fan.frame().iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_exhausted_arc_selects_nothing() {
        let layout = GeometryConfig {
            max_arc_deg: 10.0,
            min_radius: 100.0,
            ..GeometryConfig::default()
        };
        // a narrow container forbids more than the whole 10 degree arc
        let mut fan = FanSurface::begin(
            Point::new(10.0, 1900.0),
            Bounds::new(100.0, 1920.0),
            MenuSpec::uniform(4, 100.0),
            AnimationTiming::from_millis(100, 50),
            &layout,
        )
        .unwrap();
        assert!(fan.angle_width() <= 0.0);

        fan.advance(ms(100));
        assert_eq!(fan.lifecycle(), Lifecycle::Interactive);
        assert!(!fan.update_touch(Point::new(50.0, 1500.0)));
        assert!(fan.frame().is_empty());
        assert_eq!(fan.commit(), None);
    }
}
