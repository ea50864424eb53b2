use crate::geometry::{Bounds, Point};

/// Maps a touch to the item under it, or `None`.
///
/// The touch is first bucketed by angle around the far corner, then the
/// candidate is confirmed only if the touch sits on the arc within that
/// item's icon radius (band edges included).
pub fn hit_test(
    touch: Point,
    bounds: Bounds,
    fan_radius: f64,
    angle_width: f64,
    icon_radii: &[f64],
) -> Option<usize> {
    if !(angle_width > 0.0) || !fan_radius.is_finite() || !touch.is_finite() {
        return None;
    }

    let p = bounds.mirror(touch);
    // Outside the fan quadrant, or exactly on the corner where the angle is undefined.
    if p.x < 0.0 || p.y < 0.0 || (p.x == 0.0 && p.y == 0.0) {
        log::debug!("Degenerate touch at ({}, {}), nothing selected", touch.x, touch.y);
        return None;
    }

    let touch_angle = p.x.atan2(p.y).to_degrees();
    let bucket = (touch_angle / angle_width).floor();
    if bucket < 0.0 || bucket >= icon_radii.len() as f64 {
        return None;
    }
    let candidate = bucket as usize;

    let icon_radius = icon_radii[candidate];
    let touch_range = p.length();
    let band = (fan_radius - icon_radius)..=(fan_radius + icon_radius);

    band.contains(&touch_range).then_some(candidate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitUpdate {
    pub selection: Option<usize>,
    pub changed: bool,
}

/// Remembers the last hit so repeated moves within one item do not trigger
/// redraws.
#[derive(Debug, Clone, Default)]
pub struct HitTester {
    last: Option<usize>,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        touch: Point,
        bounds: Bounds,
        fan_radius: f64,
        angle_width: f64,
        icon_radii: &[f64],
    ) -> HitUpdate {
        let selection = hit_test(touch, bounds, fan_radius, angle_width, icon_radii);
        let changed = selection != self.last;
        self.last = selection;
        HitUpdate { selection, changed }
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn clear(&mut self) -> bool {
        self.last.take().is_some()
    }
}
