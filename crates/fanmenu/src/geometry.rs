use crate::error::ConfigIssue;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_RADIUS: f64 = 500.0;
pub const DEFAULT_FINGER_OFFSET: f64 = 200.0; // keeps the arc ahead of the finger
pub const DEFAULT_MAX_ARC_DEG: f64 = 90.0;
pub const DEFAULT_EMPHASIS_SCALE: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Moves `p` into the fan frame: origin at the bottom-right corner, both
    /// axes pointing back into the container.
    pub fn mirror(&self, p: Point) -> Point {
        Point::new(self.width - p.x, self.height - p.y)
    }

    /// Inverse of [`Bounds::mirror`].
    pub fn unmirror(&self, p: Point) -> Point {
        self.mirror(p)
    }
}

/// Tunables for fan layout. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub min_radius: f64,
    pub finger_offset: f64,
    pub max_arc_deg: f64,
    pub emphasis_scale: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            finger_offset: DEFAULT_FINGER_OFFSET,
            max_arc_deg: DEFAULT_MAX_ARC_DEG,
            emphasis_scale: DEFAULT_EMPHASIS_SCALE,
        }
    }
}

impl GeometryConfig {
    /// The fan only ever opens into the quarter turn between the bottom and
    /// left edges, so the arc must fit in (0, 90].
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if !(self.max_arc_deg > 0.0 && self.max_arc_deg <= DEFAULT_MAX_ARC_DEG) {
            return Err(ConfigIssue::InvalidGeometry("max_arc_deg"));
        }
        if !(self.min_radius.is_finite() && self.min_radius >= 0.0) {
            return Err(ConfigIssue::InvalidGeometry("min_radius"));
        }
        if !self.finger_offset.is_finite() {
            return Err(ConfigIssue::InvalidGeometry("finger_offset"));
        }
        if !(self.emphasis_scale.is_finite() && self.emphasis_scale > 0.0) {
            return Err(ConfigIssue::InvalidGeometry("emphasis_scale"));
        }
        Ok(())
    }
}

/// Distance from the touch point to the far corner plus the finger clearance,
/// kept inside the container height and never below `min_radius`.
pub fn compute_radius(
    bounds: Bounds,
    touch: Point,
    icon_radius: f64,
    config: &GeometryConfig,
) -> f64 {
    let mut radius = bounds.mirror(touch).length() + config.finger_offset;

    if radius + icon_radius > bounds.height {
        radius = bounds.height - icon_radius;
    }

    radius.max(config.min_radius)
}

/// Angular width of one item. Items share the arc evenly; when the outermost
/// icon would cross the left edge, the part of the arc beyond it is removed.
pub fn compute_item_angle_width(
    radius: f64,
    container_width: f64,
    icon_radius: f64,
    item_count: usize,
    max_arc_deg: f64,
) -> f64 {
    if item_count == 0 {
        return 0.0;
    }

    let max_extent = radius + icon_radius;
    if max_extent <= container_width {
        return max_arc_deg / item_count as f64;
    }

    let forbidden = (container_width / max_extent).acos().to_degrees();
    (max_arc_deg - forbidden) / item_count as f64
}

/// Container-space position at `distance` from the far corner along
/// `angle_deg`, measured from the vertical towards the left edge.
pub fn polar_to_container(bounds: Bounds, angle_deg: f64, distance: f64) -> Point {
    let theta = angle_deg.to_radians();
    bounds.unmirror(Point::new(distance * theta.sin(), distance * theta.cos()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_radius_clamped_to_minimum_near_corner() {
        let bounds = Bounds::new(1080.0, 1920.0);
        let radius = compute_radius(
            bounds,
            Point::new(1075.0, 1915.0),
            50.0,
            &GeometryConfig::default(),
        );
        assert_eq!(radius, 500.0);
    }

    #[test]
    fn test_radius_is_distance_plus_finger_offset() {
        let bounds = Bounds::new(1080.0, 1920.0);
        let radius = compute_radius(
            bounds,
            Point::new(540.0, 1800.0),
            50.0,
            &GeometryConfig::default(),
        );
        let expected = 540.0_f64.hypot(120.0) + 200.0;
        assert!((radius - expected).abs() < EPS);
    }

    #[test]
    fn test_radius_kept_inside_height() {
        let bounds = Bounds::new(1080.0, 1000.0);
        let config = GeometryConfig {
            min_radius: 100.0,
            ..GeometryConfig::default()
        };
        let radius = compute_radius(bounds, Point::new(0.0, 0.0), 50.0, &config);
        assert_eq!(radius, 950.0);
    }

    #[test]
    fn test_minimum_wins_over_height_clamp() {
        let bounds = Bounds::new(300.0, 300.0);
        let radius = compute_radius(
            bounds,
            Point::new(0.0, 0.0),
            50.0,
            &GeometryConfig::default(),
        );
        assert_eq!(radius, 500.0);
    }

    #[test]
    fn test_angle_width_splits_quarter_turn() {
        let width = compute_item_angle_width(753.0, 1080.0, 50.0, 5, 90.0);
        assert!((width - 18.0).abs() < EPS);
    }

    #[test]
    fn test_angle_width_shrinks_when_arc_leaves_width() {
        // acos(500 / 1000) = 60 degrees are forbidden
        let width = compute_item_angle_width(950.0, 500.0, 50.0, 3, 90.0);
        assert!((width - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_width_zero_items() {
        assert_eq!(compute_item_angle_width(500.0, 1080.0, 50.0, 0, 90.0), 0.0);
    }

    #[test]
    fn test_polar_round_trip_through_mirror() {
        let bounds = Bounds::new(1080.0, 1920.0);
        let p = polar_to_container(bounds, 45.0, 100.0);
        let back = bounds.mirror(p);
        assert!((back.x - back.y).abs() < EPS);
        assert!((back.length() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Bounds::new(0.0, 100.0).is_empty());
        assert!(Bounds::new(f64::NAN, 100.0).is_empty());
        assert!(!Bounds::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_geometry_config_limits() {
        assert_eq!(GeometryConfig::default().validate(), Ok(()));

        let narrow = GeometryConfig {
            max_arc_deg: 30.0,
            ..GeometryConfig::default()
        };
        assert_eq!(narrow.validate(), Ok(()));

        let rejected = [
            (GeometryConfig { max_arc_deg: 180.0, ..GeometryConfig::default() }, "max_arc_deg"),
            (GeometryConfig { max_arc_deg: 0.0, ..GeometryConfig::default() }, "max_arc_deg"),
            (GeometryConfig { max_arc_deg: f64::NAN, ..GeometryConfig::default() }, "max_arc_deg"),
            (GeometryConfig { min_radius: -1.0, ..GeometryConfig::default() }, "min_radius"),
            (GeometryConfig { min_radius: f64::INFINITY, ..GeometryConfig::default() }, "min_radius"),
            (GeometryConfig { finger_offset: f64::NAN, ..GeometryConfig::default() }, "finger_offset"),
            (GeometryConfig { emphasis_scale: 0.0, ..GeometryConfig::default() }, "emphasis_scale"),
            (GeometryConfig { emphasis_scale: -1.2, ..GeometryConfig::default() }, "emphasis_scale"),
        ];
        for (config, field) in rejected {
            assert_eq!(config.validate(), Err(ConfigIssue::InvalidGeometry(field)));
        }
    }
}
