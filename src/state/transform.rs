// Scale and pan offset of the viewer image, clamped to the configured bounds.

use crate::config::GestureConfig;
use crate::util::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ORIGIN,
        }
    }
}

impl Transform {
    pub fn is_zoomed(&self, config: &GestureConfig) -> bool {
        self.scale > config.min_scale
    }

    /// Clamp `scale` into the configured range. Returning to fit clears the pan.
    pub fn set_scale(&mut self, scale: f64, config: &GestureConfig) {
        if !scale.is_finite() {
            return;
        }
        self.scale = scale.clamp(config.min_scale, config.max_scale);
        if !self.is_zoomed(config) {
            self.offset = Point::ORIGIN;
        }
    }

    /// Add a screen-space delta to the pan offset. No-op at fit scale.
    ///
    /// The bound is a fixed +/- `pan_limit_px` per axis regardless of scale, so
    /// at high zoom parts of the image stay out of reach. That matches the
    /// shipped behaviour; a scale-proportional bound is an open product question.
    pub fn pan_by(&mut self, dx: f64, dy: f64, config: &GestureConfig) {
        if !self.is_zoomed(config) || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let limit = config.pan_limit_px;
        self.offset.x = (self.offset.x + dx).clamp(-limit, limit);
        self.offset.y = (self.offset.y + dy).clamp(-limit, limit);
    }

    pub fn reset(&mut self) {
        *self = Transform::default();
    }

    /// CSS transform, translate applied before scale so panning stays in screen space.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_clamped() {
        let config = GestureConfig::default();
        let mut t = Transform::default();
        t.set_scale(9.0, &config);
        assert_eq!(t.scale, 4.0);
        t.set_scale(0.2, &config);
        assert_eq!(t.scale, 1.0);
        t.set_scale(f64::NAN, &config);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn pan_is_ignored_at_fit() {
        let config = GestureConfig::default();
        let mut t = Transform::default();
        t.pan_by(40.0, -25.0, &config);
        assert_eq!(t.offset, Point::ORIGIN);
    }

    #[test]
    fn pan_bound_does_not_follow_scale() {
        let config = GestureConfig::default();
        let mut t = Transform::default();
        t.set_scale(4.0, &config);
        t.pan_by(1000.0, -1000.0, &config);
        assert_eq!(t.offset, Point::new(300.0, -300.0));
        t.set_scale(1.5, &config);
        t.pan_by(10.0, 10.0, &config);
        assert_eq!(t.offset, Point::new(300.0, -290.0));
    }

    #[test]
    fn zooming_back_to_fit_clears_offset() {
        let config = GestureConfig::default();
        let mut t = Transform::default();
        t.set_scale(2.0, &config);
        t.pan_by(50.0, 60.0, &config);
        t.set_scale(1.0, &config);
        assert_eq!(t.offset, Point::ORIGIN);
    }

    #[test]
    fn css_translates_before_scaling() {
        let t = Transform {
            scale: 2.5,
            offset: Point::new(12.0, -8.0),
        };
        assert_eq!(t.css(), "translate(12px, -8px) scale(2.5)");
    }
}
