// Interaction state of the zoom viewer.
//
// Pointer events drive panning; touch events drive pinch, double-tap and
// swipe-to-dismiss. Once closing, every handler is a no-op.

use crate::config::GestureConfig;
use crate::util::Point;

use super::touch::{TouchEffect, TouchGesture};
use super::transform::Transform;

/// Result of feeding one input event to the viewer.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing visible changed.
    Ignored,
    /// Render state changed; re-render.
    Redraw,
    /// The viewer just started closing; schedule the close callback.
    Dismiss,
}

/// Pointer held down; remembers where it was last seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub last: Point,
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    config: GestureConfig,
    transform: Transform,
    visible: bool,
    closing: bool,
    drag: Option<DragSession>,
    touch: TouchGesture,
}

impl ViewerState {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            transform: Transform::default(),
            visible: false,
            closing: false,
            drag: None,
            touch: TouchGesture::Idle,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn is_zoomed(&self) -> bool {
        self.transform.is_zoomed(&self.config)
    }

    pub fn hint(&self) -> &'static str {
        if self.is_zoomed() {
            "Drag / pinch to explore"
        } else {
            "Pinch or scroll to zoom"
        }
    }

    /// Fade in after mount.
    pub fn show(&mut self) -> GestureOutcome {
        if self.closing || self.visible {
            return GestureOutcome::Ignored;
        }
        self.visible = true;
        GestureOutcome::Redraw
    }

    /// Start the exit transition. Only the first call reports `Dismiss`.
    pub fn request_close(&mut self) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        self.closing = true;
        self.visible = false;
        self.drag = None;
        self.touch.cancel();
        GestureOutcome::Dismiss
    }

    pub fn key_down(&mut self, key: &str) -> GestureOutcome {
        match key {
            "Escape" | "Esc" => self.request_close(),
            _ => GestureOutcome::Ignored,
        }
    }

    pub fn wheel(&mut self, delta_y: f64) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let delta = -delta_y * self.config.wheel_factor;
        self.zoom_to(self.transform.scale + delta)
    }

    pub fn zoom_in(&mut self) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        self.touch.forget_tap();
        self.zoom_to(self.transform.scale + self.config.button_zoom_step)
    }

    pub fn zoom_out(&mut self) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        self.touch.forget_tap();
        self.zoom_to(self.transform.scale - self.config.button_zoom_step)
    }

    pub fn reset_zoom(&mut self) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        self.touch.forget_tap();
        if self.transform == Transform::default() {
            return GestureOutcome::Ignored;
        }
        self.transform.reset();
        GestureOutcome::Redraw
    }

    /// Set the scale directly, clamped to the configured range.
    pub fn zoom_to(&mut self, scale: f64) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let before = self.transform.clone();
        self.transform.set_scale(scale, &self.config);
        self.changed(&before)
    }

    pub fn pointer_down(&mut self, at: Point) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        self.drag = Some(DragSession { last: at });
        GestureOutcome::Ignored
    }

    pub fn pointer_move(&mut self, at: Point) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let Some(drag) = self.drag.as_mut() else {
            return GestureOutcome::Ignored;
        };
        let (dx, dy) = (at.x - drag.last.x, at.y - drag.last.y);
        drag.last = at;
        // Two fingers own the gesture; their pointer moves must not pan.
        if self.touch.is_pinching() {
            return GestureOutcome::Ignored;
        }
        let before = self.transform.clone();
        self.transform.pan_by(dx, dy, &self.config);
        self.changed(&before)
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        self.drag = None;
        GestureOutcome::Ignored
    }

    pub fn touch_start(&mut self, touches: &[Point]) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let zoomed = self.is_zoomed();
        self.touch.start(touches, self.transform.scale, zoomed);
        GestureOutcome::Ignored
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let effect = self.touch.moved(touches, self.transform.scale, &self.config);
        self.apply(effect)
    }

    pub fn touch_end(&mut self, remaining: &[Point], lifted: Option<Point>, now_ms: f64) -> GestureOutcome {
        if self.closing {
            return GestureOutcome::Ignored;
        }
        let zoomed = self.is_zoomed();
        let effect = self.touch.end(remaining, lifted, zoomed, now_ms, &self.config);
        self.apply(effect)
    }

    pub fn touch_cancel(&mut self) -> GestureOutcome {
        self.touch.cancel();
        GestureOutcome::Ignored
    }

    fn apply(&mut self, effect: TouchEffect) -> GestureOutcome {
        match effect {
            TouchEffect::None => GestureOutcome::Ignored,
            TouchEffect::Zoom(scale) => self.zoom_to(scale),
            TouchEffect::ToggleZoom => {
                let target = if self.is_zoomed() {
                    self.config.min_scale
                } else {
                    self.config.double_tap_scale
                };
                self.transform.set_scale(target, &self.config);
                self.transform.offset = Point::ORIGIN;
                GestureOutcome::Redraw
            }
            TouchEffect::Dismiss => self.request_close(),
        }
    }

    fn changed(&self, before: &Transform) -> GestureOutcome {
        if *before == self.transform {
            GestureOutcome::Ignored
        } else {
            GestureOutcome::Redraw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn viewer() -> ViewerState {
        ViewerState::new(GestureConfig::default())
    }

    fn tap(v: &mut ViewerState, at_ms: f64) -> GestureOutcome {
        let _ = v.touch_start(&[p(200.0, 200.0)]);
        v.touch_end(&[], Some(p(200.0, 200.0)), at_ms)
    }

    fn swipe_down(v: &mut ViewerState, distance: f64) -> GestureOutcome {
        let _ = v.touch_start(&[p(200.0, 100.0)]);
        let _ = v.touch_move(&[p(200.0, 100.0 + distance / 2.0)]);
        let _ = v.touch_move(&[p(200.0, 100.0 + distance)]);
        v.touch_end(&[], Some(p(200.0, 100.0 + distance)), 0.0)
    }

    fn pinch(v: &mut ViewerState, d0: f64, d1: f64) {
        let _ = v.touch_start(&[p(100.0, 300.0)]);
        let _ = v.touch_start(&[p(100.0, 300.0), p(100.0 + d0, 300.0)]);
        let _ = v.touch_move(&[p(100.0, 300.0), p(100.0 + d1, 300.0)]);
    }

    #[test]
    fn wheel_zoom_stays_in_range() {
        let mut v = viewer();
        assert_eq!(v.wheel(-500.0), GestureOutcome::Redraw);
        assert!((v.scale() - 2.0).abs() < 1e-9);
        for delta in [-3000.0, -10.0, 4000.0, 250.0, -1e9, 1e9] {
            let _ = v.wheel(delta);
            assert!((1.0..=4.0).contains(&v.scale()));
        }
        assert_eq!(v.wheel(100.0), GestureOutcome::Ignored);
    }

    #[test]
    fn drag_at_fit_does_not_move_the_image() {
        let mut v = viewer();
        let _ = v.pointer_down(p(10.0, 10.0));
        assert_eq!(v.pointer_move(p(80.0, 40.0)), GestureOutcome::Ignored);
        let _ = v.pointer_move(p(-50.0, 90.0));
        let _ = v.pointer_up();
        assert_eq!(v.transform().offset, Point::ORIGIN);
    }

    #[test]
    fn drag_pans_incrementally_when_zoomed() {
        let mut v = viewer();
        let _ = v.zoom_to(2.0);
        let _ = v.pointer_down(p(10.0, 10.0));
        assert_eq!(v.pointer_move(p(30.0, 15.0)), GestureOutcome::Redraw);
        let _ = v.pointer_move(p(40.0, 5.0));
        assert_eq!(v.transform().offset, p(30.0, -5.0));
        let _ = v.pointer_up();
        assert_eq!(v.pointer_move(p(400.0, 400.0)), GestureOutcome::Ignored);
        assert_eq!(v.transform().offset, p(30.0, -5.0));
    }

    #[test]
    fn pan_is_clamped_to_fixed_bounds() {
        let mut v = viewer();
        let _ = v.zoom_to(4.0);
        let _ = v.pointer_down(p(0.0, 0.0));
        let _ = v.pointer_move(p(900.0, -900.0));
        assert_eq!(v.transform().offset, p(300.0, -300.0));
    }

    #[test]
    fn pinch_scale_follows_finger_ratio() {
        for (d0, s0, d1, expected) in [
            (100.0, 1.0, 200.0, 2.0),
            (100.0, 2.0, 50.0, 1.0),
            (100.0, 3.0, 300.0, 4.0),
            (100.0, 2.0, 150.0, 3.0),
        ] {
            let mut v = viewer();
            let _ = v.zoom_to(s0);
            pinch(&mut v, d0, d1);
            assert!(
                (v.scale() - expected).abs() < 1e-9,
                "d0={} s0={} d1={} gave {}",
                d0,
                s0,
                d1,
                v.scale()
            );
        }
    }

    #[test]
    fn pinch_suppresses_pointer_pan() {
        let mut v = viewer();
        let _ = v.zoom_to(2.0);
        let _ = v.pointer_down(p(100.0, 300.0));
        pinch(&mut v, 100.0, 150.0);
        assert_eq!(v.pointer_move(p(160.0, 340.0)), GestureOutcome::Ignored);
        assert_eq!(v.transform().offset, Point::ORIGIN);
    }

    #[test]
    fn pinch_session_never_dismisses() {
        let mut v = viewer();
        pinch(&mut v, 100.0, 100.0);
        let _ = v.touch_end(&[p(100.0, 300.0)], Some(p(200.0, 300.0)), 0.0);
        let _ = v.touch_move(&[p(100.0, 600.0)]);
        assert_eq!(v.touch_end(&[], Some(p(100.0, 600.0)), 10.0), GestureOutcome::Ignored);
        assert!(!v.is_closing());
    }

    #[test]
    fn double_tap_toggles_zoom() {
        let mut v = viewer();
        assert_eq!(tap(&mut v, 1000.0), GestureOutcome::Ignored);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(tap(&mut v, 1200.0), GestureOutcome::Redraw);
        assert_eq!(v.scale(), 2.6);
        assert_eq!(tap(&mut v, 1400.0), GestureOutcome::Redraw);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(tap(&mut v, 1660.0), GestureOutcome::Ignored);
        assert_eq!(v.scale(), 1.0);
    }

    #[test]
    fn double_tap_resets_pan() {
        let mut v = viewer();
        let _ = v.zoom_to(3.0);
        let _ = v.pointer_down(p(0.0, 0.0));
        let _ = v.pointer_move(p(50.0, 50.0));
        let _ = v.pointer_up();
        let _ = tap(&mut v, 0.0);
        let _ = tap(&mut v, 100.0);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.transform().offset, Point::ORIGIN);
    }

    #[test]
    fn swipe_down_dismisses_only_past_threshold() {
        let mut v = viewer();
        assert_eq!(swipe_down(&mut v, 119.0), GestureOutcome::Ignored);
        assert!(!v.is_closing());
        assert_eq!(swipe_down(&mut v, 121.0), GestureOutcome::Dismiss);
        assert!(v.is_closing());
        assert!(!v.is_visible());
    }

    #[test]
    fn swipe_down_never_dismisses_when_zoomed() {
        let mut v = viewer();
        let _ = v.zoom_to(2.0);
        assert_eq!(swipe_down(&mut v, 121.0), GestureOutcome::Ignored);
        assert_eq!(swipe_down(&mut v, 2000.0), GestureOutcome::Ignored);
        assert!(!v.is_closing());
    }

    #[test]
    fn swipe_up_does_not_dismiss() {
        let mut v = viewer();
        assert_eq!(swipe_down(&mut v, -400.0), GestureOutcome::Ignored);
    }

    #[test]
    fn escape_closes_at_any_zoom() {
        let mut v = viewer();
        let _ = v.zoom_to(3.5);
        assert_eq!(v.key_down("Enter"), GestureOutcome::Ignored);
        assert_eq!(v.key_down("Escape"), GestureOutcome::Dismiss);
    }

    #[test]
    fn close_is_reported_once() {
        let mut v = viewer();
        assert_eq!(v.key_down("Escape"), GestureOutcome::Dismiss);
        assert_eq!(swipe_down(&mut v, 300.0), GestureOutcome::Ignored);
        assert_eq!(v.request_close(), GestureOutcome::Ignored);
    }

    #[test]
    fn input_after_close_is_ignored() {
        let mut v = viewer();
        let _ = v.show();
        let _ = v.request_close();
        assert_eq!(v.wheel(-500.0), GestureOutcome::Ignored);
        assert_eq!(v.zoom_in(), GestureOutcome::Ignored);
        assert_eq!(v.show(), GestureOutcome::Ignored);
        pinch(&mut v, 100.0, 300.0);
        assert_eq!(v.scale(), 1.0);
        assert!(!v.is_visible());
    }

    #[test]
    fn show_fades_in_once() {
        let mut v = viewer();
        assert!(!v.is_visible());
        assert_eq!(v.show(), GestureOutcome::Redraw);
        assert_eq!(v.show(), GestureOutcome::Ignored);
        assert!(v.is_visible());
    }

    #[test]
    fn zoom_buttons_step_and_reset() {
        let mut v = viewer();
        assert_eq!(v.zoom_out(), GestureOutcome::Ignored);
        let _ = v.zoom_in();
        let _ = v.zoom_in();
        assert_eq!(v.scale(), 2.0);
        assert_eq!(v.hint(), "Drag / pinch to explore");
        assert_eq!(v.reset_zoom(), GestureOutcome::Redraw);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.hint(), "Pinch or scroll to zoom");
    }

    #[test]
    fn button_presses_between_taps_do_not_double_tap() {
        let mut v = viewer();
        let _ = tap(&mut v, 1000.0);
        let _ = v.zoom_in();
        assert_eq!(tap(&mut v, 1200.0), GestureOutcome::Ignored);
        let _ = v.zoom_in();
        assert_eq!(v.scale(), 2.0);

        let _ = tap(&mut v, 2000.0);
        let _ = v.reset_zoom();
        let _ = tap(&mut v, 2100.0);
        assert_eq!(v.scale(), 1.0);
    }
}
