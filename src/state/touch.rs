// Touch gesture classification for the zoom viewer.
//
// One touch session runs from the first finger down to the last finger up.
// A session that ever had two fingers stays `Pinching` until every finger
// lifts, so it can never end as a tap or a swipe.
use crate::config::GestureConfig;
use crate::util::Point;

/// Finger spread and scale captured when a two-finger pinch is established.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    pub initial_distance: f64,
    pub start_scale: f64,
}

impl PinchSession {
    /// `None` while the fingers coincide; the caller retries on the next frame.
    pub fn begin(a: Point, b: Point, start_scale: f64) -> Option<Self> {
        let initial_distance = a.distance(b);
        if !initial_distance.is_finite() || initial_distance <= f64::EPSILON {
            return None;
        }
        Some(Self {
            initial_distance,
            start_scale,
        })
    }

    /// Unclamped scale for the current finger spread.
    pub fn scale_for(&self, a: Point, b: Point) -> Option<f64> {
        let distance = a.distance(b);
        let scale = self.start_scale * (distance / self.initial_distance);
        scale.is_finite().then_some(scale)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TouchGesture {
    #[default]
    Idle,
    /// One finger down.
    Dragging {
        start: Point,
        last: Point,
        /// Started unzoomed and has not moved mostly sideways.
        swipe_eligible: bool,
        /// End time of the tap that preceded this session, if any.
        previous_tap: Option<f64>,
    },
    /// Two or more fingers have been down this session.
    Pinching { session: Option<PinchSession> },
    /// The last session ended as a tap at `tapped_at` (ms).
    AwaitingDoubleTap { tapped_at: f64 },
}

/// What the viewer should do after a touch transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEffect {
    None,
    Zoom(f64),
    ToggleZoom,
    Dismiss,
}

impl TouchGesture {
    pub fn is_pinching(&self) -> bool {
        matches!(self, TouchGesture::Pinching { .. })
    }

    /// Drop a pending first tap so the next tap starts a fresh chain.
    pub fn forget_tap(&mut self) {
        if let TouchGesture::AwaitingDoubleTap { .. } = self {
            *self = TouchGesture::Idle;
        }
    }

    /// A finger landed; `touches` holds every finger now down.
    pub fn start(&mut self, touches: &[Point], scale: f64, zoomed: bool) {
        match touches {
            [] => {}
            [only] => match *self {
                TouchGesture::Idle => {
                    *self = TouchGesture::Dragging {
                        start: *only,
                        last: *only,
                        swipe_eligible: !zoomed,
                        previous_tap: None,
                    };
                }
                TouchGesture::AwaitingDoubleTap { tapped_at } => {
                    *self = TouchGesture::Dragging {
                        start: *only,
                        last: *only,
                        swipe_eligible: !zoomed,
                        previous_tap: Some(tapped_at),
                    };
                }
                // Sticky: a pinch session stays a pinch until all fingers lift.
                TouchGesture::Pinching { .. } | TouchGesture::Dragging { .. } => {}
            },
            [a, b] => {
                if !matches!(self, TouchGesture::Pinching { session: Some(_) }) {
                    *self = TouchGesture::Pinching {
                        session: PinchSession::begin(*a, *b, scale),
                    };
                }
            }
            _ => *self = TouchGesture::Pinching { session: None },
        }
    }

    pub fn moved(&mut self, touches: &[Point], scale: f64, config: &GestureConfig) -> TouchEffect {
        match (self, touches) {
            (TouchGesture::Pinching { session }, [a, b]) => match *session {
                Some(pinch) => match pinch.scale_for(*a, *b) {
                    Some(next) => TouchEffect::Zoom(next),
                    None => TouchEffect::None,
                },
                None => {
                    *session = PinchSession::begin(*a, *b, scale);
                    TouchEffect::None
                }
            },
            (
                TouchGesture::Dragging {
                    start,
                    last,
                    swipe_eligible,
                    ..
                },
                [only],
            ) => {
                *last = *only;
                let dx = (last.x - start.x).abs();
                let dy = (last.y - start.y).abs();
                if dx > config.tap_slop_px && dx > dy {
                    *swipe_eligible = false;
                }
                TouchEffect::None
            }
            _ => TouchEffect::None,
        }
    }

    /// A finger lifted. `remaining` holds the fingers still down, `lifted` the one that left.
    pub fn end(
        &mut self,
        remaining: &[Point],
        lifted: Option<Point>,
        zoomed: bool,
        now_ms: f64,
        config: &GestureConfig,
    ) -> TouchEffect {
        if !remaining.is_empty() {
            if let TouchGesture::Pinching { session } = self {
                if remaining.len() != 2 {
                    *session = None;
                }
            }
            return TouchEffect::None;
        }

        match *self {
            TouchGesture::Pinching { .. } => {
                *self = TouchGesture::Idle;
                TouchEffect::None
            }
            TouchGesture::Dragging {
                start,
                last,
                swipe_eligible,
                previous_tap,
            } => {
                let end = lifted.unwrap_or(last);
                if swipe_eligible && !zoomed && end.y - start.y > config.dismiss_distance_px {
                    *self = TouchGesture::Idle;
                    return TouchEffect::Dismiss;
                }
                if start.distance(end) > config.tap_slop_px {
                    *self = TouchGesture::Idle;
                    return TouchEffect::None;
                }
                *self = TouchGesture::AwaitingDoubleTap { tapped_at: now_ms };
                match previous_tap {
                    Some(at) if now_ms >= at && now_ms - at < config.double_tap_ms => {
                        TouchEffect::ToggleZoom
                    }
                    _ => TouchEffect::None,
                }
            }
            TouchGesture::Idle | TouchGesture::AwaitingDoubleTap { .. } => TouchEffect::None,
        }
    }

    /// The browser took the touches away; nothing is classified.
    pub fn cancel(&mut self) {
        *self = TouchGesture::Idle;
    }
}
