// Geometry and DOM helpers shared by the viewer and the gallery.

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, Node};

/// A position in client (device) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Client positions of every point in a touch list.
pub fn touch_points(list: &web_sys::TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Milliseconds since the epoch, from the JS clock.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Listen for `event` on `target` until the returned listener drops.
/// Events that do not cast to `E` are skipped. Non-passive listeners may call `prevent_default`.
pub fn listen<E, F>(target: &EventTarget, event: &'static str, passive: bool, mut handler: F) -> EventListener
where
    E: JsCast,
    F: FnMut(&E) + 'static,
{
    let options = if passive {
        EventListenerOptions::default()
    } else {
        EventListenerOptions::enable_prevent_default()
    };
    EventListener::new_with_options(target, event, options, move |e: &Event| {
        if let Some(e) = e.dyn_ref::<E>() {
            handler(e);
        }
    })
}

/// Whether an event target is `container` or one of its descendants.
pub fn is_within(container: &Node, target: Option<&EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_ref::<Node>())
        .is_some_and(|node| container.contains(Some(node)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(13.0, 14.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> web_sys::Element {
        web_sys::window().unwrap().document().unwrap().create_element(tag).unwrap()
    }

    #[wasm_bindgen_test]
    fn dropped_listener_stops_firing() {
        let target = element("div");
        let calls = Rc::new(Cell::new(0));
        let listener = {
            let calls = calls.clone();
            listen(target.as_ref(), "ping", true, move |_: &Event| calls.set(calls.get() + 1))
        };
        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(calls.get(), 1);
        drop(listener);
        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[wasm_bindgen_test]
    fn descendants_are_within_their_container() {
        let controls = element("div");
        let button = element("button");
        let image = element("img");
        controls.append_child(&button).unwrap();
        assert!(is_within(&controls, Some(button.as_ref())));
        assert!(is_within(&controls, Some(controls.as_ref())));
        assert!(!is_within(&controls, Some(image.as_ref())));
        assert!(!is_within(&controls, None));
    }
}
