use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Element, EventTarget, KeyboardEvent, PointerEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config::GestureConfig;
use crate::state::{GestureOutcome, ScrollLockHandle, ViewerSession, ViewerState};
use crate::util::{Point, is_within, listen, now_ms, touch_points};

use super::viewer_controls::ViewerControls;

type SessionCell = Rc<RefCell<Option<ViewerSession>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomViewerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    pub config: Rc<GestureConfig>,
    /// Fired once, after the exit transition.
    pub on_close: Callback<()>,
}

/// Run one input against the open session and react to the outcome.
fn drive(
    session: &SessionCell,
    redraw: &UseForceUpdateHandle,
    f: impl FnOnce(&mut ViewerState) -> GestureOutcome,
) {
    let outcome = match session.borrow_mut().as_mut() {
        Some(open) => f(open.state_mut()),
        None => return,
    };
    match outcome {
        GestureOutcome::Ignored => {}
        GestureOutcome::Redraw => redraw.force_update(),
        GestureOutcome::Dismiss => {
            redraw.force_update();
            schedule_finish(session.clone());
        }
    }
}

// The exit delay is not cancellable; if the viewer unmounts first the session
// is already gone and the timeout finds nothing to finish.
fn schedule_finish(session: SessionCell) {
    let delay = session
        .borrow()
        .as_ref()
        .map(|open| open.state().config().close_delay_ms)
        .unwrap_or(0);
    Timeout::new(delay, move || {
        // Take the session out first so the host may unmount us from inside on_close.
        let finished = session.borrow_mut().take();
        if let Some(mut open) = finished {
            open.finish_close();
        }
    })
    .forget();
}

fn pointer_at(e: &PointerEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

// Touches that begin on the buttons belong to the buttons, not to the gesture machine.
fn on_controls(controls: &NodeRef, e: &TouchEvent) -> bool {
    controls
        .get()
        .is_some_and(|controls| is_within(&controls, e.target().as_ref()))
}

#[function_component(ZoomViewer)]
pub fn zoom_viewer(props: &ZoomViewerProps) -> Html {
    let box_ref = use_node_ref();
    let controls_ref = use_node_ref();
    let session: SessionCell = use_mut_ref(|| None);
    let redraw = use_force_update();
    let scroll_lock = use_context::<ScrollLockHandle>();
    let image_failed = use_state(|| false);

    // Open the session, fade in, and listen for keys, wheel and touches while mounted.
    {
        let session = session.clone();
        let redraw = redraw.clone();
        let box_ref = box_ref.clone();
        let controls_ref = controls_ref.clone();
        let config = (*props.config).clone();
        let on_close = props.on_close.clone();
        let src = props.src.clone();
        use_effect_with((), move |_| {
            let open_delay = config.open_delay_ms;
            *session.borrow_mut() = Some(ViewerSession::open(
                config,
                scroll_lock.map(|handle| handle.0),
                on_close,
            ));
            log::info!("Zoom viewer opened for {}", src);

            let fade_in = {
                let session = session.clone();
                let redraw = redraw.clone();
                Timeout::new(open_delay, move || drive(&session, &redraw, |s| s.show()))
            };

            let mut listeners = Vec::new();
            match web_sys::window() {
                Some(window) => {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    listeners.push(listen(window.as_ref(), "keydown", true, move |e: &KeyboardEvent| {
                        drive(&session, &redraw, |s| s.key_down(&e.key()))
                    }));
                }
                None => log::warn!("Zoom viewer has no window; Escape will not close it"),
            }

            if let Some(zoom_box) = box_ref.cast::<Element>() {
                let target: &EventTarget = zoom_box.as_ref();
                {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    listeners.push(listen(target, "wheel", false, move |e: &WheelEvent| {
                        e.prevent_default();
                        drive(&session, &redraw, |s| s.wheel(e.delta_y()));
                    }));
                }
                {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    let controls_ref = controls_ref.clone();
                    listeners.push(listen(target, "touchstart", true, move |e: &TouchEvent| {
                        if on_controls(&controls_ref, e) {
                            return;
                        }
                        let touches = touch_points(&e.touches());
                        drive(&session, &redraw, |s| s.touch_start(&touches));
                    }));
                }
                {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    let controls_ref = controls_ref.clone();
                    listeners.push(listen(target, "touchmove", false, move |e: &TouchEvent| {
                        if on_controls(&controls_ref, e) {
                            return;
                        }
                        e.prevent_default();
                        let touches = touch_points(&e.touches());
                        drive(&session, &redraw, |s| s.touch_move(&touches));
                    }));
                }
                {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    let controls_ref = controls_ref.clone();
                    listeners.push(listen(target, "touchend", true, move |e: &TouchEvent| {
                        if on_controls(&controls_ref, e) {
                            return;
                        }
                        let remaining = touch_points(&e.touches());
                        let lifted = touch_points(&e.changed_touches()).first().copied();
                        let now = now_ms();
                        drive(&session, &redraw, |s| s.touch_end(&remaining, lifted, now));
                    }));
                }
                {
                    let session = session.clone();
                    let redraw = redraw.clone();
                    listeners.push(listen(target, "touchcancel", true, move |_: &TouchEvent| {
                        drive(&session, &redraw, |s| s.touch_cancel())
                    }));
                }
            } else {
                log::warn!("Zoom viewer box not mounted; touch and wheel input disabled");
            }

            move || {
                drop(listeners);
                drop(fade_in);
                // Dropping the session releases its scroll lock if still held.
                if session.borrow_mut().take().is_some() {
                    log::debug!("Zoom viewer unmounted");
                }
            }
        });
    }

    let on_pointer_down = {
        let session = session.clone();
        let redraw = redraw.clone();
        let box_ref = box_ref.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(el) = box_ref.cast::<Element>() {
                let _ = el.set_pointer_capture(e.pointer_id());
            }
            drive(&session, &redraw, |s| s.pointer_down(pointer_at(&e)));
        })
    };
    let on_pointer_move = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: PointerEvent| drive(&session, &redraw, |s| s.pointer_move(pointer_at(&e))))
    };
    let on_pointer_up = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: PointerEvent| drive(&session, &redraw, |s| s.pointer_up()))
    };
    let on_close = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| drive(&session, &redraw, |s| s.request_close()))
    };
    let on_backdrop = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_zoom_in = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| drive(&session, &redraw, |s| s.zoom_in()))
    };
    let on_zoom_out = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| drive(&session, &redraw, |s| s.zoom_out()))
    };
    let on_reset = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| drive(&session, &redraw, |s| s.reset_zoom()))
    };
    let on_image_error = {
        let image_failed = image_failed.clone();
        let src = props.src.clone();
        Callback::from(move |_: Event| {
            log::warn!("Zoom viewer image failed to load: {}", src);
            image_failed.set(true);
        })
    };

    let (transform, visible, hint, zoomed, scale) = match session.borrow().as_ref() {
        Some(open) => {
            let s = open.state();
            (s.transform().css(), s.is_visible(), s.hint(), s.is_zoomed(), s.scale())
        }
        None => (String::from("translate(0px, 0px) scale(1)"), false, "Pinch or scroll to zoom", false, 1.0),
    };
    let (opacity, pointer_events) = if visible { (1.0, "auto") } else { (0.0, "none") };
    let cursor = if zoomed { "grab" } else { "zoom-in" };

    html! {
        <div class="zoom-overlay" onclick={on_backdrop}
            style={format!("position:fixed; inset:0; z-index:100; background:rgba(0,0,0,0.88); display:flex; align-items:center; justify-content:center; opacity:{}; pointer-events:{}; transition:opacity 150ms ease;", opacity, pointer_events)}>
            <div class="zoom-box" ref={box_ref}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                onpointerdown={on_pointer_down}
                onpointermove={on_pointer_move}
                onpointerup={on_pointer_up.clone()}
                onpointercancel={on_pointer_up}
                style={format!("position:relative; width:92vw; height:88vh; overflow:hidden; touch-action:none; user-select:none; cursor:{};", cursor)}>
                <div style="width:100%; height:100%; display:flex; align-items:center; justify-content:center;">
                    if *image_failed {
                        <div style="color:#8b949e; font-size:14px;">{"Image unavailable"}</div>
                    } else {
                        <img
                            src={props.src.clone()}
                            alt={props.alt.clone()}
                            draggable="false"
                            onerror={on_image_error}
                            oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}
                            style={format!("max-width:100%; max-height:100%; transform:{}; transform-origin:center; will-change:transform;", transform)}
                        />
                    }
                </div>
                <div ref={controls_ref} style="display:contents;">
                    <ViewerControls
                        hint={hint}
                        zoom_label={format!("{:.0}%", scale * 100.0)}
                        zoomed={zoomed}
                        on_zoom_in={on_zoom_in}
                        on_zoom_out={on_zoom_out}
                        on_reset={on_reset}
                        on_close={on_close}
                    />
                </div>
            </div>
        </div>
    }
}
