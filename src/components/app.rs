use std::rc::Rc;

use yew::prelude::*;

use super::{gallery::Gallery, zoom_viewer::ZoomViewer};
use crate::config::GestureConfig;
use crate::model::load_catalogue;
use crate::state::ScrollLockHandle;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| GestureConfig::load());
    let catalogue = use_memo((), |_| load_catalogue().map(Rc::new));
    // One lock for the whole page, handed to every overlay through context.
    let scroll_lock = use_memo((), |_| ScrollLockHandle::body());
    let zoom_src = use_state(|| None::<AttrValue>);

    let open_zoom = {
        let zoom_src = zoom_src.clone();
        Callback::from(move |src: AttrValue| zoom_src.set(Some(src)))
    };
    let close_zoom = {
        let zoom_src = zoom_src.clone();
        Callback::from(move |_| zoom_src.set(None))
    };

    let content = match &*catalogue {
        Ok(items) => html! {
            <Gallery items={items.clone()} swipe_threshold={config.swipe_threshold_px} on_zoom={open_zoom} />
        },
        Err(e) => {
            log::error!("{}", e);
            html! { <div style="padding:24px; color:#f85149;">{"The gallery could not be loaded."}</div> }
        }
    };

    let viewer = match (*zoom_src).clone() {
        Some(src) => {
            let key = src.to_string();
            html! {
                <ZoomViewer key={key} src={src} config={config.clone()} on_close={close_zoom} />
            }
        }
        None => html! {},
    };

    html! {
        <ContextProvider<ScrollLockHandle> context={(*scroll_lock).clone()}>
            <div style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
                { content }
                { viewer }
            </div>
        </ContextProvider<ScrollLockHandle>>
    }
}
