use std::rc::Rc;

use web_sys::TouchEvent;
use yew::prelude::*;

use super::artwork_display::ArtworkDisplay;
use crate::model::{Artwork, Carousel, CarouselAction};

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryProps {
    pub items: Rc<Vec<Artwork>>,
    pub swipe_threshold: f64,
    /// Open the zoom viewer on this image.
    pub on_zoom: Callback<AttrValue>,
}

fn first_touch_x(e: &TouchEvent) -> Option<f64> {
    e.changed_touches().item(0).map(|t| t.client_x() as f64)
}

#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    let carousel = {
        let items = (*props.items).clone();
        let threshold = props.swipe_threshold;
        use_reducer(move || Carousel::new(items, threshold))
    };

    let next = {
        let carousel = carousel.clone();
        Callback::from(move |_| carousel.dispatch(CarouselAction::Next))
    };
    let prev = {
        let carousel = carousel.clone();
        Callback::from(move |_| carousel.dispatch(CarouselAction::Prev))
    };
    let touch_start = {
        let carousel = carousel.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e) {
                carousel.dispatch(CarouselAction::SwipeStart { x });
            }
        })
    };
    let touch_end = {
        let carousel = carousel.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e) {
                carousel.dispatch(CarouselAction::SwipeEnd { x });
            }
        })
    };

    let current = carousel.current_item().clone();
    let on_zoom = {
        let cb = props.on_zoom.clone();
        let image = AttrValue::from(current.image.clone());
        Callback::from(move |_| cb.emit(image.clone()))
    };

    let thumbs = carousel.items.iter().enumerate().map(|(i, a)| {
        let select = {
            let carousel = carousel.clone();
            Callback::from(move |_| carousel.dispatch(CarouselAction::Select(i)))
        };
        let border = if i == carousel.current { "#58a6ff" } else { "#30363d" };
        html! {
            <button key={a.id} class={classes!("thumb", (i == carousel.current).then_some("active"))} onclick={select}
                style={format!("padding:0; width:56px; height:56px; border:2px solid {}; border-radius:6px; overflow:hidden; background:none; cursor:pointer;", border)}>
                <img src={a.image.clone()} alt={a.title.clone()} style="width:100%; height:100%; object-fit:cover;" />
            </button>
        }
    });

    html! {
        <div class="gallery-root" style="display:flex; flex-direction:column; gap:18px; padding:24px 12px;">
            <div class="gallery-frame" ontouchstart={touch_start} ontouchend={touch_end}>
                <ArtworkDisplay key={current.id} artwork={current.clone()} on_zoom={on_zoom} />
            </div>
            <div class="gallery-controls" style="display:flex; gap:10px; align-items:center; justify-content:center;">
                <button class="nav-btn left" onclick={prev}>{"◀"}</button>
                <div class="thumbs" style="display:flex; gap:8px;">{ for thumbs }</div>
                <button class="nav-btn right" onclick={next}>{"▶"}</button>
            </div>
        </div>
    }
}
