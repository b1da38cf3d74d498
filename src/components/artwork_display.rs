use yew::prelude::*;

use crate::model::Artwork;

#[derive(Properties, PartialEq, Clone)]
pub struct ArtworkDisplayProps {
    pub artwork: Artwork,
    pub on_zoom: Callback<()>,
}

#[function_component(ArtworkDisplay)]
pub fn artwork_display(props: &ArtworkDisplayProps) -> Html {
    let a = &props.artwork;
    let zoom = {
        let cb = props.on_zoom.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="artwork-card" style="display:flex; flex-direction:column; align-items:center; gap:14px; max-width:720px; margin:0 auto;">
            <div class="artwork-canvas" onclick={zoom.clone()} style="cursor:zoom-in;">
                <img src={a.image.clone()} alt={a.title.clone()} draggable="false"
                    style="max-width:100%; max-height:62vh; border-radius:10px; box-shadow:0 6px 18px rgba(0,0,0,0.6);" />
            </div>
            <div class="artwork-meta" style="text-align:center; line-height:1.4;">
                <h2 style="margin:0; font-size:22px; color:#58a6ff;">{ a.title.clone() }</h2>
                <p style="margin:4px 0; opacity:0.85;">{ a.description.clone() }</p>
                <p style="margin:0; font-size:12px; opacity:0.6;">{ a.author.clone() }</p>
                <div style="display:flex; gap:12px; justify-content:center; margin-top:10px;">
                    <button onclick={zoom}>{"Zoom"}</button>
                    if let Some(link) = a.link.clone() {
                        <a href={link} class="artwork-link" style="color:#2ea043;">{"Enter the experience →"}</a>
                    }
                </div>
            </div>
        </div>
    }
}
