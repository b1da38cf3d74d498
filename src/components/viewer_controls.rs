use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerControlsProps {
    pub hint: AttrValue,
    pub zoom_label: AttrValue,
    pub zoomed: bool,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ViewerControls)]
pub fn viewer_controls(props: &ViewerControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rs = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cl = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Presses on the controls must not start a pan on the viewer box.
    let swallow = Callback::from(|e: PointerEvent| e.stop_propagation());

    html! {<>
        <button class="zoom-close-btn" onclick={cl} onpointerdown={swallow.clone()}
            style="position:absolute; top:12px; right:12px; width:36px; height:36px; border-radius:50%; border:1px solid #30363d; background:rgba(22,27,34,0.9); color:#e6edf3; font-size:16px; cursor:pointer;">
            {"✕"}
        </button>
        <div onpointerdown={swallow}
            style="position:absolute; left:50%; bottom:12px; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:6px 10px; display:flex; gap:6px; align-items:center; color:#e6edf3; font-size:13px;">
            <button onclick={zo} disabled={!props.zoomed}> {"-"} </button>
            <span style="min-width:44px; text-align:center;">{ props.zoom_label.clone() }</span>
            <button onclick={zi}> {"+"} </button>
            <button onclick={rs} disabled={!props.zoomed}> {"Fit"} </button>
            <span style="width:8px;"></span>
            <span class="zoom-info">{ props.hint.clone() }</span>
        </div>
    </>}
}
