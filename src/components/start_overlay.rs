use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StartOverlayProps {
    pub show: bool,
    pub image: String,
    pub on_start: Callback<()>,
}

/// Full-screen start image; one click begins the course.
#[function_component(StartOverlay)]
pub fn start_overlay(props: &StartOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:#000; z-index:40;">
            <img src={props.image.clone()} alt="Start" onclick={start_cb}
                style="max-width:100%; max-height:100%; object-fit:contain; cursor:pointer;" />
        </div>
    }
}
