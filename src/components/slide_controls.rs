use crate::host::SlideControls;
use crate::state::Input;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SlideControlsProps {
    pub controls: SlideControls,
    pub on_input: Callback<Input>,
}

#[function_component]
pub fn SlideControlsBar(props: &SlideControlsProps) -> Html {
    if !props.controls.visible {
        return html! {};
    }
    let button = |input: Input| {
        let cb = props.on_input.clone();
        Callback::from(move |_| cb.emit(input.clone()))
    };
    html! {<div style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:8px; z-index:20;">
        <button onclick={button(Input::Prev)}>{"Prev"}</button>
        <button onclick={button(Input::Next)}>{"Next"}</button>
        { if props.controls.skip { html!{ <button onclick={button(Input::Skip)}>{"Skip"}</button> } } else { html!{} } }
    </div>}
}
