use crate::state::Input;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct YesNoPromptProps {
    pub show: bool,
    pub on_input: Callback<Input>,
}

#[function_component]
pub fn YesNoPrompt(props: &YesNoPromptProps) -> Html {
    if !props.show {
        return html! {};
    }
    let yes_cb = {
        let cb = props.on_input.clone();
        Callback::from(move |_| cb.emit(Input::Yes))
    };
    let no_cb = {
        let cb = props.on_input.clone();
        Callback::from(move |_| cb.emit(Input::No))
    };
    html! {<div style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); display:flex; gap:16px; z-index:20;">
        <button onclick={yes_cb} style="min-width:96px; padding:8px 16px; background:#238636; border:1px solid #2ea043; color:#fff; border-radius:6px;">{"Yes"}</button>
        <button onclick={no_cb} style="min-width:96px; padding:8px 16px; background:#21262d; border:1px solid #30363d; color:#fff; border-radius:6px;">{"No"}</button>
    </div>}
}
