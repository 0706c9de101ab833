use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AnswerPanelProps {
    pub show: bool,
    /// Changes whenever the field has to be emptied.
    pub epoch: u32,
    pub on_submit: Callback<String>,
}

/// Free-text answer box with its submit button. Enter submits too.
#[function_component]
pub fn AnswerPanel(props: &AnswerPanelProps) -> Html {
    let input_ref = use_node_ref();
    {
        let input_ref = input_ref.clone();
        use_effect_with(props.epoch, move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            || ()
        });
    }
    {
        let input_ref = input_ref.clone();
        use_effect_with(props.show, move |show| {
            if *show {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }
    if !props.show {
        return html! {};
    }
    let submit = {
        let input_ref = input_ref.clone();
        let cb = props.on_submit.clone();
        move || {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                cb.emit(input.value());
            }
        }
    };
    let click_cb = {
        let submit = submit.clone();
        Callback::from(move |_| submit())
    };
    let key_cb = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            e.prevent_default();
            submit();
        }
    });
    html! {<div style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:8px; z-index:20;">
        <input ref={input_ref} type="text" placeholder="Your answer" onkeydown={key_cb}
            style="min-width:180px; padding:4px 8px;" />
        <button onclick={click_cb}>{"Submit"}</button>
    </div>}
}
