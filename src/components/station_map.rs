use crate::host::StationMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StationMapProps {
    pub map: Option<StationMap>,
    pub on_select: Callback<String>,
}

/// Station picker shown between hub stations; played stations are greyed out.
#[function_component]
pub fn StationMapView(props: &StationMapProps) -> Html {
    let Some(map) = &props.map else {
        return html! {};
    };
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:#0d1117; z-index:10;">
        <div style="display:grid; grid-template-columns:repeat(2, minmax(140px, 1fr)); gap:16px;">
            { for map.stations.iter().map(|s| {
                let cb = props.on_select.clone();
                let id = s.id.clone();
                let style = if s.played {
                    "padding:24px; border-radius:12px; border:1px solid #30363d; background:#161b22; color:#8b949e; opacity:0.5;"
                } else {
                    "padding:24px; border-radius:12px; border:1px solid #58a6ff; background:#1f6feb; color:#fff; cursor:pointer;"
                };
                html!{ <button key={s.id.clone()} disabled={s.played} {style}
                    onclick={Callback::from(move |_| cb.emit(id.clone()))}>{ s.label.clone() }</button> }
            }) }
        </div>
    </div>}
}
