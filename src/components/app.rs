use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::answer_panel::AnswerPanel;
use super::settings_modal::SettingsModal;
use super::slide_controls::SlideControlsBar;
use super::start_overlay::StartOverlay;
use super::station_map::StationMapView;
use super::yes_no_prompt::YesNoPrompt;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::host::TimerId;
use crate::model::Course;
use crate::state::{
    CheckpointStore, Input, KeyValueStore, LocalStorage, MemoryStore, Session, SessionAction,
};
use crate::web_host::{PageRefs, UiState, WebHost, preload};

/// Session plus the host it drives; lives in a `use_mut_ref` cell for the app's lifetime.
struct Engine {
    session: Session,
    host: WebHost,
}

type EngineCell = Rc<RefCell<Option<Engine>>>;

// Feeds one action to the session and publishes the resulting UI snapshot.
fn run(engine: &EngineCell, ui: &UseStateHandle<UiState>, action: SessionAction) {
    let snapshot = {
        let mut slot = engine.borrow_mut();
        let Some(engine) = slot.as_mut() else {
            return;
        };
        if let SessionAction::Input(Input::Timer(id)) = &action {
            engine.host.timer_fired(*id);
        }
        engine.session.apply(action, &mut engine.host);
        let mut snapshot = engine.host.ui().clone();
        snapshot.course_complete = engine.session.is_complete();
        snapshot
    };
    ui.set(snapshot);
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; progress will not survive a reload", e);
            Box::new(MemoryStore::default())
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let course = use_memo((), |_| Course::builtin());
    let config = use_memo((), |_| GameConfig::default());
    let refs = use_memo((), |_| PageRefs::default());
    let ui = use_state(UiState::default);
    let started = use_state(|| false);
    let show_settings = use_state(|| false);
    let engine: EngineCell = use_mut_ref(|| None::<Engine>);

    // Build the session once the canvas and media elements exist.
    {
        let engine = engine.clone();
        let ui = ui.clone();
        let course = course.clone();
        let config = config.clone();
        let refs = refs.clone();
        use_effect_with((), move |_| {
            if let Ok(course) = &*course {
                let weak: Weak<RefCell<Option<Engine>>> = Rc::downgrade(&engine);
                let timer_ui = ui.clone();
                let on_timer = Callback::from(move |id: TimerId| {
                    if let Some(engine) = weak.upgrade() {
                        run(&engine, &timer_ui, SessionAction::Input(Input::Timer(id)));
                    }
                });
                let images = preload(course);
                let host = WebHost::new((*refs).clone(), images, on_timer, config.click_volume);
                let store = CheckpointStore::new(open_store(), config.checkpoint_key.clone());
                let session = Session::new(course, (*config).clone(), store);
                *engine.borrow_mut() = Some(Engine { session, host });
            }
            || ()
        });
    }

    // Window keydown drives the keyed quizzes.
    {
        let engine = engine.clone();
        let ui = ui.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                run(&engine, &ui, SessionAction::Input(Input::Key(e.key())));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(keydown_cb);
            }
        });
    }

    let on_input = {
        let engine = engine.clone();
        let ui = ui.clone();
        Callback::from(move |input: Input| run(&engine, &ui, SessionAction::Input(input)))
    };
    let on_submit = {
        let on_input = on_input.clone();
        Callback::from(move |text: String| on_input.emit(Input::Submit(text)))
    };
    let on_station = {
        let on_input = on_input.clone();
        Callback::from(move |id: String| on_input.emit(Input::Station(id)))
    };
    let on_video_ended = {
        let on_input = on_input.clone();
        Callback::from(move |_: Event| on_input.emit(Input::VideoEnded))
    };
    let on_start = {
        let engine = engine.clone();
        let ui = ui.clone();
        let started = started.clone();
        Callback::from(move |_| {
            started.set(true);
            run(&engine, &ui, SessionAction::Start);
        })
    };
    let on_restart = {
        let engine = engine.clone();
        let ui = ui.clone();
        let show_settings = show_settings.clone();
        Callback::from(move |_| {
            show_settings.set(false);
            run(&engine, &ui, SessionAction::Restart);
        })
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    let start_image = match &*course {
        Ok(course) => course.start_image.path(),
        Err(e) => return load_error(e),
    };

    let canvas_style = if ui.canvas_visible {
        "position:absolute; inset:0; width:100%; height:100%; display:block;"
    } else {
        "display:none;"
    };
    let video_style = if ui.video_visible {
        "position:absolute; inset:0; width:100%; height:100%; background:#000; z-index:30;"
    } else {
        "display:none;"
    };

    html! {<div style="position:fixed; inset:0; background:#000; overflow:hidden; font-family:sans-serif;">
        <canvas ref={refs.canvas.clone()} style={canvas_style} />
        <video ref={refs.video.clone()} style={video_style} onended={on_video_ended} />
        <audio ref={refs.click.clone()} src={config.click_sound.clone()} preload="auto" />
        <StationMapView map={ui.station_map.clone()} on_select={on_station} />
        <SlideControlsBar controls={ui.slide_controls} on_input={on_input.clone()} />
        <YesNoPrompt show={ui.yes_no} on_input={on_input} />
        <AnswerPanel show={ui.answer_box} epoch={ui.answer_epoch} {on_submit} />
        <StartOverlay show={!*started} image={start_image} {on_start} />
        { if ui.course_complete {
            html!{ <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); color:#c9d1d9; font-size:22px; text-align:center;">{"Course complete"}</div> }
        } else { html!{} } }
        { if *started {
            html!{ <button onclick={open_settings} style="position:absolute; top:12px; right:12px; z-index:35; padding:4px 10px;">{"Settings"}</button> }
        } else { html!{} } }
        <SettingsModal show={*show_settings} on_close={close_settings} {on_restart} />
    </div>}
}

fn load_error(e: &GameError) -> Html {
    log::error!("course could not be loaded: {}", e);
    html! {<div style="padding:24px; color:#f85149; font-family:sans-serif;">
        { format!("The course could not be loaded: {}", e) }
    </div>}
}
