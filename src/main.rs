mod assets;
mod components;
mod config;
mod error;
mod host;
mod model;
mod state;
mod util;
mod web_host;

use components::app::App;

fn main() {
    util::init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
