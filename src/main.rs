mod components;
mod config;
mod error;
mod game;
mod logging;
mod platform;
mod render;
mod util;

use components::app::App;

fn main() {
    logging::init();
    tracing::info!("site dino starting");
    yew::Renderer::<App>::new().render();
}
