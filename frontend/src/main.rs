use crate::app::App;

mod app;
mod components;
mod config;
mod logging;
mod storage;
mod transport;

fn main() {
    logging::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
