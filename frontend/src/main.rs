use crate::app::App;

mod api;
mod app;
mod components;
mod logging;
mod navigation;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
