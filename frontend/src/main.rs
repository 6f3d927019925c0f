use crate::app::App;

mod adapters;
mod app;
mod components;
mod config;
mod logger;
mod routes;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
