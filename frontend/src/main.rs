use app::App;

mod api;
mod app;
mod browser;
mod list;
mod logging;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
