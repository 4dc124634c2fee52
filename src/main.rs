mod components;
mod deck;

use components::app::App;

fn main() {
    touchstac::util::init_logging(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
