use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::core::config::ClientConfig;
use ui::i18n;
use ui::views::Dashboard;

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Shared theme lives in the ui crate; inlined so the bundle needs no extra asset.

fn main() {
    let _ = dioxus::logger::init(Level::INFO);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();
    let config = use_hook(ClientConfig::detect);

    rsx! {
        document::Title { "Transloom" }
        document::Style { "{THEME_CSS}" }
        Dashboard { config }
    }
}
