//! LearnHub Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod display;
mod session;
mod store;

use app::{load_config, App};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = load_config();
    if let Err(e) = rolling_logger::init_logger("LearnHub", config.log_capacity) {
        web_sys::console::warn_1(&format!("Logger not installed: {}", e).into());
    }
    log::info!("Starting LearnHub against {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}
