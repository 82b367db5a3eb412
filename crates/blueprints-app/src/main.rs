//! Main application entry point (native).
//!
//! Usage: `blueprints [DIRECTORY_URL]`. The argument takes precedence over
//! `BLUEPRINTS_DIRECTORY_URL`.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Blueprints");

    let mut config = blueprints_app::AppConfig::from_env();
    if let Some(url) = std::env::args().nth(1) {
        config = config.with_directory_url(url);
    }

    if let Err(e) = blueprints_app::App::run(config) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
