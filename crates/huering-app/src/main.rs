//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting HueRing");

    let mut config = huering_app::AppConfig::default();

    // Optional picker configuration as a JSON file.
    if let Some(path) = std::env::args().nth(1) {
        match huering_app::load_picker_config(std::path::Path::new(&path)) {
            Ok(picker) => config.picker = picker,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    pollster::block_on(huering_app::App::run(config));
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
