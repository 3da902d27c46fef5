use std::path::PathBuf;

use orbit_viewer::settings::ViewerSettings;

fn main() {
    orbit_viewer::init_logging();

    let mut settings = ViewerSettings::load();
    if let Some(path) = std::env::args_os().nth(1) {
        settings.mesh_path = PathBuf::from(path);
    }

    if let Err(err) = orbit_viewer::run(settings) {
        log::error!("Application error: {err}");
        eprintln!("Application error: {err}");
        std::process::exit(1);
    }
}
