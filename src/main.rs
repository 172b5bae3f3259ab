//! GPA calculator entry point
//!
//! The web build mounts the form into the page; the native build runs the
//! terminal front-end against a data directory (see `gpa-calculator --help`).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    gpa_calculator::ui::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::io;
    use std::process::ExitCode;

    use clap::Parser;
    use gpa_calculator::cli::{self, Cli};
    use gpa_calculator::persistence::FileStorage;
    use gpa_calculator::ui::console;
    use gpa_calculator::{Calculator, Settings};

    let args = Cli::parse();
    cli::init_logging();

    let dir = args.data_dir;
    let mut storage = match FileStorage::open(&dir) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Cannot use data directory {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let settings = Settings::load(&mut storage);
    cli::apply_log_level(settings.log_level);
    log::info!(
        "GPA calculator (native) starting, data in {}, log level {}",
        dir.display(),
        settings.log_level.as_str()
    );

    let mut calc = Calculator::load(storage, &settings);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = console::run(&mut calc, stdin.lock(), stdout.lock()) {
        log::error!("Terminal session failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
