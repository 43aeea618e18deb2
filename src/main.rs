//! photoview: a minimal frameless image viewer.
//!
//! Entry point: starts logging, then opens the viewer window.
//! When built without the `gui` feature, prints the metadata of each image
//! path given on the command line instead.

use photoview::services::logging;

#[cfg(feature = "gui")]
fn main() {
    let _logging = logging::init();

    if let Err(e) = photoview::ui::host_app::run() {
        tracing::error!(error = %e, "photoview failed to start");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use photoview::app::App;

    let _logging = logging::init();

    let paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
    if paths.is_empty() {
        eprintln!("usage: photoview <image>...");
        std::process::exit(2);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to start runtime");
            std::process::exit(1);
        }
    };

    let mut failed = false;
    for path in paths {
        match runtime.block_on(App::open_image(Some(path.clone()))) {
            Ok(Some(image)) => {
                println!("{}", image.file_name);
                println!("  size:       {}", image.size_label());
                println!("  dimensions: {}", image.dimensions_label());
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
