use crate::config::LoggingSettings;
use log::LevelFilter;

/// Level implied by the two settings toggles. `advanced` wins over `basic`.
pub fn level_for(settings: &LoggingSettings) -> LevelFilter {
    if settings.advanced {
        LevelFilter::Debug
    } else if settings.basic {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

pub fn init(settings: &LoggingSettings) {
    use env_logger::Target;
    use std::fs;
    use std::io;

    // Use the configured log file when it can be opened; otherwise stderr.
    let target = settings
        .file
        .as_ref()
        .and_then(|path| {
            (|| -> io::Result<Target> {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Target::Pipe(Box::new(file)))
            })()
            .ok()
        })
        .unwrap_or(Target::Stderr);

    // RUST_LOG still takes precedence over the toggles.
    let _ = env_logger::Builder::new()
        .filter_level(level_for(settings))
        .parse_default_env()
        .target(target)
        .try_init();
}
