use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

/// Maps the `-v` count to a level filter.
///
/// * 0 => Warn,
/// * 1 => Info,
/// * 2 => Debug,
/// * 3 or more => Trace.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes file logging. The terminal belongs to the UI, so records go to
/// `path` only. Later calls are ignored.
pub fn init_logger(path: &Path, verbose: u8) -> Result<(), fern::InitError> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = build_dispatch(path, level_for(verbose)).and_then(|d| {
            d.apply()?;
            Ok(())
        });
    });
    result
}

fn build_dispatch(path: &Path, level: LevelFilter) -> Result<Dispatch, fern::InitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn test_build_dispatch_creates_log_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("logs").join("geotrigger.log");
        assert!(build_dispatch(&path, LevelFilter::Info).is_ok());
        assert!(path.parent().unwrap().is_dir());
    }
}
