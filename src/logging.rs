//! File logging, enabled with `--log`

use std::path::Path;

/// Sends every record at or above `min_level` to `path`, appending.
pub fn init_logger(min_level: log::LevelFilter, path: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            // UTC only; the local offset can't be read safely once threads exist.
            let now = time::OffsetDateTime::now_utc()
                .format(&time::macros::format_description!(
                    "[[[year]-[month]-[day]][[[hour]:[minute]:[second][subsecond digits:3]]"
                ))
                .unwrap_or_default();

            out.finish(format_args!(
                "{}[{}][{}] {}",
                now,
                record.target(),
                record.level(),
                message
            ))
        })
        .level(min_level)
        .chain(fern::log_file(path)?)
        .apply()?;

    Ok(())
}
