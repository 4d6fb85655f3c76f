pub fn setup(is_debug: bool) -> Result<(), fern::InitError> {
    let level = if is_debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("seriescope", level)
        .level_for("service", level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
