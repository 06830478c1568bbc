pub fn init(verbose: bool) {
    use env_logger::Target;
    use log::LevelFilter;

    // The report goes to stdout; keep logs on stderr and quiet by default so
    // the two never interleave. RUST_LOG still wins when set.
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .target(Target::Stderr)
        .filter_level(level)
        .parse_default_env()
        .init();
}
