use anyhow::{ensure, Context};
use clap::Parser;
use kfetch_core::{Device, DeviceConfig, ReadOutcome};
use kfetch_hal::LinuxHal;
use std::io::{self, Write};

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let mut config =
        DeviceConfig::resolve(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(root) = &cli.proc_root {
        config.proc_root = root.clone();
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    config.validate().context("invalid configuration")?;
    ensure!(cli.chunk > 0, "--chunk must be at least 1");

    let hal = LinuxHal::with_proc_root(&config.proc_root);
    let device = Device::new(hal, config);
    let mask = cli.metric_mask();
    log::debug!("requesting mask {:#04x}", mask.bits());

    let session = device
        .open()
        .with_context(|| format!("failed to open /dev/{}", device.config().device_name))?;
    session
        .write(&mask.to_payload())
        .context("failed to write the metric mask")?;

    let mut stdout = io::stdout().lock();
    let mut chunk = vec![0u8; cli.chunk];
    loop {
        match session.read(&mut chunk).context("failed to read the report")? {
            ReadOutcome::Data(n) => stdout.write_all(&chunk[..n])?,
            ReadOutcome::End => break,
        }
    }
    stdout.flush()?;
    session.close();
    Ok(())
}
