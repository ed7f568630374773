use anyhow::Result;
use clap::Parser;
use diskev::cli::Cli;
use diskev::config::Config;
use diskev::notify::BarNotifier;
use diskev::poll::PollLoop;
use diskev::volume::{VolumeSampler, VolumeStats};
use std::sync::mpsc;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on its own; the contract here is usage + exit 1.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("diskev: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = Config::load();
    let mount = cli.mount.as_deref().unwrap_or(&cfg.general.mount_point);
    let sampler = VolumeSampler::new(mount)?;

    if cli.json {
        return run_json_snapshot(&sampler);
    }

    let Some((event_name, interval)) = cli.event_args() else {
        anyhow::bail!("event name and interval are required");
    };

    let notifier = BarNotifier::new(cfg.notify.bar_command.clone());
    let mut poll = PollLoop::new(
        sampler,
        notifier,
        event_name.to_string(),
        interval,
        cfg.sampling.on_error,
        cli.verbose || cfg.general.verbose,
    );

    // Parked here for the life of the process; only an external signal
    // ends the loop.
    let (_stop_tx, stop_rx) = mpsc::channel();
    poll.run(&stop_rx)
}

fn run_json_snapshot(sampler: &VolumeSampler) -> Result<()> {
    let mut stats = VolumeStats::default();
    sampler.update(&mut stats)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
