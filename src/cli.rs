use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "diskev", about = "disk capacity event provider for status bars", version = "0.1")]
pub struct Cli {
    /// Event name registered with the host bar
    #[arg(value_parser = parse_event_name, required_unless_present = "json")]
    pub event_name: Option<String>,

    /// Polling interval in seconds (positive, fractions allowed)
    #[arg(value_parser = parse_interval, required_unless_present = "json")]
    pub interval: Option<Duration>,

    /// Mount point to report on (overrides the config file)
    #[arg(short, long)]
    pub mount: Option<String>,

    /// Echo each dispatched trigger to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a one-shot JSON snapshot of the volume and exit
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Both positionals, present on every non-`--json` invocation
    /// (clap enforces them).
    pub fn event_args(&self) -> Option<(&str, Duration)> {
        Some((self.event_name.as_deref()?, self.interval?))
    }
}

fn parse_event_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("event name must not be empty".into());
    }
    Ok(s.to_string())
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err("interval must be a positive number of seconds".into());
    }
    Ok(Duration::from_secs_f64(secs))
}
