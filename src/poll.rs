use crate::config::SampleErrorPolicy;
use crate::event;
use crate::notify::Notify;
use crate::volume::{VolumeSampler, VolumeStats};
use anyhow::Result;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Steady-state event loop: register the event once, then
/// sample → format → dispatch → sleep until told to stop.
/// In production nothing ever sends on the stop channel, so the loop runs
/// until the process is killed; tests use it to run a bounded number of
/// cycles.
pub struct PollLoop<N: Notify> {
    sampler:    VolumeSampler,
    notifier:   N,
    event_name: String,
    interval:   Duration,
    on_error:   SampleErrorPolicy,
    verbose:    bool,
}

impl<N: Notify> PollLoop<N> {
    pub fn new(
        sampler: VolumeSampler,
        notifier: N,
        event_name: String,
        interval: Duration,
        on_error: SampleErrorPolicy,
        verbose: bool,
    ) -> Self {
        Self { sampler, notifier, event_name, interval, on_error, verbose }
    }

    /// Runs until `stop` yields a message or its sender is dropped. The
    /// interval wait doubles as the stop check, so shutdown is immediate.
    pub fn run(&mut self, stop: &Receiver<()>) -> Result<()> {
        self.notifier.notify(&event::registration(&self.event_name));

        let mut stats = VolumeStats::default();
        loop {
            if let Err(err) = self.sampler.update(&mut stats) {
                match self.on_error {
                    // The stale snapshot is still dispatched; the host only
                    // ever sees the freshest reading we have.
                    SampleErrorPolicy::Stale => {
                        if self.verbose {
                            eprintln!(
                                "{} sample failed, reusing previous reading: {err:#}",
                                chrono::Local::now().format("%H:%M:%S")
                            );
                        }
                    }
                    SampleErrorPolicy::Exit => return Err(err),
                }
            }

            let message = event::trigger(&self.event_name, &stats);
            if self.verbose {
                eprintln!("{} {message}", chrono::Local::now().format("%H:%M:%S"));
            }
            self.notifier.notify(&message);

            match stop.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }
    }
}
