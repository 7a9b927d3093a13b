//! Timing for the wave's steps.
//!
//! [AnimationDriver] is polled by the host's render loop and says when the next step is due.
//! Hosts without a render loop can spawn a [Ticker] instead, which sends a message on a channel
//! for every step and stops as soon as it's dropped.

use anyhow::{Context, Result};
use log::{debug, error, info};
use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// The outcome of polling an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// Nothing changed, there's no need to redraw.
    Unmodified,
    /// The wave moved and should be redrawn.
    Modified,
}

/// Decides when the wave steps.
#[derive(Debug)]
pub struct AnimationDriver {
    duration: Duration,
    next_tick: Option<Instant>,
    generation: u64,
}

impl AnimationDriver {
    pub fn new(duration: Duration) -> Self {
        Self { duration, next_tick: None, generation: 0 }
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// The number of times this driver went from paused to running.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the time between steps. Applies from the next scheduled step on.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Start stepping. The first step is due one duration from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.duration);
            self.generation += 1;
            debug!("animation started, stepping every {:?}", self.duration);
        }
    }

    /// Stop stepping, dropping whatever step was scheduled.
    pub fn pause(&mut self) {
        if self.next_tick.take().is_some() {
            debug!("animation paused");
        }
    }

    /// Check whether a step is due, scheduling the following one if it is.
    pub fn poll(&mut self, now: Instant) -> PollableState {
        match self.next_tick {
            Some(next_tick) if now >= next_tick => {
                self.next_tick = Some(now + self.duration);
                PollableState::Modified
            }
            _ => PollableState::Unmodified,
        }
    }
}

/// A message sent by a [Ticker] every time the wave should step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick;

/// A background thread that emits a [Tick] at a fixed rate.
///
/// Dropping the ticker stops the thread and waits for it, so no tick is ever delivered after the
/// ticker is gone.
pub struct Ticker {
    cancel: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker sending a [Tick] to `ticks` every `duration`.
    ///
    /// The thread also stops on its own once the receiving end of `ticks` is dropped.
    pub fn spawn(ticks: Sender<Tick>, duration: Duration) -> Result<Self> {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let thread_handle = thread::Builder::new()
            .name("wave-ticker".to_string())
            .spawn(move || {
                loop {
                    match cancelled.recv_timeout(duration) {
                        Err(RecvTimeoutError::Timeout) => {
                            if ticks.send(Tick).is_err() {
                                info!("Ticker: receiver closed, exiting");
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Ticker: thread exiting");
            })
            .context("failed to spawn ticker thread")?;

        info!("Ticker spawned, ticking every {duration:?}");
        Ok(Self { cancel: Some(cancel), thread_handle: Some(thread_handle) })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        debug!("Ticker dropped");
        // Closing the channel wakes the thread up even if it's mid-wait.
        self.cancel.take();
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                error!("Ticker thread panicked: {e:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn ticks_after_duration() {
        let now = Instant::now();
        let mut driver = AnimationDriver::new(STEP);
        assert_eq!(driver.poll(now + STEP), PollableState::Unmodified);

        driver.start(now);
        assert_eq!(driver.poll(now + STEP / 2), PollableState::Unmodified);
        assert_eq!(driver.poll(now + STEP), PollableState::Modified);
        // the next step is scheduled relative to the poll that fired
        assert_eq!(driver.poll(now + STEP + STEP / 2), PollableState::Unmodified);
        assert_eq!(driver.poll(now + STEP * 2), PollableState::Modified);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let now = Instant::now();
        let mut driver = AnimationDriver::new(STEP);
        driver.start(now);
        driver.start(now + STEP / 2);
        assert_eq!(driver.generation(), 1);
        assert_eq!(driver.poll(now + STEP), PollableState::Modified);

        driver.pause();
        driver.pause();
        assert!(!driver.is_running());
        assert_eq!(driver.generation(), 1);
    }

    #[test]
    fn pause_discards_scheduled_tick() {
        let now = Instant::now();
        let mut driver = AnimationDriver::new(STEP);
        driver.start(now);
        driver.pause();
        assert_eq!(driver.poll(now + STEP * 10), PollableState::Unmodified);

        driver.start(now + STEP * 10);
        assert_eq!(driver.generation(), 2);
        assert_eq!(driver.poll(now + STEP * 10), PollableState::Unmodified);
    }

    #[test]
    fn ticker_delivers_until_dropped() {
        let (sender, receiver) = mpsc::channel();
        let ticker = Ticker::spawn(sender, Duration::from_millis(5)).expect("spawn failed");
        assert_eq!(receiver.recv_timeout(Duration::from_secs(5)), Ok(Tick));
        drop(ticker);
        // drain whatever was in flight; the sender is gone once the thread exits
        while receiver.try_recv().is_ok() {}
        assert_eq!(receiver.recv_timeout(Duration::from_millis(50)), Err(RecvTimeoutError::Disconnected));
    }

    #[test]
    fn ticker_stops_when_receiver_goes_away() {
        let (sender, receiver) = mpsc::channel();
        let ticker = Ticker::spawn(sender, Duration::from_millis(1)).expect("spawn failed");
        drop(receiver);
        // joining must not hang
        drop(ticker);
    }
}
