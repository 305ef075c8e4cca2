//! Loop drivers: call the tick body repeatedly, either at a fixed rate or
//! once per frame delivered by a presentation host.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use ember_core::TimeSource;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::simulation::SharedSimulation;

/// The reference fixed tick rate.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 60.0;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Tick rate must be a positive, finite number of ticks per second (got {0})")]
    InvalidTickRate(f64),
    #[error("Presentation-synchronized mode needs a frame host")]
    MissingFrameHost,
    #[error("Failed to start driver thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Driver thread panicked")]
    Panicked,
}

/// How a driver paces ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveMode {
    /// A repeating timer. Ticks that fall behind are delayed, never bunched.
    FixedRate { ticks_per_second: f64 },
    /// One tick per frame callback from a [`FrameHost`].
    PresentationSync,
}

impl Default for DriveMode {
    fn default() -> Self {
        Self::FixedRate {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

fn tick_period(ticks_per_second: f64) -> Result<Duration, DriverError> {
    if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
        return Err(DriverError::InvalidTickRate(ticks_per_second));
    }
    Ok(Duration::from_secs_f64(1.0 / ticks_per_second))
}

/// Something that paces presentation frames, like a display's refresh.
pub trait FrameHost: Send {
    /// Block until the next frame is due. `false` means the host has shut down.
    fn next_frame(&mut self) -> bool;
}

/// Frames arrive as messages; the host ends when every sender is dropped.
pub struct ChannelFrameHost {
    frames: mpsc::Receiver<()>,
}

impl ChannelFrameHost {
    pub fn new() -> (mpsc::Sender<()>, Self) {
        let (tx, frames) = mpsc::channel();
        (tx, Self { frames })
    }
}

impl FrameHost for ChannelFrameHost {
    fn next_frame(&mut self) -> bool {
        self.frames.recv().is_ok()
    }
}

/// Stands in for a display: a frame every `interval` on the wall clock.
pub struct PacedFrameHost {
    interval: Duration,
    next: Option<Instant>,
}

impl PacedFrameHost {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }
}

impl FrameHost for PacedFrameHost {
    fn next_frame(&mut self) -> bool {
        let now = Instant::now();
        let due = self.next.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        // Late frames are not made up.
        self.next = Some(due.max(now) + self.interval);
        true
    }
}

/// Cancels a running driver. Clones share the same signal.
#[derive(Clone)]
pub struct StopHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    /// No tick starts after this returns. A tick already running completes.
    pub fn stop(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once [`stop`](Self::stop) has been called.
    pub async fn stopped(&self) {
        let mut rx = self.signal.subscribe();
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Repeatedly ticks a shared simulation with timestamps from a time source.
pub struct LoopDriver {
    simulation: SharedSimulation,
    time: Arc<dyn TimeSource>,
    stop: StopHandle,
    max_ticks: Option<u64>,
}

impl LoopDriver {
    pub fn new(simulation: SharedSimulation, time: Arc<dyn TimeSource>) -> Self {
        Self {
            simulation,
            time,
            stop: StopHandle::new(),
            max_ticks: None,
        }
    }

    /// Stop on its own after this many ticks.
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn should_stop(&self, ticks: u64) -> bool {
        self.stop.is_stopped() || self.max_ticks.is_some_and(|max| ticks >= max)
    }

    fn tick_once(&self) {
        // Read the time under the lock so ticks from drivers sharing the
        // simulation see non-decreasing timestamps.
        let mut simulation = self.simulation.lock();
        let now = self.time.now();
        simulation.tick(now);
    }

    /// Tick every `1 / ticks_per_second` seconds until stopped.
    ///
    /// Returns the number of ticks run.
    pub async fn run_fixed_rate(&self, ticks_per_second: f64) -> Result<u64, DriverError> {
        let period = tick_period(ticks_per_second)?;
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(ticks_per_second, "Fixed-rate driver started");
        let mut ticks = 0u64;
        while !self.should_stop(ticks) {
            tokio::select! {
                _ = interval.tick() => {
                    if self.stop.is_stopped() {
                        break;
                    }
                    self.tick_once();
                    ticks += 1;
                }
                _ = self.stop.stopped() => break,
            }
        }
        info!(ticks, "Fixed-rate driver stopped");
        Ok(ticks)
    }

    /// Tick once per frame from `host` until stopped or the host shuts down.
    ///
    /// Returns the number of ticks run.
    pub fn run_presentation<H: FrameHost + ?Sized>(&self, host: &mut H) -> u64 {
        info!("Presentation driver started");
        let mut ticks = 0u64;
        while !self.should_stop(ticks) {
            if !host.next_frame() {
                debug!("Frame host shut down");
                break;
            }
            if self.stop.is_stopped() {
                break;
            }
            self.tick_once();
            ticks += 1;
        }
        info!(ticks, "Presentation driver stopped");
        ticks
    }

    /// Run the driver on its own thread in the given mode.
    pub fn start(
        self,
        mode: DriveMode,
        host: Option<Box<dyn FrameHost>>,
    ) -> Result<RunningDriver, DriverError> {
        let stop = self.stop.clone();
        let thread = match mode {
            DriveMode::FixedRate { ticks_per_second } => {
                tick_period(ticks_per_second)?;
                std::thread::Builder::new()
                    .name("ember-fixed-rate".into())
                    .spawn(move || -> Result<u64, DriverError> {
                        let runtime = tokio::runtime::Builder::new_current_thread()
                            .enable_time()
                            .build()?;
                        runtime.block_on(self.run_fixed_rate(ticks_per_second))
                    })?
            }
            DriveMode::PresentationSync => {
                let mut host = host.ok_or(DriverError::MissingFrameHost)?;
                std::thread::Builder::new()
                    .name("ember-presentation".into())
                    .spawn(move || Ok(self.run_presentation(host.as_mut())))?
            }
        };
        Ok(RunningDriver { stop, thread })
    }
}

/// A driver running on a background thread.
pub struct RunningDriver {
    stop: StopHandle,
    thread: JoinHandle<Result<u64, DriverError>>,
}

impl RunningDriver {
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the driver to finish, returning the number of ticks it ran.
    pub fn join(self) -> Result<u64, DriverError> {
        self.thread.join().map_err(|_| DriverError::Panicked)?
    }
}
