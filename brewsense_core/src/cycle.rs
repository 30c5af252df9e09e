//! Fixed-period tick loop: sample → tick → drive → publish.
//!
//! ## RT Setup
//! 1. `mlockall(MCL_CURRENT | MCL_FUTURE)` - lock all pages.
//! 2. Prefault stack pages.
//! 3. `sched_setaffinity` - pin to an isolated CPU core.
//! 4. `sched_setscheduler(SCHED_FIFO, prio)` - RT priority.
//!
//! Steps 1, 3 and 4 need the `rt` feature; the stack prefault always runs.
//!
//! ## Pacing
//! Deadlines are absolute (`start + n × period`) so sleep jitter does not
//! accumulate. Under `rt` the loop sleeps with `clock_nanosleep(TIMER_ABSTIME)`
//! and a tick that overruns its budget is fatal; in simulation overruns are
//! counted and logged.

use std::sync::atomic::{AtomicBool, Ordering};

use brewsense_common::board::{BoardError, BoardIo};
use brewsense_common::config::Timing;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::frontend::FrontEnd;
use pacer::Pacer;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total ticks executed.
    pub cycle_count: u64,
    /// Last tick body duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum tick body duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum tick body duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
    /// Number of overruns detected.
    pub overruns: u64,
    /// Maximum wake-up latency [ns] (time between deadline and actual wake).
    pub max_latency_ns: i64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
            max_latency_ns: 0,
        }
    }

    /// Record a tick duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: i64, latency_ns: i64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns += duration_ns;
        self.max_latency_ns = self.max_latency_ns.max(latency_ns);
    }

    /// Average tick time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors during RT setup or loop execution.
#[derive(Debug, Error)]
pub enum CycleError {
    /// RT system call failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),

    /// Board driver failed.
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    /// Tick body exceeded its budget.
    #[error("cycle overrun: {actual_ns}ns > {budget_ns}ns budget")]
    Overrun {
        /// Actual tick duration [ns].
        actual_ns: i64,
        /// Configured tick budget [ns].
        budget_ns: i64,
    },
}

// ─── RT Setup ───────────────────────────────────────────────────────

/// Stack touched by [`rt_setup`] before the loop starts.
const PREFAULT_STACK_BYTES: usize = 256 * 1024;

/// Perform the RT setup sequence. Call before [`CycleRunner::run`].
///
/// Memory locking, CPU pinning and the FIFO scheduler are only applied with
/// the `rt` feature; the stack prefault always runs.
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), CycleError> {
    #[cfg(feature = "rt")]
    {
        rt::lock_memory()?;
        prefault_stack();
        rt::pin_to_core(cpu_core)?;
        rt::enable_fifo(rt_priority)?;
        info!("RT setup done: core={cpu_core}, SCHED_FIFO priority={rt_priority}");
    }
    #[cfg(not(feature = "rt"))]
    {
        prefault_stack();
        debug!("RT setup skipped (core={cpu_core}, priority={rt_priority}): built without `rt`");
    }
    Ok(())
}

fn prefault_stack() {
    let mut stack = [0u8; PREFAULT_STACK_BYTES];
    core::hint::black_box(&mut stack).fill(0xFF);
    core::hint::black_box(&stack);
}

#[cfg(feature = "rt")]
mod rt {
    use super::CycleError;
    use nix::sched::{CpuSet, sched_setaffinity};
    use nix::sys::mman::{MlockallFlags, mlockall};
    use nix::unistd::Pid;

    fn failed(what: impl std::fmt::Display) -> impl FnOnce(nix::Error) -> CycleError {
        move |e| CycleError::RtSetup(format!("{what}: {e}"))
    }

    pub(super) fn lock_memory() -> Result<(), CycleError> {
        mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE).map_err(failed("mlockall"))
    }

    pub(super) fn pin_to_core(core: usize) -> Result<(), CycleError> {
        let mut set = CpuSet::new();
        set.set(core).map_err(failed(format!("core {core}")))?;
        sched_setaffinity(Pid::from_raw(0), &set).map_err(failed("sched_setaffinity"))
    }

    pub(super) fn enable_fifo(priority: i32) -> Result<(), CycleError> {
        let param = libc::sched_param {
            sched_priority: priority,
        };
        // SAFETY: plain syscall on the calling thread with a live `param`.
        if unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) } != 0 {
            return Err(CycleError::RtSetup(format!(
                "SCHED_FIFO priority {priority}: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(())
    }
}

// ─── Pacing ─────────────────────────────────────────────────────────

/// Absolute-deadline tick clock on `CLOCK_MONOTONIC`.
#[cfg(feature = "rt")]
mod pacer {
    use super::CycleError;
    use nix::errno::Errno;
    use nix::sys::time::{TimeSpec, TimeValLike};
    use nix::time::{ClockId, ClockNanosleepFlags, clock_gettime, clock_nanosleep};

    const CLOCK: ClockId = ClockId::CLOCK_MONOTONIC;

    pub(super) type Stamp = TimeSpec;

    pub(super) struct Pacer {
        period: TimeSpec,
        deadline: TimeSpec,
    }

    impl Pacer {
        pub(super) fn start(period_ns: i64) -> Result<Self, CycleError> {
            Ok(Self {
                period: TimeSpec::nanoseconds(period_ns),
                deadline: now()?,
            })
        }

        pub(super) fn now(&self) -> Result<Stamp, CycleError> {
            now()
        }

        pub(super) fn lateness_ns(&self, at: Stamp) -> i64 {
            (at - self.deadline).num_nanoseconds().max(0)
        }

        pub(super) fn since_ns(&self, start: Stamp) -> Result<i64, CycleError> {
            Ok((now()? - start).num_nanoseconds())
        }

        /// Sleep until the next deadline. A signal may cut the sleep short.
        pub(super) fn wait_next(&mut self) -> Result<(), CycleError> {
            self.deadline = self.deadline + self.period;
            match clock_nanosleep(CLOCK, ClockNanosleepFlags::TIMER_ABSTIME, &self.deadline) {
                Ok(_) | Err(Errno::EINTR) => Ok(()),
                Err(e) => Err(CycleError::RtSetup(format!("clock_nanosleep: {e}"))),
            }
        }
    }

    fn now() -> Result<TimeSpec, CycleError> {
        clock_gettime(CLOCK).map_err(|e| CycleError::RtSetup(format!("clock_gettime: {e}")))
    }
}

/// Absolute-deadline tick clock on `Instant`.
#[cfg(not(feature = "rt"))]
mod pacer {
    use super::CycleError;
    use std::time::{Duration, Instant};

    pub(super) type Stamp = Instant;

    pub(super) struct Pacer {
        period: Duration,
        deadline: Instant,
    }

    impl Pacer {
        pub(super) fn start(period_ns: i64) -> Result<Self, CycleError> {
            Ok(Self {
                period: Duration::from_nanos(period_ns.max(0) as u64),
                deadline: Instant::now(),
            })
        }

        pub(super) fn now(&self) -> Result<Stamp, CycleError> {
            Ok(Instant::now())
        }

        pub(super) fn lateness_ns(&self, at: Stamp) -> i64 {
            at.saturating_duration_since(self.deadline).as_nanos() as i64
        }

        pub(super) fn since_ns(&self, start: Stamp) -> Result<i64, CycleError> {
            Ok(start.elapsed().as_nanos() as i64)
        }

        /// Sleep until the next deadline, re-anchoring when behind instead of
        /// bursting to catch up.
        pub(super) fn wait_next(&mut self) -> Result<(), CycleError> {
            self.deadline += self.period;
            let now = Instant::now();
            if self.deadline > now {
                std::thread::sleep(self.deadline - now);
            } else {
                self.deadline = now;
            }
            Ok(())
        }
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Why [`CycleRunner::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The running flag was cleared (signal / shutdown request).
    Requested,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Owns the front-end and the board, and paces ticks.
pub struct CycleRunner {
    /// Tick engine. Public so the consumable manager can reach it between
    /// ticks.
    pub front_end: FrontEnd,
    /// Board driver.
    pub board: Box<dyn BoardIo>,
    /// Timing statistics.
    pub stats: CycleStats,
    publish_interval: u64,
    tick_period_ns: i64,
}

impl CycleRunner {
    pub fn new(timing: Timing, board: Box<dyn BoardIo>, publish_interval: u32) -> Self {
        Self {
            front_end: FrontEnd::new(timing),
            board,
            stats: CycleStats::new(),
            publish_interval: u64::from(publish_interval.max(1)),
            tick_period_ns: timing.tick_period().as_nanos() as i64,
        }
    }

    /// One tick body: sample → tick → drive → (throttled) publish.
    pub fn step(&mut self) -> Result<(), CycleError> {
        let raw = self.board.sample()?;
        self.front_end.tick(raw);

        let out = self.front_end.indicators();
        self.board.drive(&out.frame, out.blink)?;

        if self.front_end.tick_count() % self.publish_interval == 0 {
            self.board.publish(&self.front_end.snapshot())?;
        }
        Ok(())
    }

    /// Reset the front-end to its power-on state.
    pub fn reset(&mut self) {
        self.front_end.reset();
        info!("front-end reset");
    }

    /// Initialize the board, run paced ticks until `running` clears or
    /// `max_ticks` is reached, then shut the board down.
    ///
    /// The board is shut down on every exit path, including errors.
    pub fn run(
        &mut self,
        running: &AtomicBool,
        max_ticks: Option<u64>,
    ) -> Result<StopReason, CycleError> {
        self.board.init()?;
        info!(
            "board '{}' initialized, entering tick loop ({}ns period)",
            self.board.name(),
            self.tick_period_ns
        );

        let result = self.run_loop(running, max_ticks);

        if let Err(e) = self.board.shutdown() {
            warn!("board shutdown failed: {e}");
        }
        info!(
            "tick loop stopped: {} ticks, avg={}ns, max={}ns, overruns={}",
            self.stats.cycle_count,
            self.stats.avg_cycle_ns(),
            self.stats.max_cycle_ns,
            self.stats.overruns
        );
        result
    }

    #[inline]
    fn should_stop(&self, running: &AtomicBool, max_ticks: Option<u64>) -> Option<StopReason> {
        if !running.load(Ordering::SeqCst) {
            return Some(StopReason::Requested);
        }
        match max_ticks {
            Some(limit) if self.stats.cycle_count >= limit => Some(StopReason::TickLimit),
            _ => None,
        }
    }

    /// Record a finished tick and apply the overrun policy.
    fn finish_tick(&mut self, duration_ns: i64, latency_ns: i64) -> Result<(), CycleError> {
        self.stats.record(duration_ns, latency_ns);
        if duration_ns > self.tick_period_ns {
            self.stats.overruns += 1;
            if cfg!(feature = "rt") {
                return Err(CycleError::Overrun {
                    actual_ns: duration_ns,
                    budget_ns: self.tick_period_ns,
                });
            }
            warn!(
                "tick {} overran: {}ns > {}ns budget",
                self.stats.cycle_count, duration_ns, self.tick_period_ns
            );
        }
        Ok(())
    }

    fn run_loop(
        &mut self,
        running: &AtomicBool,
        max_ticks: Option<u64>,
    ) -> Result<StopReason, CycleError> {
        let mut pacer = Pacer::start(self.tick_period_ns)?;
        loop {
            if let Some(reason) = self.should_stop(running, max_ticks) {
                debug!(?reason, "stop condition reached");
                return Ok(reason);
            }

            let started = pacer.now()?;
            let latency_ns = pacer.lateness_ns(started);
            self.step()?;
            let duration_ns = pacer.since_ns(started)?;
            self.finish_tick(duration_ns, latency_ns)?;

            pacer.wait_next()?;
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
