//! One-shot boot and shutdown.
//!
//! Boot and shutdown are two independent state machines. Each moves
//! `Idle -> Running -> Done` through a compare-and-swap, so exactly one
//! caller runs the body. Callers that lose the race wait until the winner
//! leaves `Running`, which means every caller observes the post-condition
//! once it returns.
//! once it returns. Waiting callers park on a condition variable rather
//! than spinning.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, OnceLock, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::identity::IdentityGenerator;
use crate::metadata::ServiceMetadata;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const DONE: u8 = 2;

/// Atomic one-shot execution guard.
///
/// The state transition itself is a compare-and-swap; the mutex and
/// condvar only park callers while another caller is inside the body.
#[derive(Debug, Default)]
pub struct OneShot {
    state: AtomicU8,
    parked: Mutex<()>,
    settled: Condvar,
}

/// Puts the guard back to `Idle` unless disarmed, so a failing or
/// panicking body never leaves waiters parked on `Running`.
struct ResetOnDrop<'a> {
    guard: &'a OneShot,
    armed: bool,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.guard.settle(IDLE);
        }
    }
}

impl OneShot {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(IDLE),
            parked: Mutex::new(()),
            settled: Condvar::new(),
        }
    }

    /// Whether the body has completed successfully.
    pub fn is_done(&self) -> bool {
        self.state.load(Ordering::Acquire) == DONE
    }

    /// Leave `Running` and wake every parked caller.
    fn settle(&self, state: u8) {
        self.state.store(state, Ordering::Release);
        // Taking the lock orders the store before any waiter's re-check.
        let _parked = self.parked.lock().unwrap_or_else(PoisonError::into_inner);
        self.settled.notify_all();
    }

    /// Block until the state is no longer `Running`.
    fn wait_settled(&self) {
        let mut parked = self.parked.lock().unwrap_or_else(PoisonError::into_inner);
        while self.state.load(Ordering::Acquire) == RUNNING {
            parked = self
                .settled
                .wait(parked)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Run `body` unless it already completed.
    ///
    /// Returns `Ok(true)` for the call that ran the body, `Ok(false)` for
    /// no-op calls. If the body fails the guard returns to `Idle` and the
    /// error goes to that caller only; a later call may try again.
    pub fn run<E>(&self, body: impl FnOnce() -> std::result::Result<(), E>) -> std::result::Result<bool, E> {
        loop {
            match self
                .state
                .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let mut reset = ResetOnDrop {
                        guard: self,
                        armed: true,
                    };
                    body()?;
                    reset.armed = false;
                    self.settle(DONE);
                    return Ok(true);
                }
                Err(DONE) => return Ok(false),
                Err(_) => self.wait_settled(),
            }
        }
    }

    /// [`OneShot::run`] for bodies that cannot fail.
    pub fn run_once(&self, body: impl FnOnce()) -> bool {
        match self.run::<Infallible>(|| {
            body();
            Ok(())
        }) {
            Ok(ran) => ran,
            Err(never) => match never {},
        }
    }
}

/// Boot and shutdown state of a service instance.
#[derive(Debug)]
pub struct Lifecycle {
    boot: OneShot,
    shutdown: OneShot,
    metadata: OnceLock<ServiceMetadata>,
    closer: watch::Sender<bool>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (closer, _) = watch::channel(false);
        Self {
            boot: OneShot::new(),
            shutdown: OneShot::new(),
            metadata: OnceLock::new(),
            closer,
        }
    }

    /// Assign the service identity on first successful call.
    pub fn boot(&self, identity: &dyn IdentityGenerator, name: &str) -> Result<bool> {
        let booted = self.boot.run(|| {
            let id = identity.new_id()?;
            info!(%id, name, "service booted");
            // Only the single winner of the guard reaches this point.
            let _ = self.metadata.set(ServiceMetadata::new(id, name));
            Ok::<_, Error>(())
        })?;
        if !booted {
            debug!(name, "boot already done");
        }
        Ok(booted)
    }

    /// Release the shutdown signal on first call.
    pub fn shutdown(&self) -> bool {
        let released = self.shutdown.run_once(|| {
            self.closer.send_replace(true);
            info!("service shut down");
        });
        if !released {
            debug!("shutdown already done");
        }
        released
    }

    pub fn is_booted(&self) -> bool {
        self.boot.is_done()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_done()
    }

    /// Metadata assigned at boot, if boot has completed.
    pub fn metadata(&self) -> Option<&ServiceMetadata> {
        self.metadata.get()
    }

    /// Receiver that flips to `true` when shutdown releases the signal.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.closer.subscribe()
    }
}
