//! In-flight tracking for sign-in calls.
//!
//! The flag is a count of engaged guards published through a `watch` channel.
//! It reads busy while any guard is alive, so a guard dropped on an error path
//! or by cancelling the owning future still returns the flag to idle.

use tokio::sync::watch;

#[derive(Debug)]
pub struct BusyFlag {
    in_flight: watch::Sender<usize>,
}

impl BusyFlag {
    #[must_use]
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        Self { in_flight }
    }

    /// Marks a call as in flight until the returned guard is dropped.
    #[must_use = "the flag resets as soon as the guard is dropped"]
    pub fn engage(&self) -> BusyGuard<'_> {
        self.in_flight.send_modify(|count| *count += 1);
        BusyGuard { flag: self }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    #[must_use]
    pub fn watch(&self) -> BusyWatch {
        BusyWatch {
            rx: self.in_flight.subscribe(),
        }
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that releases one in-flight slot on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag
            .in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

/// Receiver side for callers that react to busy transitions.
#[derive(Debug, Clone)]
pub struct BusyWatch {
    rx: watch::Receiver<usize>,
}

impl BusyWatch {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.rx.borrow() > 0
    }

    /// Waits for the next update and returns the busy state it carries.
    ///
    /// Returns `None` once the owning flag is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update() > 0)
    }

    /// Resolves once no call is in flight. Returns false if the flag was dropped first.
    pub async fn wait_idle(&mut self) -> bool {
        self.rx.wait_for(|count| *count == 0).await.is_ok()
    }
}
