/// Trailing-edge rate limiter driven by an external clock (seconds, e.g. `egui::InputState::time`).
///
/// The first [`Self::schedule`] opens a window of `wait` seconds; further calls inside the window
/// only replace the pending arguments. Once the window has elapsed, [`Self::poll`] hands out the
/// last arguments, so at most one call per window takes effect and leading calls are suppressed.
#[derive(Clone, Debug)]
pub struct Throttle<A> {
    wait: f64,
    pending: Option<Pending<A>>,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    deadline: f64,
    args: A,
}

impl<A> Throttle<A> {
    pub fn new(wait: f64) -> Self {
        Self {
            wait: wait.max(0.0),
            pending: None,
        }
    }

    pub fn wait(&self) -> f64 {
        self.wait
    }

    /// Request a call with `args`. Returns `true` if this opened a new window.
    pub fn schedule(&mut self, now: f64, args: A) -> bool {
        match &mut self.pending {
            Some(pending) => {
                pending.args = args;
                false
            }
            None => {
                self.pending = Some(Pending {
                    deadline: now + self.wait,
                    args,
                });
                true
            }
        }
    }

    /// Take the pending arguments if their window has elapsed.
    pub fn poll(&mut self, now: f64) -> Option<A> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending arguments right away.
    pub fn flush(&mut self) -> Option<A> {
        self.pending.take().map(|pending| pending.args)
    }

    /// Drop the pending arguments. Returns `true` if there were any.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending call is due.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
