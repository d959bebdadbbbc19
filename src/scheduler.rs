/// Requests the next tick of the loop.
///
/// A display-driven host asks for one more frame per call; tests step frames
/// by hand.
pub trait FrameScheduler {
    fn schedule_next(&mut self);
}

/// Scheduler that only counts requests; the caller drives ticks itself.
#[derive(Debug, Default)]
pub struct SteppedScheduler {
    pub requested: u64,
}

impl SteppedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one pending request. Returns false when none is pending.
    pub fn take(&mut self) -> bool {
        if self.requested == 0 {
            return false;
        }
        self.requested -= 1;
        true
    }
}

impl FrameScheduler for SteppedScheduler {
    fn schedule_next(&mut self) {
        self.requested += 1;
    }
}
