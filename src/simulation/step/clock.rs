/// Fixed-timestep accumulator over host timestamps in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Clock {
    start: Option<f64>,
    previous: Option<f64>,
    remainder: f64,
}

impl Clock {
    pub(crate) fn start(&self) -> Option<f64> {
        self.start
    }

    /// Time to simulate for a frame ending at `now`, leftover included.
    ///
    /// The first call latches the baseline and yields only the leftover.
    /// Timestamps going backwards count as no time passing.
    pub(crate) fn pending(&mut self, now: f64, max_frame_ms: Option<f64>) -> f64 {
        self.start.get_or_insert(now);
        let previous = *self.previous.get_or_insert(now);

        let mut frame = (now - previous).max(0.0);
        if let Some(max) = max_frame_ms {
            if frame > max {
                console_warn!("frame of {frame} ms clamped to {max} ms");
                frame = max;
            }
        }
        frame + self.remainder
    }

    /// Closes the frame at `now`, carrying `leftover` into the next one.
    pub(crate) fn finish(&mut self, now: f64, leftover: f64) {
        self.previous = Some(now);
        self.remainder = leftover;
    }

    pub(crate) fn reset(&mut self) {
        *self = Clock::default();
    }
}
