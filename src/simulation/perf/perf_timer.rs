/// Milliseconds since the Unix epoch, from `Date.now()` in the browser.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

/// Splits one stepping pass into timed phases.
///
/// `lap_ms` returns the time since the previous lap (or since `start`),
/// `total_ms` the time since `start`. Negative readings from a clock that
/// jumped back are reported as zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PhaseTimer {
    started_ms: f64,
    lap_ms: f64,
}

impl PhaseTimer {
    pub(crate) fn start() -> Self {
        let now = now_ms();
        PhaseTimer { started_ms: now, lap_ms: now }
    }

    pub(crate) fn lap_ms(&mut self) -> f64 {
        let now = now_ms();
        let lap = (now - self.lap_ms).max(0.0);
        self.lap_ms = now;
        lap
    }

    pub(crate) fn total_ms(&self) -> f64 {
        (now_ms() - self.started_ms).max(0.0)
    }
}
