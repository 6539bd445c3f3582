/// Source of monotonic milliseconds (e.g. `performance.now()`).
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Per-frame time keeping. Consumers accumulate their own elapsed time from
/// the deltas (film grain `time`, actor rotation).
pub struct Clock<T: TimeSource> {
    source: T,
    last_ms: f64,
}

impl<T: TimeSource> Clock<T> {
    pub fn new(source: T) -> Self {
        let now = source.now_ms();
        Self {
            source,
            last_ms: now,
        }
    }

    /// Seconds since the previous call (or since construction on the first call).
    pub fn delta(&mut self) -> f32 {
        let now = self.source.now_ms();
        let delta = ((now - self.last_ms) / 1000.0).max(0.0);
        self.last_ms = self.last_ms.max(now);
        delta as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Manual(Rc<Cell<f64>>);

    impl TimeSource for Manual {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    #[test]
    fn deltas_sum_to_the_source_span() {
        let time = Manual::default();
        time.0.set(1000.0);
        let mut clock = Clock::new(time.clone());

        time.0.set(1016.0);
        let first = clock.delta();
        assert!((first - 0.016).abs() < 1e-6);
        time.0.set(1050.0);
        let second = clock.delta();
        assert!((second - 0.034).abs() < 1e-6);
        assert!((first + second - 0.05).abs() < 1e-6);
    }

    #[test]
    fn backwards_steps_clamp_to_zero() {
        let time = Manual::default();
        time.0.set(500.0);
        let mut clock = Clock::new(time.clone());
        time.0.set(400.0);
        assert_eq!(clock.delta(), 0.0);
        time.0.set(600.0);
        assert!((clock.delta() - 0.1).abs() < 1e-6);
    }
}
