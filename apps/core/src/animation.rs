/// Time from zero to the target value.
pub const COUNTER_DURATION_MS: f64 = 1000.0;
/// Extra start delay per card index.
pub const COUNTER_STAGGER_MS: f64 = 100.0;

/// Linear interpolation between `start` and `end`, floored.
pub fn interpolate_counter(start: i64, end: i64, elapsed_ms: f64, duration_ms: f64) -> i64 {
    let progress = if duration_ms > 0.0 {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };
    #[allow(clippy::cast_possible_truncation)]
    let value = (progress * (end - start) as f64 + start as f64).floor() as i64;
    value
}

/// A KPI counter counting up from zero once its stagger delay has passed.
///
/// The first call to [`CounterAnimation::advance`] pins the clock origin,
/// matching how a frame callback learns its first timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    delay_ms: f64,
    origin: Option<f64>,
    value: i64,
}

impl CounterAnimation {
    pub fn new(index: usize, target: i64) -> Self {
        Self {
            target,
            delay_ms: index as f64 * COUNTER_STAGGER_MS,
            origin: None,
            value: 0,
        }
    }

    pub const fn value(&self) -> i64 {
        self.value
    }

    pub const fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.origin.is_some() && self.value == self.target
    }

    /// Moves the counter to `now_ms`. A clock that runs backwards never
    /// lowers the displayed value.
    pub fn advance(&mut self, now_ms: f64) -> i64 {
        let origin = *self.origin.get_or_insert(now_ms);
        let elapsed = now_ms - origin - self.delay_ms;
        if elapsed < 0.0 {
            return self.value;
        }

        let next = interpolate_counter(0, self.target, elapsed, COUNTER_DURATION_MS);
        self.value = if self.target >= 0 {
            next.max(self.value)
        } else {
            next.min(self.value)
        };
        self.value
    }
}
