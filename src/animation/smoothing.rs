/// Fraction of the remaining distance covered in `delta_secs` at rate `speed`.
///
/// `1 - exp(-delta * speed)` makes the convergence rate independent of tick length: two ticks of
/// `d` cover exactly the same distance as one tick of `2d`.
pub fn decay_factor(delta_secs: f64, speed: f64) -> f64 {
    if !delta_secs.is_finite() || !speed.is_finite() || delta_secs <= 0.0 || speed <= 0.0 {
        return 0.0;
    }
    1.0 - (-delta_secs * speed).exp()
}

/// Exponentially damped scalar that snaps onto its target once within `epsilon`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Smoothed {
    value: f64,
    epsilon: f64,
}

impl Smoothed {
    /// Start at `value`, snapping when closer than `epsilon` to the target.
    pub fn new(value: f64, epsilon: f64) -> Self {
        Self {
            value,
            epsilon: epsilon.max(0.0),
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Snap tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Advance one tick towards `target` and return the new value.
    ///
    /// A zero (or invalid) `delta_secs` leaves the value untouched, including the snap.
    pub fn step(&mut self, target: f64, speed: f64, delta_secs: f64) -> f64 {
        let decay = decay_factor(delta_secs, speed);
        if decay == 0.0 {
            return self.value;
        }
        self.value += (target - self.value) * decay;
        if (target - self.value).abs() < self.epsilon {
            self.value = target;
        }
        self.value
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: f64) {
        self.value = value;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoothing.rs"]
mod tests;
