//! L4 Atomic Layer: Pure math for drag velocity and inertial decay
//!
//! No state lives here. Every function is total: division by zero is guarded
//! and decay clamps at rest instead of overshooting through zero.

use crate::clock::Clock;

/// Speed over a distance, scaled by a per-device adjustment.
///
/// Returns `0.0` when `time_seconds` is zero.
#[inline]
pub fn speed(distance: f64, time_seconds: f64, adjustment: f64) -> f64 {
    if time_seconds == 0.0 {
        return 0.0;
    }
    (distance / time_seconds) * adjustment
}

/// Signed distance from `previous` to `current`, scaled by `factor`
#[inline]
pub fn distance(previous: f64, current: f64, factor: f64) -> f64 {
    (current - previous) * factor
}

/// Elapsed time between a past timestamp and the clock's present reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDelta {
    pub previous: f64,
    pub now: f64,
    /// Milliseconds
    pub delta: f64,
    pub seconds: f64,
}

impl TimeDelta {
    /// Measure from `previous_ms` to now
    pub fn since(previous_ms: f64, clock: &impl Clock) -> Self {
        let now = clock.now_ms();
        let delta = now - previous_ms;
        Self {
            previous: previous_ms,
            now,
            delta,
            seconds: delta / 1000.0,
        }
    }
}

/// Reduce the magnitude of `speed` by `friction * delta_seconds`.
///
/// The sign of `speed` is preserved and the result never crosses zero.
#[inline]
pub fn decay(speed: f64, delta_seconds: f64, friction: f64) -> f64 {
    if speed == 0.0 {
        return 0.0;
    }

    let scrub = friction * delta_seconds;
    let magnitude = speed.abs() - scrub;

    if magnitude <= 0.0 {
        return 0.0;
    }

    magnitude.copysign(speed)
}

/// Bound the magnitude of `velocity` to `|tolerance|`, keeping its sign
#[inline]
pub fn clamp_velocity(velocity: f64, tolerance: f64) -> f64 {
    let tolerance = tolerance.abs();
    let magnitude = velocity.abs().min(tolerance);
    if velocity < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_speed_zero_time_guard() {
        assert_eq!(speed(100.0, 0.0, 1.0), 0.0);
        assert_eq!(speed(-42.0, 0.0, 0.05), 0.0);
    }

    #[test]
    fn test_speed() {
        assert_eq!(speed(100.0, 2.0, 1.0), 50.0);
        assert_eq!(speed(100.0, 2.0, 0.5), 25.0);
        assert_eq!(speed(-100.0, 2.0, 1.0), -50.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 100.0, 1.0), 100.0);
        assert_eq!(distance(0.0, 100.0, 0.5), 50.0);
        assert_eq!(distance(100.0, 200.0, 2.0), 200.0);
        assert_eq!(distance(150.0, 100.0, 1.0), -50.0);
    }

    #[test]
    fn test_time_delta() {
        let clock = ManualClock::new(5_000.0);
        let result = TimeDelta::since(4_000.0, &clock);

        assert_eq!(result.previous, 4_000.0);
        assert_eq!(result.now, 5_000.0);
        assert_eq!(result.delta, 1_000.0);
        assert_eq!(result.seconds, 1.0);
    }

    #[test]
    fn test_decay() {
        assert_eq!(decay(100.0, 1.0, 0.1), 99.9);
        assert_eq!(decay(-100.0, 1.0, 0.1), -99.9);
        assert_eq!(decay(100.0, 1.0, 50.0), 50.0);
        assert_eq!(decay(-100.0, 1.0, 50.0), -50.0);
        assert_eq!(decay(100.0, 0.5, 0.5), 99.75);
        assert_eq!(decay(-100.0, 0.5, 0.5), -99.75);
    }

    #[test]
    fn test_decay_at_rest_stays_at_rest() {
        assert_eq!(decay(0.0, 1.0, 0.5), 0.0);
        assert_eq!(decay(0.0, 1.0, 1.0), 0.0);
        assert_eq!(decay(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_decay_never_crosses_zero() {
        assert_eq!(decay(1.0, 1.0, 2.0), 0.0);
        assert_eq!(decay(-1.0, 1.0, 2.0), 0.0);
        assert_eq!(decay(5.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn test_decay_large_values() {
        assert_eq!(decay(10_000.0, 10.0, 100.0), 9_000.0);
        assert_eq!(decay(-10_000.0, 10.0, 100.0), -9_000.0);
        assert_eq!(decay(1_000_000.0, 10.0, 100_000.0), 0.0);
        assert_eq!(decay(-1_000_000.0, 10.0, 100_000.0), 0.0);
        assert_eq!(decay(1_000_000_000.0, 10.0, 100_000_000.0), 0.0);
    }

    #[test]
    fn test_decay_monotonic_in_scrub() {
        let mut previous = f64::INFINITY;
        for step in 0..=20 {
            let t = step as f64 * 0.1;
            let v = decay(-75.0, t, 40.0);
            assert!(v <= 0.0, "sign flipped at t={}", t);
            assert!(v.abs() <= previous, "magnitude grew at t={}", t);
            previous = v.abs();
        }
    }

    #[test]
    fn test_clamp_velocity() {
        assert_eq!(clamp_velocity(120.0, 100.0), 100.0);
        assert_eq!(clamp_velocity(-120.0, 100.0), -100.0);
        assert_eq!(clamp_velocity(-120.0, -100.0), -100.0);
        assert_eq!(clamp_velocity(40.0, 100.0), 40.0);
        assert_eq!(clamp_velocity(0.0, 100.0), 0.0);
    }
}
