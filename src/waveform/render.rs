//! Waveform bar projection
//!
//! Pure function from (amplitudes, position, duration) to bars. Bar `i` of
//! `n` is played iff `i / n < position / duration`; with a zero, unknown or
//! non-finite duration nothing is played.
//!
//! The strict comparison makes the played count `ceil(n * position /
//! duration)` clamped to `[0, n]`, which matches the floor only when the
//! progress lands exactly on a bar boundary.

use serde::Serialize;

use crate::waveform::AmplitudeSequence;

/// One rendered waveform bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    /// Height as a percentage of the track height
    pub height_percent: f32,
    /// Whether the bar lies in the played portion
    pub played: bool,
}

/// Ratio `position / duration`, or 0 when it cannot be computed
#[inline]
pub fn played_ratio(position: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !position.is_finite() {
        return 0.0;
    }
    position / duration
}

#[inline]
fn is_played(index: usize, len: usize, ratio: f64) -> bool {
    (index as f64 / len as f64) < ratio
}

/// Project amplitudes into bars, marking the played portion
pub fn render_bars(amplitudes: &AmplitudeSequence, position: f64, duration: f64) -> Vec<Bar> {
    let len = amplitudes.len();
    let ratio = played_ratio(position, duration);
    amplitudes
        .iter()
        .enumerate()
        .map(|(index, &amplitude)| Bar {
            height_percent: amplitude * 100.0,
            played: is_played(index, len, ratio),
        })
        .collect()
}

/// Number of bars `render_bars` would mark as played
pub fn played_bar_count(len: usize, position: f64, duration: f64) -> usize {
    let ratio = played_ratio(position, duration);
    if ratio <= 0.0 {
        return 0;
    }
    // Played bars always form a prefix
    (0..len)
        .position(|index| !is_played(index, len, ratio))
        .unwrap_or(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seq(values: &[f32]) -> AmplitudeSequence {
        AmplitudeSequence::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_heights_follow_amplitudes() {
        let bars = render_bars(&seq(&[0.0, 0.5, 1.0]), 0.0, 10.0);
        let heights: Vec<f32> = bars.iter().map(|b| b.height_percent).collect();
        assert_eq!(heights, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_played_prefix() {
        let bars = render_bars(&seq(&[0.5; 4]), 5.0, 10.0);
        let played: Vec<bool> = bars.iter().map(|b| b.played).collect();
        assert_eq!(played, vec![true, true, false, false]);
    }

    #[test]
    fn test_strict_boundary() {
        // 2.5 of 10 bars: indices 0, 1, 2 satisfy i/10 < 0.25
        assert_eq!(played_bar_count(10, 2.5, 10.0), 3);
        // Exactly on a boundary the boundary bar is not played
        assert_eq!(played_bar_count(10, 3.0, 10.0), 3);
    }

    #[test]
    fn test_zero_duration_plays_nothing() {
        let bars = render_bars(&seq(&[0.5; 8]), 12.0, 0.0);
        assert!(bars.iter().all(|b| !b.played));
        assert_eq!(played_bar_count(8, 12.0, 0.0), 0);
        assert_eq!(played_bar_count(8, 12.0, f64::NAN), 0);
        assert_eq!(played_bar_count(8, f64::NAN, 10.0), 0);
    }

    #[test]
    fn test_end_plays_everything() {
        assert_eq!(played_bar_count(8, 10.0, 10.0), 8);
        assert!(render_bars(&seq(&[0.5; 8]), 10.0, 10.0)
            .iter()
            .all(|b| b.played));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(render_bars(&AmplitudeSequence::default(), 1.0, 2.0).is_empty());
        assert_eq!(played_bar_count(0, 1.0, 2.0), 0);
    }
}
