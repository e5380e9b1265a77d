//! Amplitude sequences
//!
//! A waveform is drawn from an ordered list of normalized loudness samples.
//! The sequence is fixed for the lifetime of a widget; index order is time
//! order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{DolphinError, Result};

/// Lowest amplitude produced by the demo generator
pub const DEMO_FLOOR: f32 = 0.2;

/// Ordered, immutable sequence of amplitudes in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct AmplitudeSequence(Vec<f32>);

impl AmplitudeSequence {
    /// Validate and wrap a list of amplitudes
    ///
    /// # Errors
    /// `InvalidAmplitude` for the first value that is not finite or lies
    /// outside `[0, 1]`.
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && (0.0..=1.0).contains(*v)))
        {
            return Err(DolphinError::InvalidAmplitude { index, value });
        }
        Ok(Self(values))
    }

    /// Wrap a list of amplitudes, clamping into `[0, 1]` (NaN becomes 0)
    pub fn from_unclamped(values: Vec<f32>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
                .collect(),
        )
    }

    /// Random demo waveform: uniform amplitudes in `[0.2, 1.0)`
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self(
            (0..len)
                .map(|_| DEMO_FLOOR + (1.0 - DEMO_FLOOR) * rng.random::<f32>())
                .collect(),
        )
    }

    /// Reproducible demo waveform
    pub fn seeded(len: usize, seed: u64) -> Self {
        Self::random(len, &mut StdRng::seed_from_u64(seed))
    }

    /// Demo waveform from the thread-local generator
    pub fn demo(len: usize) -> Self {
        Self::random(len, &mut rand::rng())
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no bars
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amplitudes in time order
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Iterate amplitudes in time order
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.0.iter()
    }
}

impl TryFrom<Vec<f32>> for AmplitudeSequence {
    type Error = DolphinError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<AmplitudeSequence> for Vec<f32> {
    fn from(seq: AmplitudeSequence) -> Self {
        seq.0
    }
}

impl<'a> IntoIterator for &'a AmplitudeSequence {
    type Item = &'a f32;
    type IntoIter = std::slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
