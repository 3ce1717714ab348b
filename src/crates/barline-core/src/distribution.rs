//! Parameter and tempo interpolation built from single-event patterns
//!
//! A distribution places `n` values between `from` and `to` on positions
//! `dur / n` apart. The result is a [`Mix`] of [`Change`] or [`SetTempo`]
//! patterns, so the ramps are made of the same pieces as everything else.

use crate::error::{PatternError, Result};
use crate::{Change, Measure, Mix, Params, Pattern, SetTempo, Voice};

/// Parameter name used for tempo ramps
pub const TEMPO_PARAM: &str = "bpm";

/// A list of values spread evenly over a duration
pub trait Distribution {
    /// Name of the parameter the values are written to
    fn param(&self) -> &str;

    /// Number of values
    fn steps(&self) -> usize;

    /// Total duration the values are spread over
    fn duration(&self) -> Measure;

    /// The values, in order
    fn values(&self) -> Vec<f64>;

    /// Distance between two consecutive values
    fn width(&self) -> Measure {
        self.duration() / self.steps() as i64
    }

    /// Every value paired with its position, starting at `position`
    fn placements(&self, position: &str) -> Result<Vec<(Measure, f64)>> {
        let start = Measure::parse(position)?;
        let width = self.width();
        Ok(self
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (start + width * i as i64, v))
            .collect())
    }

    /// Parameter-change events on `voice`
    fn modify_voice(&self, position: &str, voice: &Voice) -> Result<Mix> {
        let patterns = self
            .placements(position)?
            .into_iter()
            .map(|(at, v)| {
                Change::from_measure(at, voice, Params::new().with(self.param(), v)).boxed()
            })
            .collect();
        Ok(Mix::new(patterns))
    }
}

fn check_steps(n: usize) -> Result<()> {
    if n == 0 {
        return Err(PatternError::ZeroSteps);
    }
    Ok(())
}

/// Values growing linearly: `from + i * (to - from) / n`
///
/// `to` itself is not reached; the last value is one step short of it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDistribution {
    param: String,
    from: f64,
    to: f64,
    steps: usize,
    dur: Measure,
}

impl LinearDistribution {
    pub fn new(
        param: impl Into<String>,
        from: f64,
        to: f64,
        n: usize,
        dur: Measure,
    ) -> Result<Self> {
        check_steps(n)?;
        Ok(LinearDistribution {
            param: param.into(),
            from,
            to,
            steps: n,
            dur,
        })
    }

    /// Difference between two consecutive values
    pub fn step(&self) -> f64 {
        (self.to - self.from) / self.steps as f64
    }
}

impl Distribution for LinearDistribution {
    fn param(&self) -> &str {
        &self.param
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn duration(&self) -> Measure {
        self.dur
    }

    fn values(&self) -> Vec<f64> {
        let step = self.step();
        (0..self.steps).map(|i| self.from + i as f64 * step).collect()
    }
}

/// Values growing geometrically: `from * (to / from)^(i / n)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialDistribution {
    param: String,
    from: f64,
    to: f64,
    steps: usize,
    dur: Measure,
}

impl ExponentialDistribution {
    /// `from` and `to` must be non-zero and share a sign
    pub fn new(
        param: impl Into<String>,
        from: f64,
        to: f64,
        n: usize,
        dur: Measure,
    ) -> Result<Self> {
        check_steps(n)?;
        if from == 0.0 || to == 0.0 || (from < 0.0) != (to < 0.0) || !(to / from).is_finite() {
            return Err(PatternError::InvalidExponentialRange { from, to });
        }
        Ok(ExponentialDistribution {
            param: param.into(),
            from,
            to,
            steps: n,
            dur,
        })
    }

    /// Ratio between two consecutive values
    pub fn factor(&self) -> f64 {
        (self.to / self.from).powf(1.0 / self.steps as f64)
    }
}

impl Distribution for ExponentialDistribution {
    fn param(&self) -> &str {
        &self.param
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn duration(&self) -> Measure {
        self.dur
    }

    fn values(&self) -> Vec<f64> {
        let factor = self.factor();
        (0..self.steps)
            .map(|i| self.from * factor.powi(i as i32))
            .collect()
    }
}

/// A distribution applied to the tempo instead of a voice parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TempoChange<D> {
    inner: D,
}

pub type LinearTempoChange = TempoChange<LinearDistribution>;
pub type ExponentialTempoChange = TempoChange<ExponentialDistribution>;

impl TempoChange<LinearDistribution> {
    pub fn new(from: f64, to: f64, n: usize, dur: Measure) -> Result<Self> {
        Ok(TempoChange {
            inner: LinearDistribution::new(TEMPO_PARAM, from, to, n, dur)?,
        })
    }
}

impl TempoChange<ExponentialDistribution> {
    pub fn new(from: f64, to: f64, n: usize, dur: Measure) -> Result<Self> {
        Ok(TempoChange {
            inner: ExponentialDistribution::new(TEMPO_PARAM, from, to, n, dur)?,
        })
    }
}

impl<D: Distribution> TempoChange<D> {
    /// Tempo-change events, starting at `position`
    pub fn modify_tempo(&self, position: &str) -> Result<Mix> {
        let patterns = self
            .inner
            .placements(position)?
            .into_iter()
            .map(|(at, bpm)| SetTempo::from_measure(at, bpm).boxed())
            .collect();
        Ok(Mix::new(patterns))
    }

    pub fn distribution(&self) -> &D {
        &self.inner
    }
}
