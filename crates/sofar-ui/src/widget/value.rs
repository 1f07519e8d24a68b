//! Stepped value ranges shared by sliders and dials.

use crate::error::PanelError;
use crate::widget::Unit;

/// Tolerance used when counting how many whole steps fit in a range.
const STEP_EPSILON: f32 = 1e-4;

/// A closed `[start, end]` range walked in increments of `step`.
///
/// Every value a range hands out lies on the grid `start + k * step` and
/// within `[start, end]`. When `end - start` is not a whole number of steps,
/// the largest reachable value is the last grid point below `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    start: f32,
    step: f32,
    end: f32,
}

impl ValueRange {
    /// Validate and create a range.
    pub fn new(start: f32, step: f32, end: f32) -> Result<Self, PanelError> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(PanelError::InvalidRange { start, end });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(PanelError::InvalidStep(step));
        }
        Ok(Self { start, step, end })
    }

    /// Lower bound.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Grid increment.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Upper bound.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Number of whole steps between `start` and the last reachable value.
    pub fn max_steps(&self) -> f32 {
        ((self.end - self.start) / self.step + STEP_EPSILON).floor()
    }

    /// Snap `value` to the nearest grid point inside the range.
    ///
    /// Non-finite input maps to `start`.
    pub fn quantize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.start;
        }
        let steps = ((value - self.start) / self.step)
            .round()
            .clamp(0.0, self.max_steps());
        (self.start + steps * self.step).min(self.end)
    }

    /// Position of `value` within the range as a fraction in `[0, 1]`.
    pub fn normalized(&self, value: f32) -> f32 {
        ((value - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Value at fraction `t` of the range, quantized.
    pub fn from_normalized(&self, t: f32) -> f32 {
        self.quantize(self.start + t * (self.end - self.start))
    }
}

/// Format a value for display.
///
/// Decibels use one decimal and a `dB` suffix. Frequencies below 1 kHz are
/// whole hertz, above that one-decimal kilohertz. Plain values are integral
/// when the step is exactly 1 and three-decimal otherwise.
pub fn format_value(value: f32, step: f32, unit: Unit) -> String {
    match unit {
        Unit::Decibel => format!("{value:.1} dB"),
        Unit::Frequency if value < 1000.0 => format!("{value:.0} Hz"),
        Unit::Frequency => format!("{:.1} kHz", value / 1000.0),
        Unit::Plain if (step - 1.0).abs() < f32::EPSILON => format!("{value:.0}"),
        Unit::Plain => format!("{value:.3}"),
    }
}
