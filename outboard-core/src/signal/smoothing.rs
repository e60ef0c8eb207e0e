//! Smoothing stages

use heapless::Deque;

use super::chain::Stage;
use crate::traits::SensorError;

/// Largest supported moving average window
pub const MAX_WINDOW: usize = 64;

/// Default moving average window
pub const DEFAULT_WINDOW: usize = 20;

/// Moving average over a trailing window
///
/// While the window is still filling, the average covers only the samples
/// seen so far.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    samples: Deque<f32, MAX_WINDOW>,
    size: usize,
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl MovingAverage {
    /// Create a window of `size` samples, clamped to `1..=MAX_WINDOW`
    pub fn new(size: usize) -> Self {
        Self {
            samples: Deque::new(),
            size: size.clamp(1, MAX_WINDOW),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of samples currently in the window
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample and return the new average
    pub fn smooth(&mut self, value: f32) -> f32 {
        if self.samples.len() >= self.size {
            self.samples.pop_front();
        }
        // Cannot fail: one slot was just freed and size <= MAX_WINDOW
        let _ = self.samples.push_back(value);

        // Summed fresh each time so no rounding error accumulates
        let sum: f32 = self.samples.iter().sum();
        sum / self.samples.len() as f32
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Stage for MovingAverage {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        Ok(self.smooth(input))
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// Exponential moving average
///
/// `alpha` is the weight of the newest sample. The first sample seeds
/// the accumulator.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoother {
    alpha: f32,
    state: Option<f32>,
}

impl ExponentialSmoother {
    /// `alpha` is clamped to `(0, 1]`; out-of-range values fall back to 1
    pub fn new(alpha: f32) -> Self {
        let alpha = if alpha > 0.0 && alpha <= 1.0 { alpha } else { 1.0 };
        Self { alpha, state: None }
    }

    pub fn smooth(&mut self, value: f32) -> f32 {
        let next = match self.state {
            Some(prev) => prev + self.alpha * (value - prev),
            None => value,
        };
        self.state = Some(next);
        next
    }

    pub fn clear(&mut self) {
        self.state = None;
    }
}

impl Stage for ExponentialSmoother {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        Ok(self.smooth(input))
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// Smoother selected by configuration
#[derive(Debug, Clone)]
pub enum Smoother {
    MovingAverage(MovingAverage),
    Exponential(ExponentialSmoother),
}

impl Stage for Smoother {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        match self {
            Smoother::MovingAverage(s) => s.process(input),
            Smoother::Exponential(s) => s.process(input),
        }
    }

    fn reset(&mut self) {
        match self {
            Smoother::MovingAverage(s) => s.reset(),
            Smoother::Exponential(s) => s.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        let d = a - b;
        d < 1e-4 && d > -1e-4
    }

    #[test]
    fn test_partial_window_averages_seen_samples() {
        let mut avg = MovingAverage::new(4);
        assert!(close(avg.smooth(1.0), 1.0));
        assert!(close(avg.smooth(3.0), 2.0));
        assert!(close(avg.smooth(5.0), 3.0));
        assert_eq!(avg.len(), 3);
    }

    #[test]
    fn test_window_slides() {
        let mut avg = MovingAverage::new(3);
        for v in [1.0, 2.0, 3.0] {
            avg.smooth(v);
        }
        // 1.0 falls out
        assert!(close(avg.smooth(7.0), 4.0));
        assert_eq!(avg.len(), 3);
    }

    #[test]
    fn test_constant_input_converges_within_window() {
        let mut avg = MovingAverage::default();
        for _ in 0..50 {
            avg.smooth(0.5);
        }
        for _ in 0..DEFAULT_WINDOW - 2 {
            avg.smooth(2.0);
        }
        // One stale sample left in the window
        assert!(close(avg.smooth(2.0), 1.925));
        assert!(close(avg.smooth(2.0), 2.0));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut avg = MovingAverage::new(5);
        avg.smooth(10.0);
        avg.smooth(20.0);
        avg.reset();
        assert!(avg.is_empty());
        assert!(close(avg.smooth(4.0), 4.0));
    }

    #[test]
    fn test_window_size_clamped() {
        assert_eq!(MovingAverage::new(0).size(), 1);
        assert_eq!(MovingAverage::new(1000).size(), MAX_WINDOW);
    }

    #[test]
    fn test_exponential_seeds_then_blends() {
        let mut ema = ExponentialSmoother::new(0.5);
        assert!(close(ema.smooth(10.0), 10.0));
        assert!(close(ema.smooth(20.0), 15.0));
        assert!(close(ema.smooth(20.0), 17.5));
        ema.reset();
        assert!(close(ema.smooth(3.0), 3.0));
    }

    #[test]
    fn test_exponential_bad_alpha_passes_through() {
        let mut ema = ExponentialSmoother::new(0.0);
        ema.smooth(1.0);
        assert!(close(ema.smooth(9.0), 9.0));
    }

    #[test]
    fn test_smoother_dispatch() {
        let mut s = Smoother::MovingAverage(MovingAverage::new(2));
        s.process(2.0).unwrap();
        assert_eq!(s.process(4.0), Ok(3.0));
    }
}
