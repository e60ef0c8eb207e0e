//! Stage trait and composition

use crate::traits::SensorError;

/// One step of a signal chain
pub trait Stage {
    /// Transform one input value
    ///
    /// Stateful stages (smoothers) consume the sample even when a later
    /// stage rejects the result.
    fn process(&mut self, input: f32) -> Result<f32, SensorError>;

    /// Drop any accumulated history
    fn reset(&mut self) {}

    /// Feed this stage's output into `next`
    fn then<B: Stage>(self, next: B) -> Chain<Self, B>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two stages run back to back
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Stage, B: Stage> Stage for Chain<A, B> {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        let mid = self.first.process(input)?;
        self.second.process(mid)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

/// Pass-through stage for quantities that need no conditioning
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Stage for Identity {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f32);

    impl Stage for Scale {
        fn process(&mut self, input: f32) -> Result<f32, SensorError> {
            Ok(input * self.0)
        }
    }

    struct Reject;

    impl Stage for Reject {
        fn process(&mut self, _input: f32) -> Result<f32, SensorError> {
            Err(SensorError::OutOfRange)
        }
    }

    struct Counter(u32);

    impl Stage for Counter {
        fn process(&mut self, input: f32) -> Result<f32, SensorError> {
            self.0 += 1;
            Ok(input)
        }

        fn reset(&mut self) {
            self.0 = 0;
        }
    }

    #[test]
    fn test_chain_runs_in_order() {
        let mut chain = Scale(2.0).then(Identity).then(Scale(10.0));
        assert_eq!(chain.process(1.5), Ok(30.0));
    }

    #[test]
    fn test_chain_stops_at_first_error() {
        let mut chain = Counter(0).then(Reject).then(Scale(2.0));
        assert_eq!(chain.process(1.0), Err(SensorError::OutOfRange));
        // The first stage still saw the sample
        assert_eq!(chain.first.first.0, 1);
    }

    #[test]
    fn test_chain_reset_reaches_every_stage() {
        let mut chain = Counter(0).then(Counter(0));
        chain.process(1.0).unwrap();
        chain.process(1.0).unwrap();
        chain.reset();
        assert_eq!(chain.first.0, 0);
        assert_eq!(chain.second.0, 0);
    }
}
