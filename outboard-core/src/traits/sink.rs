//! Value publishing sink

/// Destination for published readings
///
/// `path` is a full dotted metric path (`vessels.<vessel>.<suffix>`).
/// Publishing never fails from the caller's point of view; a sink that
/// cannot deliver drops the value.
pub trait ValueSink {
    fn publish(&mut self, path: &str, value: f32, unit: &str, description: &str);
}
