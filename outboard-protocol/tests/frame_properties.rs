//! Property tests for frame parsing robustness.

use outboard_protocol::{Frame, FrameParser, TelemetryMessage, FRAME_START, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

proptest! {
    /// Garbage before a frame is skipped and the frame still parses.
    #[test]
    fn parser_recovers_after_arbitrary_noise(
        noise in proptest::collection::vec(any::<u8>().prop_filter("not start", |b| *b != FRAME_START), 0..64),
        payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
        msg_type in any::<u8>(),
    ) {
        let frame = Frame::new(msg_type, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        prop_assert_eq!(parser.feed_bytes(&noise), Ok(None));
        prop_assert_eq!(parser.feed_bytes(&encoded), Ok(Some(frame)));
    }

    /// Arbitrary byte streams never panic the parser or the decoder.
    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..600)) {
        let mut parser = FrameParser::new();
        for byte in bytes {
            if let Ok(Some(frame)) = parser.feed(byte) {
                let _ = TelemetryMessage::from_frame(&frame);
            }
        }
    }

    /// Values survive the trip through a frame bit-for-bit.
    #[test]
    fn value_messages_survive_framing(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let msg = TelemetryMessage::Value {
            path: "vessels.tinny.electrical.batteries.house.voltage",
            value,
        };
        let frame = msg.to_frame().unwrap();
        let bytes = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&bytes).unwrap().unwrap();
        prop_assert_eq!(TelemetryMessage::from_frame(&parsed), Ok(msg));
    }
}
