//! Wire framing for the telemetry link
//!
//! ```text
//! 0xAA | LEN | TYPE | PAYLOAD (LEN bytes, <= 250) | LEN ^ TYPE ^ PAYLOAD...
//! ```
//!
//! The monitor only encodes. The parser exists for the gateway side and
//! for tests; it drops bytes until it sees a start byte, so a receiver
//! that joins mid-stream locks on at the next frame.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Largest payload a frame can carry
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Start, length, type and checksum around the payload
const OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = OVERHEAD + MAX_PAYLOAD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds `MAX_PAYLOAD_SIZE`
    PayloadTooLarge,
    /// Received checksum does not match the frame contents
    InvalidChecksum,
    /// Received length byte exceeds `MAX_PAYLOAD_SIZE`
    BadLength,
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,
    /// Frame type is not a known message
    UnknownType(u8),
    /// Payload failed to serialize or deserialize
    Codec,
}

fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ msg_type, |acc, b| acc ^ b)
}

/// One message type and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Bytes on the wire for this frame
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Write the frame to the front of `buffer`, returning its length
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        // Payload length is bounded by the Vec capacity
        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, length, self.msg_type]);
        let (body, trailer) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        trailer[0] = checksum(length, self.msg_type, &self.payload);

        Ok(len)
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize_default(self.encoded_len())
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Start,
    Length,
    Type { length: u8 },
    Payload { length: u8, msg_type: u8 },
    Checksum { length: u8, msg_type: u8 },
}

/// Byte-at-a-time frame decoder
#[derive(Debug, Clone)]
pub struct FrameParser {
    expect: Expect,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            expect: Expect::Start,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.expect = Expect::Start;
        self.payload.clear();
    }

    /// Feed one received byte
    ///
    /// `Ok(Some(frame))` completes a frame, `Ok(None)` wants more bytes.
    /// After an error the parser is back to hunting for a start byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.expect = match self.expect {
            Expect::Start if byte == FRAME_START => Expect::Length,
            Expect::Start => Expect::Start,
            Expect::Length if usize::from(byte) > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::BadLength);
            }
            Expect::Length => Expect::Type { length: byte },
            Expect::Type { length } => {
                self.payload.clear();
                if length == 0 {
                    Expect::Checksum {
                        length,
                        msg_type: byte,
                    }
                } else {
                    Expect::Payload {
                        length,
                        msg_type: byte,
                    }
                }
            }
            Expect::Payload { length, msg_type } => {
                // Capacity covers any accepted length byte
                let _ = self.payload.push(byte);
                if self.payload.len() == usize::from(length) {
                    Expect::Checksum { length, msg_type }
                } else {
                    Expect::Payload { length, msg_type }
                }
            }
            Expect::Checksum { length, msg_type } => {
                let valid = byte == checksum(length, msg_type, &self.payload);
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                return if valid {
                    Ok(Some(Frame { msg_type, payload }))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        };
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after that frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_layout() {
        let mut buffer = [0u8; 8];
        let len = Frame::empty(0x01).encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x01, 0x01]);
    }

    #[test]
    fn test_payload_layout_and_checksum() {
        let frame = Frame::new(0x11, &[0x10, 0x20, 0x30]).unwrap();
        let mut buffer = [0u8; 20];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 7);
        assert_eq!(&buffer[..6], &[FRAME_START, 3, 0x11, 0x10, 0x20, 0x30]);
        assert_eq!(buffer[6], 3 ^ 0x11 ^ 0x10 ^ 0x20 ^ 0x30);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x11, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_encode_to_vec_matches_encode() {
        let frame = Frame::new(0x10, b"K").unwrap();
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();
        assert_eq!(frame.encode_to_vec().unwrap().as_slice(), &buffer[..len]);
    }

    #[test]
    fn test_bad_checksum_then_recovery() {
        let frame = Frame::new(0x11, &[9, 9]).unwrap();
        let mut corrupted = frame.encode_to_vec().unwrap();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&corrupted), Err(FrameError::InvalidChecksum));

        let good = frame.encode_to_vec().unwrap();
        assert_eq!(parser.feed_bytes(&good), Ok(Some(frame)));
    }

    #[test]
    fn test_resync_after_garbage() {
        let frame = Frame::new(0x10, b"vessels.tinny.bilge").unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 64>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&data), Ok(Some(frame)));
    }

    #[test]
    fn test_back_to_back_frames() {
        let first = Frame::new(0x11, &[1]).unwrap();
        let second = Frame::empty(0x01);
        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&first.encode_to_vec().unwrap()).unwrap();
        data.extend_from_slice(&second.encode_to_vec().unwrap()).unwrap();

        let mut parser = FrameParser::new();
        let split = first.encoded_len();
        assert_eq!(parser.feed_bytes(&data[..split]), Ok(Some(first)));
        assert_eq!(parser.feed_bytes(&data[split..]), Ok(Some(second)));
    }

    #[test]
    fn test_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(251), Err(FrameError::BadLength));
        assert_eq!(parser.feed(0x00), Ok(None));
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x11, &large), Err(FrameError::PayloadTooLarge));
    }
}
