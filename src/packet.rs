use crate::error::RconError;

/// Every frame ends with an empty ASCIIZ string, so two null bytes in total.
pub const TAIL: [u8; 2] = [0, 0];

/// The three packet types the protocol defines. Anything else on the wire is
/// rejected during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    // 3, sent once per connection to authenticate
    Login,
    // 2, a command line for the server to execute
    Command,
    // 0, server to client only
    Response,
}

impl PacketType {
    pub fn to_le_bytes(&self) -> [u8; 4] {
        let type_value: u32 = match self {
            PacketType::Login => 3,
            PacketType::Command => 2,
            PacketType::Response => 0,
        };
        type_value.to_le_bytes()
    }
}

impl TryFrom<u32> for PacketType {
    type Error = RconError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(PacketType::Login),
            2 => Ok(PacketType::Command),
            0 => Ok(PacketType::Response),
            _ => Err(RconError::UnknownPacketType(value)),
        }
    }
}

/// A single protocol message. Packets are constructed right before they are
/// sent or right after they are received, and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    request_id: u32,
    packet_type: PacketType,
    payload: Vec<u8>,
}

impl Packet {
    // Since the only one of the fields that can change in length is the
    // payload, the size of a frame is the byte-length of the payload plus 10.
    pub const BASE_PACKET_SIZE: usize = 10;

    pub fn new(request_id: u32, packet_type: PacketType, payload: impl Into<Vec<u8>>) -> Self {
        Packet {
            request_id,
            packet_type,
            payload: payload.into(),
        }
    }

    /// Creates a login packet carrying the password, with a fresh random
    /// request id.
    pub fn login(password: &str) -> Self {
        Packet::new(rand::random(), PacketType::Login, password.as_bytes())
    }

    /// Creates a command packet carrying a full command line, with a fresh
    /// random request id.
    pub fn command(command_line: &str) -> Self {
        Packet::new(rand::random(), PacketType::Command, command_line.as_bytes())
    }

    /// Parses an inner frame (everything after the outer length prefix) back
    /// into a packet.
    pub fn decode(frame: &[u8]) -> Result<Self, RconError> {
        if frame.len() < Self::BASE_PACKET_SIZE {
            return Err(RconError::TruncatedFrame(frame.len()));
        }

        let request_id = u32::from_le_bytes(frame[..4].try_into()?);
        let type_value = u32::from_le_bytes(frame[4..8].try_into()?);
        let packet_type = type_value.try_into()?;

        let tail: [u8; 2] = frame[frame.len() - 2..].try_into()?;
        if tail != TAIL {
            return Err(RconError::InvalidTail(tail));
        }

        Ok(Packet {
            request_id,
            packet_type,
            payload: frame[8..frame.len() - 2].to_vec(),
        })
    }

    /// The value of the outer length prefix: every byte of the frame after
    /// the prefix itself.
    pub fn size(&self) -> u32 {
        (self.payload.len() + Self::BASE_PACKET_SIZE) as u32
    }

    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the payload as text.
    pub fn text(&self) -> Result<&str, RconError> {
        Ok(std::str::from_utf8(&self.payload)?)
    }

    /// Packs the packet into its full wire format, length prefix included.
    pub fn encode(&self) -> Vec<u8> {
        // Size, ID, Type, Payload, Terminator
        let mut frame = Vec::with_capacity(self.payload.len() + Self::BASE_PACKET_SIZE + 4);
        frame.extend_from_slice(&self.size().to_le_bytes());
        frame.extend_from_slice(&self.request_id.to_le_bytes());
        frame.extend_from_slice(&self.packet_type.to_le_bytes());
        frame.extend_from_slice(&self.payload);
        frame.extend_from_slice(&TAIL);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drops the outer length prefix, leaving the inner frame that `decode`
    /// expects.
    fn strip_length_prefix(frame: &[u8]) -> &[u8] {
        &frame[4..]
    }

    #[test]
    fn round_trips_every_packet_type() {
        for packet_type in [PacketType::Login, PacketType::Command, PacketType::Response] {
            let packet = Packet::new(0xdead_beef, packet_type, vec![0x00, 0xff, 0x7f, 0x01]);
            let decoded = Packet::decode(strip_length_prefix(&packet.encode())).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    #[test]
    fn round_trips_empty_payload() {
        let packet = Packet::new(42, PacketType::Command, vec![]);
        let decoded = Packet::decode(strip_length_prefix(&packet.encode())).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(decoded.payload(), b"");
    }

    #[test]
    fn length_prefix_counts_every_byte_after_itself() {
        let packet = Packet::command("say hi");
        let frame = packet.encode();
        let prefix = u32::from_le_bytes(frame[..4].try_into().unwrap());
        assert_eq!(prefix as usize, "say hi".len() + Packet::BASE_PACKET_SIZE);
        assert_eq!(prefix as usize, frame.len() - 4);
    }

    #[test]
    fn login_and_command_packets_carry_their_text() {
        let login = Packet::login("hunter2");
        assert_eq!(login.packet_type(), PacketType::Login);
        assert_eq!(login.payload(), b"hunter2");

        let command = Packet::command("seed");
        assert_eq!(command.packet_type(), PacketType::Command);
        assert_eq!(command.payload(), b"seed");
    }

    #[test]
    fn rejects_mutated_tail() {
        let mut frame = Packet::new(7, PacketType::Response, b"ok".to_vec()).encode();
        let last = frame.len() - 1;
        frame[last] = 0x01;
        let err = Packet::decode(strip_length_prefix(&frame)).unwrap_err();
        assert!(matches!(err, RconError::InvalidTail([0x00, 0x01])));
    }

    #[test]
    fn rejects_unknown_packet_type() {
        let mut frame = Packet::new(7, PacketType::Response, b"ok".to_vec()).encode();
        // the type field sits right after the length prefix and request id
        frame[8] = 7;
        let err = Packet::decode(strip_length_prefix(&frame)).unwrap_err();
        assert!(matches!(err, RconError::UnknownPacketType(7)));
    }

    #[test]
    fn rejects_truncated_frame() {
        let err = Packet::decode(&[0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, RconError::TruncatedFrame(3)));
    }

    #[test]
    fn text_requires_utf8() {
        let packet = Packet::new(1, PacketType::Response, vec![0xff, 0xfe]);
        assert!(matches!(
            packet.text().unwrap_err(),
            RconError::MalformedPacketBody(_)
        ));

        let packet = Packet::new(1, PacketType::Response, "Seed: [42]".as_bytes());
        assert_eq!(packet.text().unwrap(), "Seed: [42]");
    }
}
