use thiserror::Error;

/// Possible errors for the package.
#[derive(Error, Debug)]
pub enum RconError {
    /// Returned if we received a packet that does not have a type known to us.
    #[error("unknown rcon packet type: {0}")]
    UnknownPacketType(u32),
    /// Returned if an inner frame is too short to hold a request id, a type
    /// and the tail.
    #[error("packet truncated ({0} bytes)")]
    TruncatedFrame(usize),
    /// Returned if the header is mangled in some way (bad offsets, incomplete
    /// response)
    #[error("packet header malformed (can't parse size, id or type)")]
    MalformedPacketHeader(#[from] std::array::TryFromSliceError),
    /// Returned if a frame does not end in the mandatory two null bytes.
    #[error("packet tail malformed (expected two null bytes, got {0:02x?})")]
    InvalidTail([u8; 2]),
    /// Returned if the body is mangled in some way.
    #[error("packet body malformed (not valid ascii or utf-8)")]
    MalformedPacketBody(#[from] std::str::Utf8Error),
    /// Returned if the host is down or behind a firewall.
    #[error("host cannot be reached")]
    UnreachableHost(#[source] std::io::Error),
    /// Internal error used if the stream was successfully established, but
    /// there was a problem writing to the socket.
    #[error("cannot send message to host")]
    SendError(#[source] std::io::Error),
    /// Internal error used if the stream was successfully established, but
    /// there was a problem reading from the socket.
    #[error("cannot receive response from host")]
    ReceiveError(#[source] std::io::Error),
    /// Returned if you can't remember the password.
    #[error("bad password")]
    InvalidCredentials,
    /// Returned if a response echoed back a request id different from the one
    /// we sent. Outside of a login this usually means the server has expired
    /// the session.
    #[error("request id mismatch: sent {sent}, received {received}")]
    SessionDesynchronized { sent: u32, received: u32 },
}
