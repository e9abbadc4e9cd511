use crate::{error::RconError, packet::Packet};
use log::trace;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

/// Simple asynchronous rcon client. Call `connect()` to establish a
/// connection, then `login()` once before running commands. The client
/// should be `mut` as every exchange consumes one request/response round
/// trip on the connection.
///
/// The protocol allows a single outstanding request per connection; the
/// exclusive borrow on every method enforces that at compile time. Dropping
/// the client closes the connection.
///
/// The client keeps no record of whether `login` succeeded. Running a
/// command on an unauthenticated or expired session is answered by the
/// server with a mismatching request id, which surfaces as
/// [RconError::SessionDesynchronized]; logging in again is up to the caller.
///
/// ## Example
/// ```no_run
/// use craftcon::client::Client;
/// use std::error::Error;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn Error>> {
///     let host = "localhost:25575";
///     // client must be mutable as commands are stateful exchanges
///     let mut client = Client::connect(host).await?;
///     client.login("<put rcon password here>").await?;
///     let response = client.run("say", &["hi"]).await?;
///     Ok(())
/// }
/// ```
pub struct Client {
    stream: TcpStream,
}

impl Client {
    /// Opens a TCP connection to the server. No packets are exchanged until
    /// [Client::login] is called.
    pub async fn connect(host: &str) -> Result<Self, RconError> {
        let stream = TcpStream::connect(host)
            .await
            .map_err(RconError::UnreachableHost)?;

        trace!("opened tcp stream to {}", host);

        Ok(Client { stream })
    }

    /// Authenticates against the server. The protocol has no explicit status
    /// field for this: the server signals a rejected password by echoing a
    /// request id different from the one we sent, so a desynchronized
    /// exchange here means bad credentials. This call never retries.
    pub async fn login(&mut self, password: &str) -> Result<bool, RconError> {
        let login_packet = Packet::login(password);

        trace!("sending login packet to server");
        match self.communicate(&login_packet).await {
            Ok(_) => Ok(true),
            Err(RconError::SessionDesynchronized { .. }) => Err(RconError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// Runs a rcon command asynchronously. The command and its arguments are
    /// joined with single spaces into one command line, and the server's
    /// response is returned as text.
    ///
    /// A [RconError::SessionDesynchronized] error here usually means the
    /// server expired the session between commands. The client never
    /// re-authenticates on its own; that policy belongs to the caller.
    pub async fn run(&mut self, command: &str, arguments: &[&str]) -> Result<String, RconError> {
        let mut command_line = String::from(command);
        for argument in arguments {
            command_line.push(' ');
            command_line.push_str(argument);
        }

        trace!("sending command packet to server");
        let command_packet = Packet::command(&command_line);
        let response = self.communicate(&command_packet).await?;

        Ok(response.text()?.to_string())
    }

    /// Sends a single packet and reads back the matching response, one full
    /// round trip. Does not return until the server's length prefix and the
    /// complete inner frame have both arrived.
    pub async fn communicate(&mut self, packet: &Packet) -> Result<Packet, RconError> {
        self.stream
            .write_all(&packet.encode())
            .await
            .map_err(RconError::SendError)?;

        let mut header = [0; 4];
        self.stream
            .read_exact(&mut header)
            .await
            .map_err(RconError::ReceiveError)?;
        let length = u32::from_le_bytes(header) as usize;

        let mut frame = vec![0; length];
        self.stream
            .read_exact(&mut frame)
            .await
            .map_err(RconError::ReceiveError)?;

        let response = Packet::decode(&frame)?;
        trace!("receive response for request id {}", response.request_id());

        if response.request_id() != packet.request_id() {
            return Err(RconError::SessionDesynchronized {
                sent: packet.request_id(),
                received: response.request_id(),
            });
        }

        Ok(response)
    }
}
