//! Blocking TCP session with a tcMenu device.

use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tcmenu_domain::MenuTree;
use tcmenu_protocol::command::HeartbeatMode;
use tcmenu_protocol::factory::{new_heartbeat_command, new_join_command};
use tcmenu_protocol::{
    apply_command_to_tree, ApiPlatform, ApplyOutcome, CommandReader, CommandWriter, MenuCommand,
    ProtocolConfig, ProtocolConverter, ProtocolError, ReaderConfig, Result,
};
use tracing::{debug, trace};
use uuid::Uuid;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_CLIENT_NAME: &str = "RustClient";
pub const DEFAULT_HEARTBEAT_FREQUENCY: Duration = Duration::from_secs(30);

/// Where to connect and how this client introduces itself.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    /// Name sent in the join message.
    pub client_name: String,
    /// Identity sent in the join message. Random in the default config.
    pub client_uuid: Uuid,
    pub platform: ApiPlatform,
    /// Interval between heartbeats; sent to the device in milliseconds.
    pub heartbeat_frequency: Duration,
    pub reader: ReaderConfig,
    pub protocol: ProtocolConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            client_uuid: Uuid::new_v4(),
            platform: ApiPlatform::JavaApi,
            heartbeat_frequency: DEFAULT_HEARTBEAT_FREQUENCY,
            reader: ReaderConfig::default(),
            protocol: ProtocolConfig::default(),
        }
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    fn heartbeat_millis(&self) -> i32 {
        i32::try_from(self.heartbeat_frequency.as_millis()).unwrap_or(i32::MAX)
    }
}

/// A connected session that keeps a local copy of the device's menu.
///
/// Reads and writes share one socket and one [`ProtocolConverter`]. Commands
/// read through [`read_and_apply`](Self::read_and_apply) update the owned
/// tree; the tree must not be shared with another session.
pub struct TcpMenuConnection {
    reader: CommandReader<TcpStream>,
    writer: CommandWriter<TcpStream>,
    tree: MenuTree,
    config: ConnectionConfig,
    last_heartbeat: Option<Instant>,
}

impl TcpMenuConnection {
    /// Connect to `config.host:config.port` with an empty tree.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        let stream = TcpStream::connect((config.host.as_str(), config.port))?;
        debug!(host = %config.host, port = config.port, "connected to device");
        Self::from_stream(stream, config, MenuTree::new())
    }

    /// Wrap an already connected stream, filling `tree` from what the device
    /// sends.
    pub fn from_stream(stream: TcpStream, config: ConnectionConfig, tree: MenuTree) -> Result<Self> {
        stream.set_read_timeout(config.reader.read_timeout)?;
        stream.set_write_timeout(config.reader.write_timeout)?;
        stream.set_nodelay(true)?;

        let converter = Arc::new(ProtocolConverter::with_config(config.protocol.clone()));
        let read_half = stream.try_clone()?;
        Ok(Self {
            reader: CommandReader::with_converter(read_half, Arc::clone(&converter)),
            writer: CommandWriter::with_converter(stream, converter),
            tree,
            config,
            last_heartbeat: None,
        })
    }

    pub fn send(&mut self, cmd: &MenuCommand) -> Result<()> {
        trace!(command = %cmd.command_type(), "sending command");
        self.writer.send(cmd)
    }

    /// Introduce this client to the device.
    pub fn send_join(&mut self) -> Result<()> {
        let join = new_join_command(
            &self.config.client_name,
            self.config.platform,
            Some(self.config.client_uuid),
        );
        self.send(&join.into())
    }

    pub fn send_heartbeat(&mut self, mode: HeartbeatMode) -> Result<()> {
        let heartbeat = new_heartbeat_command(self.config.heartbeat_millis(), mode);
        self.send(&heartbeat.into())?;
        self.last_heartbeat = Some(Instant::now());
        Ok(())
    }

    /// True when no heartbeat has been sent within the configured frequency.
    pub fn heartbeat_due(&self) -> bool {
        self.last_heartbeat
            .is_none_or(|sent| sent.elapsed() >= self.config.heartbeat_frequency)
    }

    /// Read the next command without touching the tree.
    pub fn read_command(&mut self) -> Result<MenuCommand> {
        self.reader.read_command()
    }

    /// Read the next command and apply it to the local tree.
    pub fn read_and_apply(&mut self) -> Result<(MenuCommand, ApplyOutcome)> {
        let cmd = self.reader.read_command()?;
        let outcome = apply_command_to_tree(&cmd, &mut self.tree);
        trace!(command = %cmd.command_type(), outcome = ?outcome, "applied command");
        Ok((cmd, outcome))
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.writer.get_ref().peer_addr().map_err(ProtocolError::Io)
    }

    /// Consume the session, keeping the tree it built.
    pub fn into_tree(self) -> MenuTree {
        self.tree
    }
}
