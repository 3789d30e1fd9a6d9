//! `tokio_util` codec over the same framing as [`crate::codec`].

use std::sync::Arc;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_command, encode_command};
use crate::command::MenuCommand;
use crate::converter::ProtocolConverter;
use crate::error::ProtocolError;

/// Frames [`MenuCommand`]s for `tokio_util::codec::Framed`.
///
/// A frame that fails to decode is consumed before the error is returned,
/// but `Framed` ends the stream on the first error.
#[derive(Clone, Default)]
pub struct MenuCommandCodec {
    converter: Arc<ProtocolConverter>,
}

impl MenuCommandCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a converter that already has custom processors registered.
    pub fn with_converter(converter: Arc<ProtocolConverter>) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &ProtocolConverter {
        &self.converter
    }
}

impl Decoder for MenuCommandCodec {
    type Item = MenuCommand;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        decode_command(src, &self.converter)
    }
}

impl Encoder<MenuCommand> for MenuCommandCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: MenuCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_command(&self.converter, &item, dst)
    }
}

impl Encoder<&MenuCommand> for MenuCommandCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: &MenuCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_command(&self.converter, item, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BootType, HeartbeatMode};
    use crate::factory::{new_bootstrap_command, new_heartbeat_command};
    use futures_util::{SinkExt, StreamExt};
    use tokio_util::codec::Framed;

    #[test]
    fn decoder_waits_for_whole_frame() {
        let mut codec = MenuCommandCodec::new();
        let mut buf = BytesMut::from(&b"\x01\x01BSBT=ST"[..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"ART|\x02");
        let cmd = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(cmd, MenuCommand::from(new_bootstrap_command(BootType::Start)));
        assert!(buf.is_empty());
    }

    #[test]
    fn encoder_writes_tagval_frame() {
        let mut codec = MenuCommandCodec::new();
        let mut buf = BytesMut::new();
        let cmd: MenuCommand = new_heartbeat_command(1500, HeartbeatMode::Start).into();
        codec.encode(&cmd, &mut buf).unwrap();
        assert_eq!(&buf[..], b"\x01\x01HBHI=1500|HR=1|\x02");
    }

    #[tokio::test]
    async fn framed_duplex_roundtrip() {
        let (client, device) = tokio::io::duplex(1024);
        let mut client = Framed::new(client, MenuCommandCodec::new());
        let mut device = Framed::new(device, MenuCommandCodec::new());

        let heartbeat: MenuCommand = new_heartbeat_command(1500, HeartbeatMode::Normal).into();
        client.send(heartbeat.clone()).await.unwrap();
        client
            .send(MenuCommand::from(new_bootstrap_command(BootType::End)))
            .await
            .unwrap();

        assert_eq!(device.next().await.unwrap().unwrap(), heartbeat);
        assert!(matches!(
            device.next().await.unwrap().unwrap(),
            MenuCommand::Bootstrap(_)
        ));
    }
}
