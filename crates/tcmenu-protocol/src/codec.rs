use bytes::{Buf, BytesMut};
use tracing::{trace, warn};

use crate::command::MenuCommand;
use crate::converter::{ProtocolConverter, START_OF_MSG};
use crate::error::{ProtocolError, Result};
use crate::platform::CommandProtocol;
use crate::tagval::find_end_of_message;

/// Start marker, selector and two identity bytes.
pub const HEADER_SIZE: usize = 4;

/// Length prefix of a raw body.
const RAW_LENGTH_SIZE: usize = 4;

/// Encode a command into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────┬──────────┬───────────────────────────────┐
/// │ 0x01 │ Selector │ Type (2) │ Body                          │
/// │      │ 1=TagVal │ e.g. "HB"│ TagVal: K=v|...| 0x02         │
/// │      │ 2=Raw    │          │ Raw: length (4B BE) + bytes   │
/// └──────┴──────────┴──────────┴───────────────────────────────┘
/// ```
pub fn encode_command(
    converter: &ProtocolConverter,
    cmd: &MenuCommand,
    dst: &mut BytesMut,
) -> Result<()> {
    converter.to_channel(dst, cmd)
}

/// Decode one command from a stream buffer.
///
/// Bytes before the next start marker are discarded. Returns `Ok(None)` if
/// the buffer doesn't contain a complete frame yet. On success, or when the
/// frame was complete but could not be decoded, the frame is consumed.
pub fn decode_command(
    src: &mut BytesMut,
    converter: &ProtocolConverter,
) -> Result<Option<MenuCommand>> {
    let Some(start) = src.iter().position(|b| *b == START_OF_MSG) else {
        if !src.is_empty() {
            trace!(discarded = src.len(), "no start of message in buffer");
            src.clear();
        }
        return Ok(None);
    };
    if start > 0 {
        warn!(discarded = start, "skipping bytes before start of message");
        src.advance(start);
    }

    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let max = converter.config().max_message_size;
    let frame_len = match CommandProtocol::from_selector(src[1]) {
        CommandProtocol::TagVal => match find_end_of_message(&src[HEADER_SIZE..]) {
            Some(end) if HEADER_SIZE + end + 1 > max => {
                let size = HEADER_SIZE + end + 1;
                src.advance(size);
                return Err(ProtocolError::MessageTooLarge { size, max });
            }
            Some(end) => HEADER_SIZE + end + 1,
            None => {
                if src.len() > max {
                    src.advance(1);
                    return Err(ProtocolError::MessageTooLarge {
                        size: src.len() + 1,
                        max,
                    });
                }
                return Ok(None); // Need more data
            }
        },
        _ => {
            if src.len() < HEADER_SIZE + RAW_LENGTH_SIZE {
                return Ok(None); // Need more data
            }
            let mut len_bytes = [0u8; RAW_LENGTH_SIZE];
            len_bytes.copy_from_slice(&src[HEADER_SIZE..HEADER_SIZE + RAW_LENGTH_SIZE]);
            let body_len = u32::from_be_bytes(len_bytes) as usize;
            if body_len > max {
                src.advance(1);
                return Err(ProtocolError::MessageTooLarge {
                    size: body_len,
                    max,
                });
            }
            let total = HEADER_SIZE + RAW_LENGTH_SIZE + body_len;
            if src.len() < total {
                return Ok(None); // Need more data
            }
            total
        }
    };

    let mut frame = src.split_to(frame_len).freeze();
    frame.advance(1);
    converter.from_channel(&mut frame).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BootType, HeartbeatMode, MenuBootstrapCommand, MenuHeartbeatCommand};
    use crate::config::ProtocolConfig;

    fn heartbeat() -> MenuCommand {
        MenuHeartbeatCommand {
            heartbeat_interval: 1500,
            mode: HeartbeatMode::Normal,
        }
        .into()
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::new();
        encode_command(&converter, &heartbeat(), &mut buf).unwrap();

        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        assert_eq!(cmd, heartbeat());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_incomplete_frame() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::from(&b"\x01\x01HBHI=15"[..]);
        assert!(decode_command(&mut buf, &converter).unwrap().is_none());
        assert_eq!(buf.len(), 9);

        buf.extend_from_slice(b"00|HR=0|\x02");
        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        assert_eq!(cmd, heartbeat());
    }

    #[test]
    fn test_decode_skips_garbage() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::from(&b"noise\x01\x01BSBT=START|\x02"[..]);
        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        assert_eq!(
            cmd,
            MenuBootstrapCommand {
                boot_type: BootType::Start
            }
            .into()
        );

        let mut only_noise = BytesMut::from(&b"garbage"[..]);
        assert!(decode_command(&mut only_noise, &converter).unwrap().is_none());
        assert!(only_noise.is_empty());
    }

    #[test]
    fn test_decode_escaped_end_marker() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::from(&b"\x01\x01DMMO=S|BU=a\\\x02b|\x02"[..]);
        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        let MenuCommand::Dialog(dialog) = cmd else {
            panic!("expected dialog");
        };
        assert_eq!(dialog.buffer, "a\u{2}b");
    }

    #[test]
    fn test_decode_multiple_frames() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::new();
        encode_command(&converter, &heartbeat(), &mut buf).unwrap();
        encode_command(&converter, &heartbeat(), &mut buf).unwrap();

        assert!(decode_command(&mut buf, &converter).unwrap().is_some());
        assert!(decode_command(&mut buf, &converter).unwrap().is_some());
        assert!(decode_command(&mut buf, &converter).unwrap().is_none());
    }

    #[test]
    fn test_bad_frame_is_consumed() {
        let converter = ProtocolConverter::new();
        let mut buf = BytesMut::from(&b"\x01\x01QQA=1|\x02\x01\x01BSBT=END|\x02"[..]);
        assert!(decode_command(&mut buf, &converter).is_err());
        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        assert_eq!(cmd.command_type(), crate::field::BOOTSTRAP);
    }

    #[test]
    fn test_oversized_raw_frame() {
        let converter = ProtocolConverter::with_config(ProtocolConfig {
            max_message_size: 16,
            ..ProtocolConfig::default()
        });
        let mut buf = BytesMut::from(&b"\x01\x02ZZ\x00\x00\x04\x00"[..]);
        let err = decode_command(&mut buf, &converter).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { size: 1024, max: 16 }));
    }

    #[test]
    fn test_oversized_tagval_without_end() {
        let converter = ProtocolConverter::with_config(ProtocolConfig {
            max_message_size: 16,
            ..ProtocolConfig::default()
        });
        let mut buf = BytesMut::from(&b"\x01\x01HBHI=1500|HR=0|HI=1|"[..]);
        let err = decode_command(&mut buf, &converter).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { max: 16, .. }));
    }

    #[test]
    fn test_complete_oversized_tagval_frame_is_rejected_and_consumed() {
        let converter = ProtocolConverter::with_config(ProtocolConfig {
            max_message_size: 16,
            ..ProtocolConfig::default()
        });
        let mut buf = BytesMut::from(&b"\x01\x01HBHI=1500|HR=0|\x02\x01\x01BSBT=END|\x02"[..]);
        let err = decode_command(&mut buf, &converter).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { size: 18, max: 16 }));

        let cmd = decode_command(&mut buf, &converter).unwrap().unwrap();
        assert_eq!(cmd.command_type(), crate::field::BOOTSTRAP);
        assert!(buf.is_empty());
    }
}
