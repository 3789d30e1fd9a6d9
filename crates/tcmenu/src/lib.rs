//! Remote control of tcMenu devices.
//!
//! tcmenu mirrors an embedded device's menu over a byte stream: the device
//! boots its items into a local [`domain::MenuTree`], then both sides trade
//! value changes, heartbeats and dialogs.
//!
//! # Crate Structure
//!
//! - [`domain`]: menu items, per-item state and the menu tree
//! - [`protocol`]: message types, framing and the TagVal codec
//! - [`persist`]: `tcMenuCopy:` JSON import/export (behind `persist` feature)
//! - [`connection`]: a blocking TCP session that keeps a tree in sync
//!
//! Enable `async` for a `tokio_util` codec (`protocol::MenuCommandCodec`).

pub mod connection;

/// Re-export domain types.
pub mod domain {
    pub use tcmenu_domain::*;
}

/// Re-export protocol types.
pub mod protocol {
    pub use tcmenu_protocol::*;
}

/// Re-export persistence types (requires `persist` feature).
#[cfg(feature = "persist")]
pub mod persist {
    pub use tcmenu_persist::*;
}

pub use connection::{ConnectionConfig, TcpMenuConnection};
