//! Command catalog exchanged between a device and a remote client.

pub mod boot;
pub mod change;
pub mod dialog;
pub mod session;

use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tcmenu_domain::MenuItem;

use crate::field::{self, MessageField};

pub use boot::{
    boot_command_for_item, BootItem, BootItemMenuCommand, MenuActionBootCommand,
    MenuAnalogBootCommand, MenuBooleanBootCommand, MenuEnumBootCommand, MenuFloatBootCommand,
    MenuLargeNumBootCommand, MenuRgb32BootCommand, MenuRuntimeListBootCommand,
    MenuScrollChoiceBootCommand, MenuSubBootCommand, MenuTextBootCommand,
};
pub use change::{ChangeType, ChangeValue, MenuChangeCommand};
pub use dialog::{DialogMode, MenuButtonType, MenuDialogCommand};
pub use session::{
    AckStatus, BootType, HeartbeatMode, MenuAcknowledgementCommand, MenuBootstrapCommand,
    MenuHeartbeatCommand, MenuJoinCommand, MenuPairingCommand, DEFAULT_HEARTBEAT_INTERVAL,
    DEFAULT_SERIAL_NUMBER,
};

/// A command for a message type registered outside the built-in set.
///
/// The payload is whatever the registered processors agree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMenuCommand {
    pub field: MessageField,
    pub payload: Bytes,
}

impl CustomMenuCommand {
    pub fn new(field: MessageField, payload: impl Into<Bytes>) -> Self {
        Self {
            field,
            payload: payload.into(),
        }
    }
}

impl Serialize for CustomMenuCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CustomMenuCommand", 2)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("payload", &self.payload[..])?;
        state.end()
    }
}

/// Every message the protocol carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", content = "body", rename_all = "snake_case")]
pub enum MenuCommand {
    Join(MenuJoinCommand),
    Pairing(MenuPairingCommand),
    Heartbeat(MenuHeartbeatCommand),
    Bootstrap(MenuBootstrapCommand),
    AnalogBoot(MenuAnalogBootCommand),
    ActionBoot(MenuActionBootCommand),
    SubMenuBoot(MenuSubBootCommand),
    EnumBoot(MenuEnumBootCommand),
    BooleanBoot(MenuBooleanBootCommand),
    TextBoot(MenuTextBootCommand),
    RuntimeListBoot(MenuRuntimeListBootCommand),
    ScrollChoiceBoot(MenuScrollChoiceBootCommand),
    Rgb32Boot(MenuRgb32BootCommand),
    LargeNumberBoot(MenuLargeNumBootCommand),
    FloatBoot(MenuFloatBootCommand),
    Change(MenuChangeCommand),
    Acknowledgement(MenuAcknowledgementCommand),
    Dialog(MenuDialogCommand),
    Custom(CustomMenuCommand),
}

impl MenuCommand {
    /// Message identity used on the wire.
    pub fn command_type(&self) -> MessageField {
        match self {
            MenuCommand::Join(_) => field::JOIN,
            MenuCommand::Pairing(_) => field::PAIRING_REQUEST,
            MenuCommand::Heartbeat(_) => field::HEARTBEAT,
            MenuCommand::Bootstrap(_) => field::BOOTSTRAP,
            MenuCommand::AnalogBoot(c) => c.command_type(),
            MenuCommand::ActionBoot(c) => c.command_type(),
            MenuCommand::SubMenuBoot(c) => c.command_type(),
            MenuCommand::EnumBoot(c) => c.command_type(),
            MenuCommand::BooleanBoot(c) => c.command_type(),
            MenuCommand::TextBoot(c) => c.command_type(),
            MenuCommand::RuntimeListBoot(c) => c.command_type(),
            MenuCommand::ScrollChoiceBoot(c) => c.command_type(),
            MenuCommand::Rgb32Boot(c) => c.command_type(),
            MenuCommand::LargeNumberBoot(c) => c.command_type(),
            MenuCommand::FloatBoot(c) => c.command_type(),
            MenuCommand::Change(_) => field::CHANGE_INT_FIELD,
            MenuCommand::Acknowledgement(_) => field::ACKNOWLEDGEMENT,
            MenuCommand::Dialog(_) => field::DIALOG_UPDATE,
            MenuCommand::Custom(c) => c.field,
        }
    }

    /// Parent submenu id and item announced by a boot command.
    pub fn boot_item(&self) -> Option<(i32, MenuItem)> {
        match self {
            MenuCommand::AnalogBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::ActionBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::SubMenuBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::EnumBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::BooleanBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::TextBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::RuntimeListBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::ScrollChoiceBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::Rgb32Boot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::LargeNumberBoot(c) => Some((c.sub_menu_id, c.item())),
            MenuCommand::FloatBoot(c) => Some((c.sub_menu_id, c.item())),
            _ => None,
        }
    }

    pub fn is_boot_item(&self) -> bool {
        self.boot_item().is_some()
    }
}

macro_rules! impl_from_command {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for MenuCommand {
                fn from(cmd: $ty) -> Self {
                    MenuCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command! {
    Join(MenuJoinCommand),
    Pairing(MenuPairingCommand),
    Heartbeat(MenuHeartbeatCommand),
    Bootstrap(MenuBootstrapCommand),
    AnalogBoot(MenuAnalogBootCommand),
    ActionBoot(MenuActionBootCommand),
    SubMenuBoot(MenuSubBootCommand),
    EnumBoot(MenuEnumBootCommand),
    BooleanBoot(MenuBooleanBootCommand),
    TextBoot(MenuTextBootCommand),
    RuntimeListBoot(MenuRuntimeListBootCommand),
    ScrollChoiceBoot(MenuScrollChoiceBootCommand),
    Rgb32Boot(MenuRgb32BootCommand),
    LargeNumberBoot(MenuLargeNumBootCommand),
    FloatBoot(MenuFloatBootCommand),
    Change(MenuChangeCommand),
    Acknowledgement(MenuAcknowledgementCommand),
    Dialog(MenuDialogCommand),
    Custom(CustomMenuCommand),
}
