use serde::Serialize;

use crate::correlation::CorrelationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogMode {
    Show,
    Hide,
    Action,
}

impl DialogMode {
    pub fn code(self) -> &'static str {
        match self {
            DialogMode::Show => "S",
            DialogMode::Hide => "H",
            DialogMode::Action => "A",
        }
    }

    /// Unknown codes read as [`DialogMode::Action`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "S" => DialogMode::Show,
            "H" => DialogMode::Hide,
            _ => DialogMode::Action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuButtonType {
    Ok,
    Accept,
    Cancel,
    Close,
    #[default]
    None,
}

impl MenuButtonType {
    pub fn type_value(self) -> i32 {
        match self {
            MenuButtonType::Ok => 0,
            MenuButtonType::Accept => 1,
            MenuButtonType::Cancel => 2,
            MenuButtonType::Close => 3,
            MenuButtonType::None => 4,
        }
    }

    /// Unknown values read as [`MenuButtonType::None`].
    pub fn from_type_value(value: i32) -> Self {
        match value {
            0 => MenuButtonType::Ok,
            1 => MenuButtonType::Accept,
            2 => MenuButtonType::Cancel,
            3 => MenuButtonType::Close,
            _ => MenuButtonType::None,
        }
    }

    pub fn button_text(self) -> &'static str {
        match self {
            MenuButtonType::Ok => "OK",
            MenuButtonType::Accept => "Accept",
            MenuButtonType::Cancel => "Cancel",
            MenuButtonType::Close => "Close",
            MenuButtonType::None => "",
        }
    }
}

/// Show, hide or act on the device's modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuDialogCommand {
    pub dialog_mode: DialogMode,
    pub header: String,
    pub buffer: String,
    pub button1: MenuButtonType,
    pub button2: MenuButtonType,
    pub correlation_id: CorrelationId,
}
