use serde::{Deserialize, Serialize};

/// Id of the implicit top-level submenu.
pub const ROOT_MENU_ID: i32 = 0;

/// Attributes shared by every kind of menu item.
///
/// An `id` of -1 means unassigned; an `eeprom_address` of -1 means the value
/// is not persisted on the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    pub id: i32,
    pub eeprom_address: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    pub read_only: bool,
    pub local_only: bool,
    pub visible: bool,
}

impl ItemInfo {
    /// Visible, writable, non-persisted item info with the given id and name.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            ..Self::default()
        }
    }

    pub fn with_eeprom_address(mut self, eeprom_address: i32) -> Self {
        self.eeprom_address = eeprom_address;
        self
    }

    pub fn with_variable_name(mut self, variable_name: impl Into<String>) -> Self {
        self.variable_name = Some(variable_name.into());
        self
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            variable_name: None,
            id: -1,
            eeprom_address: -1,
            function_name: None,
            read_only: false,
            local_only: false,
            visible: true,
        }
    }
}

/// How a boolean item names its two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanNaming {
    TrueFalse = 0,
    #[default]
    OnOff = 1,
    YesNo = 2,
    Checkbox = 3,
}

impl BooleanNaming {
    /// Unknown ids map to `TrueFalse`.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::OnOff,
            2 => Self::YesNo,
            3 => Self::Checkbox,
            _ => Self::TrueFalse,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }
}

/// Edit format of a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditItemType {
    #[default]
    #[serde(rename = "PLAIN_TEXT")]
    PlainText = 0,
    #[serde(rename = "IP_ADDRESS")]
    IpAddress = 1,
    #[serde(rename = "TIME_24H")]
    Time24H = 2,
    #[serde(rename = "TIME_12H")]
    Time12H = 3,
    #[serde(rename = "TIME_24_HUNDREDS")]
    Time24Hundreds = 4,
    #[serde(rename = "GREGORIAN_DATE")]
    GregorianDate = 5,
    #[serde(rename = "TIME_DURATION_SECONDS")]
    TimeDurationSeconds = 6,
    #[serde(rename = "TIME_DURATION_HUNDREDS")]
    TimeDurationHundreds = 7,
    #[serde(rename = "TIME_24H_HHMM")]
    Time24HHhmm = 8,
    #[serde(rename = "TIME_12H_HHMM")]
    Time12HHhmm = 9,
}

impl EditItemType {
    /// Unknown ids map to `PlainText`.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::IpAddress,
            2 => Self::Time24H,
            3 => Self::Time12H,
            4 => Self::Time24Hundreds,
            5 => Self::GregorianDate,
            6 => Self::TimeDurationSeconds,
            7 => Self::TimeDurationHundreds,
            8 => Self::Time24HHhmm,
            9 => Self::Time12HHhmm,
            _ => Self::PlainText,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    /// True for every time and date format.
    pub fn is_time(self) -> bool {
        !matches!(self, Self::PlainText | Self::IpAddress)
    }
}

/// Kind of a custom-builder item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomMenuType {
    #[default]
    Authentication,
    RemoteIotMonitor,
}

/// Where a scroll-choice item reads its entries from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScrollChoiceMode {
    #[default]
    ArrayInEeprom,
    ArrayInRam,
    CustomRenderfn,
}

/// An item that triggers a callback on the device; it has no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActionMenuItem {
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// An integer item displayed as `(value + offset) / divisor` with a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogMenuItem {
    #[serde(default)]
    pub max_value: i32,
    #[serde(default)]
    pub offset: i32,
    #[serde(default)]
    pub divisor: i32,
    #[serde(default)]
    pub unit_name: String,
    #[serde(default = "default_step")]
    pub step: i32,
    #[serde(flatten)]
    pub info: ItemInfo,
}

fn default_step() -> i32 {
    1
}

impl Default for AnalogMenuItem {
    fn default() -> Self {
        Self {
            max_value: -1,
            offset: -1,
            divisor: -1,
            unit_name: String::new(),
            step: 1,
            info: ItemInfo::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BooleanMenuItem {
    #[serde(default)]
    pub naming: BooleanNaming,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// An item whose presentation is built by custom code on the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBuilderMenuItem {
    #[serde(default)]
    pub menu_type: CustomMenuType,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// A fixed-point decimal number edited digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableLargeNumberMenuItem {
    #[serde(default)]
    pub digits_allowed: i32,
    #[serde(default)]
    pub decimal_places: i32,
    #[serde(default)]
    pub negative_allowed: bool,
    #[serde(flatten)]
    pub info: ItemInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableTextMenuItem {
    #[serde(default)]
    pub text_length: i32,
    #[serde(default)]
    pub item_type: EditItemType,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// An integer item whose value indexes into `enum_entries`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMenuItem {
    #[serde(default)]
    pub enum_entries: Vec<String>,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// A read-mostly floating point item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatMenuItem {
    #[serde(default)]
    pub num_decimal_places: i32,
    #[serde(flatten)]
    pub info: ItemInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rgb32MenuItem {
    #[serde(default)]
    pub include_alpha_channel: bool,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// A list of rows supplied at runtime by the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeListMenuItem {
    #[serde(default)]
    pub initial_rows: i32,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// A choice among `num_entries` fixed-width entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollChoiceMenuItem {
    #[serde(default)]
    pub item_width: i32,
    #[serde(default)]
    pub eeprom_offset: i32,
    #[serde(default)]
    pub num_entries: i32,
    #[serde(default)]
    pub choice_mode: ScrollChoiceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// The only item kind that owns children.
///
/// A submenu never has a function name; constructors clear it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SubMenuItem {
    #[serde(default)]
    pub secured: bool,
    #[serde(flatten)]
    pub info: ItemInfo,
}

impl SubMenuItem {
    pub fn new(info: ItemInfo) -> Self {
        Self {
            secured: false,
            info: ItemInfo {
                function_name: None,
                ..info
            },
        }
    }

    /// The implicit top level of every tree.
    pub fn root() -> Self {
        Self::new(
            ItemInfo::new(ROOT_MENU_ID, "Root")
                .with_local_only(true)
                .with_visible(false),
        )
    }

    pub fn id(&self) -> i32 {
        self.info.id
    }
}

/// Any menu item.
///
/// Items are immutable values; a tree changes an item by replacing it with
/// another value carrying the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "camelCase")]
pub enum MenuItem {
    Action(ActionMenuItem),
    Analog(AnalogMenuItem),
    Boolean(BooleanMenuItem),
    CustomBuilder(CustomBuilderMenuItem),
    LargeNumber(EditableLargeNumberMenuItem),
    Text(EditableTextMenuItem),
    Enum(EnumMenuItem),
    Float(FloatMenuItem),
    Rgb32(Rgb32MenuItem),
    RuntimeList(RuntimeListMenuItem),
    ScrollChoice(ScrollChoiceMenuItem),
    SubMenu(SubMenuItem),
}

impl MenuItem {
    pub fn info(&self) -> &ItemInfo {
        match self {
            Self::Action(item) => &item.info,
            Self::Analog(item) => &item.info,
            Self::Boolean(item) => &item.info,
            Self::CustomBuilder(item) => &item.info,
            Self::LargeNumber(item) => &item.info,
            Self::Text(item) => &item.info,
            Self::Enum(item) => &item.info,
            Self::Float(item) => &item.info,
            Self::Rgb32(item) => &item.info,
            Self::RuntimeList(item) => &item.info,
            Self::ScrollChoice(item) => &item.info,
            Self::SubMenu(item) => &item.info,
        }
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        match self {
            Self::Action(item) => &mut item.info,
            Self::Analog(item) => &mut item.info,
            Self::Boolean(item) => &mut item.info,
            Self::CustomBuilder(item) => &mut item.info,
            Self::LargeNumber(item) => &mut item.info,
            Self::Text(item) => &mut item.info,
            Self::Enum(item) => &mut item.info,
            Self::Float(item) => &mut item.info,
            Self::Rgb32(item) => &mut item.info,
            Self::RuntimeList(item) => &mut item.info,
            Self::ScrollChoice(item) => &mut item.info,
            Self::SubMenu(item) => &mut item.info,
        }
    }

    pub fn id(&self) -> i32 {
        self.info().id
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn eeprom_address(&self) -> i32 {
        self.info().eeprom_address
    }

    pub fn read_only(&self) -> bool {
        self.info().read_only
    }

    pub fn local_only(&self) -> bool {
        self.info().local_only
    }

    pub fn visible(&self) -> bool {
        self.info().visible
    }

    /// Only submenus own children.
    pub fn has_children(&self) -> bool {
        matches!(self, Self::SubMenu(_))
    }

    /// A copy of this item carrying a different id.
    pub fn with_id(&self, id: i32) -> Self {
        let mut copy = self.clone();
        copy.info_mut().id = id;
        copy
    }

    pub fn as_sub_menu(&self) -> Option<&SubMenuItem> {
        match self {
            Self::SubMenu(sub) => Some(sub),
            _ => None,
        }
    }

    /// Short lowercase name of the item kind, used in logs and tables.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::Analog(_) => "analog",
            Self::Boolean(_) => "boolean",
            Self::CustomBuilder(_) => "custom",
            Self::LargeNumber(_) => "largenum",
            Self::Text(_) => "text",
            Self::Enum(_) => "enum",
            Self::Float(_) => "float",
            Self::Rgb32(_) => "rgb32",
            Self::RuntimeList(_) => "list",
            Self::ScrollChoice(_) => "scroll",
            Self::SubMenu(_) => "submenu",
        }
    }
}

macro_rules! impl_from_item {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MenuItem {
                fn from(item: $ty) -> Self {
                    MenuItem::$variant(item)
                }
            }
        )*
    };
}

impl_from_item! {
    Action => ActionMenuItem,
    Analog => AnalogMenuItem,
    Boolean => BooleanMenuItem,
    CustomBuilder => CustomBuilderMenuItem,
    LargeNumber => EditableLargeNumberMenuItem,
    Text => EditableTextMenuItem,
    Enum => EnumMenuItem,
    Float => FloatMenuItem,
    Rgb32 => Rgb32MenuItem,
    RuntimeList => RuntimeListMenuItem,
    ScrollChoice => ScrollChoiceMenuItem,
    SubMenu => SubMenuItem,
}
