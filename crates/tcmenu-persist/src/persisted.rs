use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tcmenu_domain::{
    ActionMenuItem, AnalogMenuItem, BooleanMenuItem, CustomBuilderMenuItem,
    EditableLargeNumberMenuItem, EditableTextMenuItem, EnumMenuItem, FloatMenuItem, MenuItem,
    Rgb32MenuItem, RuntimeListMenuItem, ScrollChoiceMenuItem, SubMenuItem, ROOT_MENU_ID,
};

use crate::error::PersistError;

/// Marks clipboard text as holding persisted menu items.
pub const TCMENU_COPY_PREFIX: &str = "tcMenuCopy:";

/// The `type` name written alongside each persisted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistType {
    Analog,
    Enum,
    SubMenu,
    Action,
    RuntimeList,
    CustomBuilder,
    Boolean,
    Text,
    Float,
    LargeNumber,
    ScrollChoice,
    Rgb32,
}

impl PersistType {
    pub const ALL: [PersistType; 12] = [
        Self::Analog,
        Self::Enum,
        Self::SubMenu,
        Self::Action,
        Self::RuntimeList,
        Self::CustomBuilder,
        Self::Boolean,
        Self::Text,
        Self::Float,
        Self::LargeNumber,
        Self::ScrollChoice,
        Self::Rgb32,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analog => "analogItem",
            Self::Enum => "enumItem",
            Self::SubMenu => "subMenu",
            Self::Action => "actionMenu",
            Self::RuntimeList => "runtimeList",
            Self::CustomBuilder => "customBuildItem",
            Self::Boolean => "boolItem",
            Self::Text => "textItem",
            Self::Float => "floatItem",
            Self::LargeNumber => "largeNumItem",
            Self::ScrollChoice => "scrollItem",
            Self::Rgb32 => "rgbItem",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn for_item(item: &MenuItem) -> Self {
        match item {
            MenuItem::Action(_) => Self::Action,
            MenuItem::Analog(_) => Self::Analog,
            MenuItem::Boolean(_) => Self::Boolean,
            MenuItem::CustomBuilder(_) => Self::CustomBuilder,
            MenuItem::LargeNumber(_) => Self::LargeNumber,
            MenuItem::Text(_) => Self::Text,
            MenuItem::Enum(_) => Self::Enum,
            MenuItem::Float(_) => Self::Float,
            MenuItem::Rgb32(_) => Self::Rgb32,
            MenuItem::RuntimeList(_) => Self::RuntimeList,
            MenuItem::ScrollChoice(_) => Self::ScrollChoice,
            MenuItem::SubMenu(_) => Self::SubMenu,
        }
    }

    fn decode(self, value: Value) -> serde_json::Result<MenuItem> {
        match self {
            Self::Analog => decode_as::<AnalogMenuItem>(value),
            Self::Enum => decode_as::<EnumMenuItem>(value),
            Self::SubMenu => decode_as::<SubMenuItem>(value),
            Self::Action => decode_as::<ActionMenuItem>(value),
            Self::RuntimeList => decode_as::<RuntimeListMenuItem>(value),
            Self::CustomBuilder => decode_as::<CustomBuilderMenuItem>(value),
            Self::Boolean => decode_as::<BooleanMenuItem>(value),
            Self::Text => decode_as::<EditableTextMenuItem>(value),
            Self::Float => decode_as::<FloatMenuItem>(value),
            Self::LargeNumber => decode_as::<EditableLargeNumberMenuItem>(value),
            Self::ScrollChoice => decode_as::<ScrollChoiceMenuItem>(value),
            Self::Rgb32 => decode_as::<Rgb32MenuItem>(value),
        }
    }
}

impl fmt::Display for PersistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn decode_as<T>(value: Value) -> serde_json::Result<MenuItem>
where
    T: DeserializeOwned + Into<MenuItem>,
{
    serde_json::from_value::<T>(value).map(Into::into)
}

/// A menu item together with what is needed to put it back into a tree:
/// the id of its parent submenu and, optionally, its value as text.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedMenu {
    pub parent_id: i32,
    pub item_type: PersistType,
    pub item: MenuItem,
    pub default_value: Option<String>,
}

impl PersistedMenu {
    pub fn new(parent_id: i32, item: MenuItem) -> Self {
        Self {
            parent_id,
            item_type: PersistType::for_item(&item),
            item,
            default_value: None,
        }
    }

    /// An item placed directly under the root menu.
    pub fn at_root(item: MenuItem) -> Self {
        Self::new(ROOT_MENU_ID, item)
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Serializes the item's own fields without the enum tag used by
/// [`MenuItem`]'s derived form.
struct ItemBody<'a>(&'a MenuItem);

impl Serialize for ItemBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            MenuItem::Action(item) => item.serialize(serializer),
            MenuItem::Analog(item) => item.serialize(serializer),
            MenuItem::Boolean(item) => item.serialize(serializer),
            MenuItem::CustomBuilder(item) => item.serialize(serializer),
            MenuItem::LargeNumber(item) => item.serialize(serializer),
            MenuItem::Text(item) => item.serialize(serializer),
            MenuItem::Enum(item) => item.serialize(serializer),
            MenuItem::Float(item) => item.serialize(serializer),
            MenuItem::Rgb32(item) => item.serialize(serializer),
            MenuItem::RuntimeList(item) => item.serialize(serializer),
            MenuItem::ScrollChoice(item) => item.serialize(serializer),
            MenuItem::SubMenu(item) => item.serialize(serializer),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordOut<'a> {
    parent_id: i32,
    #[serde(rename = "type")]
    item_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<&'a str>,
    item: ItemBody<'a>,
}

impl Serialize for PersistedMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordOut {
            parent_id: self.parent_id,
            item_type: self.item_type.as_str(),
            default_value: self.default_value.as_deref(),
            item: ItemBody(&self.item),
        }
        .serialize(serializer)
    }
}

/// One record as read from JSON, before its item type is resolved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersistedRecord {
    #[serde(default)]
    pub(crate) parent_id: i32,
    #[serde(rename = "type")]
    pub(crate) item_type: String,
    #[serde(default)]
    pub(crate) default_value: Option<String>,
    pub(crate) item: Value,
}

impl TryFrom<PersistedRecord> for PersistedMenu {
    type Error = PersistError;

    fn try_from(record: PersistedRecord) -> Result<Self, Self::Error> {
        let item_type = PersistType::from_name(&record.item_type)
            .ok_or_else(|| PersistError::UnknownItemType(record.item_type.clone()))?;
        let item = item_type.decode(record.item)?;
        Ok(Self {
            parent_id: record.parent_id,
            item_type,
            item,
            default_value: record.default_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tcmenu_domain::{BooleanNaming, ItemInfo};

    #[test]
    fn type_names_round_trip() {
        for kind in PersistType::ALL {
            assert_eq!(PersistType::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PersistType::from_name("mysteryItem"), None);
    }

    #[test]
    fn record_shape_matches_designer_format() {
        let item: MenuItem = BooleanMenuItem {
            naming: BooleanNaming::TrueFalse,
            info: ItemInfo::new(1, "abc").with_eeprom_address(102),
        }
        .into();
        let value = serde_json::to_value(PersistedMenu::at_root(item)).unwrap();

        assert_eq!(
            value,
            json!({
                "parentId": 0,
                "type": "boolItem",
                "item": {
                    "naming": "TRUE_FALSE",
                    "name": "abc",
                    "id": 1,
                    "eepromAddress": 102,
                    "readOnly": false,
                    "localOnly": false,
                    "visible": true
                }
            })
        );
    }

    #[test]
    fn default_value_is_written_when_present() {
        let item: MenuItem = ActionMenuItem {
            info: ItemInfo::new(6, "go"),
        }
        .into();
        let value =
            serde_json::to_value(PersistedMenu::new(3, item).with_default_value("1")).unwrap();
        assert_eq!(value["defaultValue"], json!("1"));
        assert_eq!(value["parentId"], json!(3));
        assert_eq!(value["type"], json!("actionMenu"));
    }

    #[test]
    fn unknown_record_type_is_an_error() {
        let record: PersistedRecord = serde_json::from_value(json!({
            "parentId": 0,
            "type": "mysteryItem",
            "item": {}
        }))
        .unwrap();
        assert!(matches!(
            PersistedMenu::try_from(record),
            Err(PersistError::UnknownItemType(name)) if name == "mysteryItem"
        ));
    }
}
