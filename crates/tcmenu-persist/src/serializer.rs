//! Conversion between menu trees and `tcMenuCopy:` text.
//!
//! ```text
//! let tree = new_menu_tree_with_items(&clipboard)?;
//! let text = items_to_copy_text(&MenuItem::SubMenu(SubMenuItem::root()), &tree)?;
//! ```

use tcmenu_domain::helper::set_menu_state;
use tcmenu_domain::{MenuItem, MenuTree, SubMenuItem, ROOT_MENU_ID};
use tracing::{debug, warn};

use crate::error::Result;
use crate::persisted::{PersistedMenu, PersistedRecord, TCMENU_COPY_PREFIX};

/// Pretty-printed JSON array of `items`.
pub fn to_json(items: &[PersistedMenu]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Parse a JSON array of persisted items.
///
/// Records with an unknown type, or whose item does not match its type, are
/// skipped with a warning. Text that is not a JSON array is an error.
pub fn from_json(json: &str) -> Result<Vec<PersistedMenu>> {
    let records: Vec<PersistedRecord> = serde_json::from_str(json)?;
    let items = records
        .into_iter()
        .filter_map(|record| {
            let item_type = record.item_type.clone();
            match PersistedMenu::try_from(record) {
                Ok(menu) => Some(menu),
                Err(err) => {
                    warn!(item_type = %item_type, error = %err, "persisted item not reloaded, skipping");
                    None
                }
            }
        })
        .collect();
    Ok(items)
}

/// Every descendant of `node`, parents before their children, each recorded
/// against its direct parent.
pub fn populate_list_in_order(node: &SubMenuItem, tree: &MenuTree) -> Vec<PersistedMenu> {
    let mut items = Vec::new();
    tree.recurse_tree_iterating_on_items(node, |item, parent| {
        items.push(persist_with_state(item, parent.id(), tree));
    });
    items
}

fn persist_with_state(item: &MenuItem, parent_id: i32, tree: &MenuTree) -> PersistedMenu {
    let mut persisted = PersistedMenu::new(parent_id, item.clone());
    if check_item_value_can_persist(&persisted) {
        persisted.default_value = tree.get_menu_state(item).map(|state| state.value.to_string());
    }
    persisted
}

/// Copy text for `start`: all of its descendants when it is a submenu,
/// otherwise the item alone.
pub fn items_to_copy_text(start: &MenuItem, tree: &MenuTree) -> Result<String> {
    let items = match start.as_sub_menu() {
        Some(sub) => populate_list_in_order(sub, tree),
        None => {
            let parent_id = tree.find_parent(start).map_or(ROOT_MENU_ID, SubMenuItem::id);
            vec![persist_with_state(start, parent_id, tree)]
        }
    };
    debug!(start_id = start.id(), count = items.len(), "exporting menu items");
    Ok(format!("{TCMENU_COPY_PREFIX}{}", to_json(&items)?))
}

/// Items held in copy text. Text without the `tcMenuCopy:` prefix holds none.
pub fn copy_text_to_items(copy_text: &str) -> Result<Vec<PersistedMenu>> {
    match copy_text.strip_prefix(TCMENU_COPY_PREFIX) {
        Some(json) => from_json(json),
        None => Ok(Vec::new()),
    }
}

/// Build a fresh tree from copy text.
///
/// Items whose parent is not (yet) in the tree are placed under the root.
pub fn new_menu_tree_with_items(copy_text: &str) -> Result<MenuTree> {
    let mut tree = MenuTree::new();
    for persisted in copy_text_to_items(copy_text)? {
        let parent = match tree.get_sub_menu_by_id(persisted.parent_id) {
            Some(parent) => parent.clone(),
            None => {
                warn!(
                    item_id = persisted.item.id(),
                    parent_id = persisted.parent_id,
                    "persisted item parent unknown, adding to root"
                );
                SubMenuItem::root()
            }
        };
        tree.add_menu_item(&parent, persisted.item.clone());

        if let Some(value) = persisted.default_value {
            set_menu_state(&persisted.item, value, &mut tree);
        }
    }
    Ok(tree)
}

/// Whether the item has a value worth saving. Submenus, actions, runtime
/// lists and custom builders do not.
pub fn check_item_value_can_persist(persisted: &PersistedMenu) -> bool {
    !matches!(
        persisted.item,
        MenuItem::SubMenu(_)
            | MenuItem::Action(_)
            | MenuItem::RuntimeList(_)
            | MenuItem::CustomBuilder(_)
    )
}
