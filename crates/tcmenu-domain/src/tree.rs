use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::helper;
use crate::item::{MenuItem, SubMenuItem, ROOT_MENU_ID};
use crate::state::MenuState;

/// Direction for [`MenuTree::move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    MoveUp,
    MoveDown,
}

struct SubMenuEntry {
    /// Always the `SubMenu` variant.
    menu: MenuItem,
    children: Vec<MenuItem>,
}

impl SubMenuEntry {
    fn new(sub: SubMenuItem) -> Self {
        Self {
            menu: MenuItem::SubMenu(sub),
            children: Vec::new(),
        }
    }

    fn id(&self) -> i32 {
        self.menu.id()
    }

    fn sub_menu(&self) -> Option<&SubMenuItem> {
        self.menu.as_sub_menu()
    }
}

/// The menu hierarchy and the current state of every item.
///
/// Each submenu, [`SubMenuItem::root`] included, owns an ordered list of direct
/// children. Items are matched by id alone, so a replacement only needs to
/// carry the same id as the item it replaces. The tree is not synchronized and
/// is meant to be driven by one session.
pub struct MenuTree {
    sub_menus: Vec<SubMenuEntry>,
    states: HashMap<i32, MenuState>,
}

impl MenuTree {
    /// A tree holding only the root submenu.
    pub fn new() -> Self {
        Self {
            sub_menus: vec![SubMenuEntry::new(SubMenuItem::root())],
            states: HashMap::new(),
        }
    }

    fn entry(&self, id: i32) -> Option<&SubMenuEntry> {
        self.sub_menus.iter().find(|entry| entry.id() == id)
    }

    fn entry_mut(&mut self, id: i32) -> Option<&mut SubMenuEntry> {
        self.sub_menus.iter_mut().find(|entry| entry.id() == id)
    }

    /// Append `item` to the children of `parent`, creating the child list if
    /// needed. A submenu item also gets its own empty child list.
    ///
    /// Ids are not checked for duplicates.
    pub fn add_menu_item(&mut self, parent: &SubMenuItem, item: MenuItem) {
        if let Some(sub) = item.as_sub_menu() {
            if self.entry(sub.id()).is_none() {
                self.sub_menus.push(SubMenuEntry::new(sub.clone()));
            }
        }

        match self.entry_mut(parent.id()) {
            Some(entry) => entry.children.push(item),
            None => {
                let mut entry = SubMenuEntry::new(parent.clone());
                entry.children.push(item);
                self.sub_menus.push(entry);
            }
        }
    }

    /// Replace the child of `parent_id` that has the same id as `item`, or
    /// append `item` when there is none. Unknown parents are ignored.
    pub fn add_or_update_item(&mut self, parent_id: i32, item: MenuItem) {
        let Some(parent) = self.get_sub_menu_by_id(parent_id).cloned() else {
            debug!(parent_id, item_id = item.id(), "add_or_update_item: no such submenu");
            return;
        };

        let exists = self
            .get_menu_items(&parent)
            .is_some_and(|items| items.iter().any(|child| child.id() == item.id()));

        if exists {
            self.replace_menu_by_id(item, Some(&parent));
        } else {
            self.add_menu_item(&parent, item);
        }
    }

    pub fn get_sub_menu_by_id(&self, id: i32) -> Option<&SubMenuItem> {
        self.entry(id).and_then(SubMenuEntry::sub_menu)
    }

    /// Any item known to the tree, including submenus and the root.
    pub fn get_menu_by_id(&self, id: i32) -> Option<&MenuItem> {
        if let Some(entry) = self.entry(id) {
            return Some(&entry.menu);
        }
        self.sub_menus
            .iter()
            .flat_map(|entry| entry.children.iter())
            .find(|child| child.id() == id)
    }

    /// Swap the item with `new_item.id()` for `new_item`, keeping its position.
    ///
    /// The parent is searched for when not given. Existing state moves to the
    /// new item with its value preserved, and a submenu keeps its children.
    /// A leaf that becomes a submenu gets an empty child list; a submenu that
    /// becomes a leaf loses its list and its children are detached, as with
    /// [`MenuTree::remove_menu_item`].
    pub fn replace_menu_by_id(&mut self, new_item: MenuItem, parent: Option<&SubMenuItem>) {
        let id = new_item.id();
        let parent_id = match parent {
            Some(parent) => parent.id(),
            None => match self.find_parent(&new_item) {
                Some(parent) => parent.id(),
                None => return,
            },
        };

        let Some(entry) = self.entry_mut(parent_id) else {
            return;
        };
        let Some(idx) = entry.children.iter().position(|child| child.id() == id) else {
            return;
        };
        entry.children[idx] = new_item.clone();

        match new_item.as_sub_menu() {
            Some(sub) => match self.entry_mut(id) {
                Some(own) => own.menu = new_item.clone(),
                None => self.sub_menus.push(SubMenuEntry::new(sub.clone())),
            },
            None => {
                if let Some(pos) = self.sub_menus.iter().position(|entry| entry.id() == id) {
                    let old = self.sub_menus.remove(pos);
                    if !old.children.is_empty() {
                        warn!(
                            item_id = id,
                            detached = old.children.len(),
                            "submenu replaced by a leaf item, children detached"
                        );
                    }
                }
            }
        }

        if let Some(old) = self.states.remove(&id) {
            let migrated =
                helper::state_for_menu_item(&new_item, old.value, old.changed, old.active);
            self.states.insert(id, migrated);
        }
    }

    /// Move `item` one place up or down within `parent`, clamped at both ends.
    pub fn move_item(&mut self, parent: &SubMenuItem, item: &MenuItem, move_type: MoveType) {
        let Some(entry) = self.entry_mut(parent.id()) else {
            return;
        };
        let Some(idx) = entry.children.iter().position(|child| child == item) else {
            return;
        };

        let moved = entry.children.remove(idx);
        let target = match move_type {
            MoveType::MoveUp => idx.saturating_sub(1),
            MoveType::MoveDown => (idx + 1).min(entry.children.len()),
        };
        entry.children.insert(target, moved);
    }

    /// The submenu whose children include an item with the same id.
    ///
    /// An id listed under more than one submenu breaks the tree's invariant;
    /// it is logged and the last match wins.
    pub fn find_parent(&self, item: &MenuItem) -> Option<&SubMenuItem> {
        let id = item.id();
        let mut matches = self
            .sub_menus
            .iter()
            .filter(|entry| entry.children.iter().any(|child| child.id() == id));

        let mut found = matches.next()?;
        let mut count = 1usize;
        for entry in matches {
            found = entry;
            count += 1;
        }
        if count > 1 {
            warn!(item_id = id, count, "item id listed under more than one submenu");
        }
        found.sub_menu()
    }

    /// Detach `item` from its parent and drop its state.
    ///
    /// A submenu loses its child list, but the children themselves and their
    /// states are left in place, unreachable from the root. Use
    /// [`MenuTree::delete_sub_tree`] to remove descendants as well.
    pub fn remove_menu_item(&mut self, item: &MenuItem, parent: Option<&SubMenuItem>) {
        let id = item.id();
        let parent_id = match parent {
            Some(parent) => Some(parent.id()),
            None => self.find_parent(item).map(SubMenuItem::id),
        };

        if let Some(entry) = parent_id.and_then(|pid| self.entry_mut(pid)) {
            entry.children.retain(|child| child.id() != id);
        }

        if item.has_children() {
            self.sub_menus.retain(|entry| entry.id() != id);
        }

        self.states.remove(&id);
    }

    /// Remove `item`, every descendant, and all of their states.
    pub fn delete_sub_tree(&mut self, item: &MenuItem, parent: Option<&SubMenuItem>) {
        let mut visited = HashSet::new();
        self.delete_descendants(item, &mut visited);
        self.remove_menu_item(item, parent);
    }

    fn delete_descendants(&mut self, item: &MenuItem, visited: &mut HashSet<i32>) {
        let Some(sub) = item.as_sub_menu() else {
            return;
        };
        if !visited.insert(sub.id()) {
            return;
        }
        let children = self
            .entry(sub.id())
            .map(|entry| entry.children.clone())
            .unwrap_or_default();

        for child in &children {
            self.delete_descendants(child, visited);
            if child.has_children() {
                self.sub_menus.retain(|entry| entry.id() != child.id());
            }
            self.states.remove(&child.id());
        }
        debug!(sub_menu = sub.id(), removed = children.len(), "deleted sub tree");
    }

    /// Every submenu that owns a child list.
    pub fn get_all_sub_menus(&self) -> Vec<&SubMenuItem> {
        self.sub_menus.iter().filter_map(SubMenuEntry::sub_menu).collect()
    }

    /// Direct children of `sub`, in order.
    pub fn get_menu_items(&self, sub: &SubMenuItem) -> Option<&[MenuItem]> {
        self.entry(sub.id()).map(|entry| entry.children.as_slice())
    }

    /// Every item known to the tree, each id once.
    pub fn get_all_menu_items(&self) -> Vec<&MenuItem> {
        let mut seen = HashSet::new();
        let mut all = Vec::new();
        for entry in &self.sub_menus {
            if seen.insert(entry.id()) {
                all.push(&entry.menu);
            }
        }
        for child in self.sub_menus.iter().flat_map(|entry| entry.children.iter()) {
            if seen.insert(child.id()) {
                all.push(child);
            }
        }
        all
    }

    /// `sub` followed by its descendants in declaration order, depth first.
    pub fn get_all_menu_items_from(&self, sub: &SubMenuItem) -> Vec<&MenuItem> {
        let Some(entry) = self.entry(sub.id()) else {
            return Vec::new();
        };
        let mut all = vec![&entry.menu];
        self.recurse_tree_iterating_on_items(sub, |item, _| all.push(item));
        all
    }

    /// Call `consumer(item, parent)` for every descendant of `root`, parents
    /// before children.
    pub fn recurse_tree_iterating_on_items<'a, F>(&'a self, root: &SubMenuItem, mut consumer: F)
    where
        F: FnMut(&'a MenuItem, &'a SubMenuItem),
    {
        let mut visited = HashSet::new();
        self.recurse(root.id(), &mut consumer, &mut visited);
    }

    fn recurse<'a, F>(&'a self, sub_id: i32, consumer: &mut F, visited: &mut HashSet<i32>)
    where
        F: FnMut(&'a MenuItem, &'a SubMenuItem),
    {
        // a submenu listed under itself would otherwise loop forever
        if !visited.insert(sub_id) {
            return;
        }
        let Some(entry) = self.entry(sub_id) else {
            return;
        };
        let Some(parent) = entry.sub_menu() else {
            return;
        };
        for child in &entry.children {
            consumer(child, parent);
            if child.has_children() {
                self.recurse(child.id(), consumer, visited);
            }
        }
    }

    /// Install or replace the state for `item`.
    pub fn change_item(&mut self, item: &MenuItem, state: MenuState) {
        self.states.insert(item.id(), state);
    }

    pub fn get_menu_state(&self, item: &MenuItem) -> Option<&MenuState> {
        self.states.get(&item.id())
    }

    pub fn get_menu_state_by_id(&self, id: i32) -> Option<&MenuState> {
        self.states.get(&id)
    }

    /// Give every item without state its default value, unchanged and inactive.
    pub fn initialize_state_for_each_item(&mut self) {
        let missing: Vec<MenuItem> = self
            .get_all_menu_items()
            .into_iter()
            .filter(|item| item.id() != ROOT_MENU_ID && !self.states.contains_key(&item.id()))
            .cloned()
            .collect();

        for item in missing {
            let state =
                helper::state_for_menu_item(&item, helper::get_default_for(&item), false, false);
            self.states.insert(item.id(), state);
        }
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{
        ActionMenuItem, AnalogMenuItem, BooleanMenuItem, EnumMenuItem, ItemInfo,
    };
    use crate::state::StateValue;

    fn analog(id: i32, name: &str) -> MenuItem {
        AnalogMenuItem {
            max_value: 100,
            offset: 0,
            divisor: 1,
            unit_name: "dB".to_string(),
            info: ItemInfo::new(id, name),
            ..AnalogMenuItem::default()
        }
        .into()
    }

    fn action(id: i32) -> MenuItem {
        ActionMenuItem {
            info: ItemInfo::new(id, format!("action{id}")),
        }
        .into()
    }

    fn sub(id: i32, name: &str) -> SubMenuItem {
        SubMenuItem::new(ItemInfo::new(id, name))
    }

    fn ids(items: &[MenuItem]) -> Vec<i32> {
        items.iter().map(MenuItem::id).collect()
    }

    #[test]
    fn add_creates_child_list_for_sub_menus() {
        let mut tree = MenuTree::new();
        let settings = sub(10, "Settings");
        tree.add_menu_item(&SubMenuItem::root(), settings.clone().into());
        tree.add_menu_item(&settings, analog(11, "Volume"));

        assert_eq!(ids(tree.get_menu_items(&SubMenuItem::root()).unwrap()), [10]);
        assert_eq!(ids(tree.get_menu_items(&settings).unwrap()), [11]);
        assert_eq!(tree.get_all_sub_menus().len(), 2);
        assert_eq!(tree.get_menu_by_id(0).unwrap().name(), "Root");
    }

    #[test]
    fn add_or_update_replaces_existing_child() {
        let mut tree = MenuTree::new();
        tree.add_or_update_item(ROOT_MENU_ID, analog(1, "Volume"));
        tree.add_or_update_item(ROOT_MENU_ID, action(2));
        tree.add_or_update_item(ROOT_MENU_ID, analog(1, "Renamed"));

        let root = tree.get_menu_items(&SubMenuItem::root()).unwrap();
        assert_eq!(ids(root), [1, 2]);
        assert_eq!(root[0].name(), "Renamed");
    }

    #[test]
    fn add_or_update_ignores_unknown_parent() {
        let mut tree = MenuTree::new();
        tree.add_or_update_item(77, analog(1, "Volume"));
        assert!(tree.get_menu_by_id(1).is_none());
    }

    #[test]
    fn replace_keeps_position_and_state() {
        let mut tree = MenuTree::new();
        let root = SubMenuItem::root();
        tree.add_menu_item(&root, action(1));
        tree.add_menu_item(&root, analog(2, "Volume"));
        tree.add_menu_item(&root, action(3));
        tree.change_item(
            &analog(2, "Volume"),
            MenuState::new(2, StateValue::Integer(42), true, false),
        );

        let replacement = analog(2, "Gain");
        tree.replace_menu_by_id(replacement.clone(), None);

        assert_eq!(tree.get_menu_by_id(2), Some(&replacement));
        assert_eq!(ids(tree.get_menu_items(&root).unwrap()), [1, 2, 3]);
        let state = tree.get_menu_state(&replacement).unwrap();
        assert_eq!(state.value, StateValue::Integer(42));
        assert!(state.changed);
    }

    #[test]
    fn replace_sub_menu_keeps_children() {
        let mut tree = MenuTree::new();
        let settings = sub(5, "Settings");
        tree.add_menu_item(&SubMenuItem::root(), settings.clone().into());
        tree.add_menu_item(&settings, action(6));

        let renamed = sub(5, "Options");
        tree.replace_menu_by_id(renamed.clone().into(), None);

        assert_eq!(tree.get_sub_menu_by_id(5), Some(&renamed));
        assert_eq!(ids(tree.get_menu_items(&renamed).unwrap()), [6]);
    }

    #[test]
    fn replace_sub_menu_with_leaf_drops_child_list() {
        let mut tree = MenuTree::new();
        let settings = sub(5, "Settings");
        tree.add_menu_item(&SubMenuItem::root(), settings.clone().into());
        tree.add_menu_item(&settings, action(6));

        let go: MenuItem = ActionMenuItem {
            info: ItemInfo::new(5, "Go"),
        }
        .into();
        tree.replace_menu_by_id(go.clone(), None);

        assert_eq!(tree.get_menu_by_id(5), Some(&go));
        assert!(tree.get_sub_menu_by_id(5).is_none());
        assert_eq!(tree.get_all_sub_menus().len(), 1);
        assert_eq!(ids(tree.get_menu_items(&SubMenuItem::root()).unwrap()), [5]);
    }

    #[test]
    fn replace_leaf_with_sub_menu_creates_child_list() {
        let mut tree = MenuTree::new();
        tree.add_menu_item(&SubMenuItem::root(), action(7));

        let extras = sub(7, "Extras");
        tree.replace_menu_by_id(extras.clone().into(), None);

        assert_eq!(tree.get_sub_menu_by_id(7), Some(&extras));
        assert_eq!(tree.get_menu_items(&extras), Some(&[][..]));
        tree.add_menu_item(&extras, action(8));
        assert_eq!(ids(tree.get_menu_items(&extras).unwrap()), [8]);
    }

    #[test]
    fn move_item_clamps_at_ends() {
        let mut tree = MenuTree::new();
        let root = SubMenuItem::root();
        let (one, two, three) = (action(1), action(2), action(3));
        tree.add_menu_item(&root, three.clone());
        tree.add_menu_item(&root, one.clone());
        tree.add_menu_item(&root, two.clone());
        let order = |tree: &MenuTree| ids(tree.get_menu_items(&root).unwrap());

        tree.move_item(&root, &two, MoveType::MoveUp);
        assert_eq!(order(&tree), [3, 2, 1]);

        tree.move_item(&root, &three, MoveType::MoveDown);
        assert_eq!(order(&tree), [2, 3, 1]);

        tree.move_item(&root, &one, MoveType::MoveDown);
        assert_eq!(order(&tree), [2, 3, 1]);

        tree.move_item(&root, &two, MoveType::MoveUp);
        assert_eq!(order(&tree), [2, 3, 1]);

        tree.move_item(&root, &one, MoveType::MoveUp);
        assert_eq!(order(&tree), [2, 1, 3]);
    }

    #[test]
    fn move_of_missing_item_is_a_no_op() {
        let mut tree = MenuTree::new();
        let root = SubMenuItem::root();
        tree.add_menu_item(&root, action(1));
        tree.move_item(&root, &action(9), MoveType::MoveUp);
        tree.move_item(&sub(44, "nowhere"), &action(1), MoveType::MoveDown);
        assert_eq!(ids(tree.get_menu_items(&root).unwrap()), [1]);
    }

    #[test]
    fn find_parent_uses_id_only() {
        let mut tree = MenuTree::new();
        let settings = sub(5, "Settings");
        tree.add_menu_item(&SubMenuItem::root(), settings.clone().into());
        tree.add_menu_item(&settings, analog(6, "Volume"));

        let parent = tree.find_parent(&analog(6, "Other name")).unwrap();
        assert_eq!(parent.id(), 5);
        assert!(tree.find_parent(&action(99)).is_none());
    }

    #[test]
    fn find_parent_returns_last_match_when_ambiguous() {
        let mut tree = MenuTree::new();
        let first = sub(5, "First");
        let second = sub(6, "Second");
        tree.add_menu_item(&SubMenuItem::root(), first.clone().into());
        tree.add_menu_item(&SubMenuItem::root(), second.clone().into());
        tree.add_menu_item(&first, action(7));
        tree.add_menu_item(&second, action(7));

        assert_eq!(tree.find_parent(&action(7)).unwrap().id(), 6);
    }

    #[test]
    fn remove_drops_state_and_child_list() {
        let mut tree = MenuTree::new();
        let settings = sub(5, "Settings");
        let volume = analog(6, "Volume");
        tree.add_menu_item(&SubMenuItem::root(), settings.clone().into());
        tree.add_menu_item(&settings, volume.clone());
        tree.initialize_state_for_each_item();

        tree.remove_menu_item(&volume, None);
        assert!(tree.get_menu_state(&volume).is_none());
        assert!(tree.get_menu_items(&settings).unwrap().is_empty());

        tree.add_menu_item(&settings, volume.clone());
        tree.change_item(&volume, MenuState::new(6, StateValue::Integer(3), false, false));
        tree.remove_menu_item(&settings.clone().into(), None);

        assert!(tree.get_sub_menu_by_id(5).is_none());
        assert!(tree.get_menu_items(&SubMenuItem::root()).unwrap().is_empty());
        // detached children keep their state
        assert!(tree.get_menu_state(&volume).is_some());
    }

    #[test]
    fn delete_sub_tree_removes_descendants() {
        let mut tree = MenuTree::new();
        let outer = sub(5, "Outer");
        let inner = sub(6, "Inner");
        tree.add_menu_item(&SubMenuItem::root(), outer.clone().into());
        tree.add_menu_item(&outer, inner.clone().into());
        tree.add_menu_item(&inner, analog(7, "Deep"));
        tree.add_menu_item(&outer, action(8));
        tree.initialize_state_for_each_item();

        tree.delete_sub_tree(&outer.into(), None);

        assert_eq!(tree.get_all_sub_menus().len(), 1);
        assert!(tree.get_menu_state_by_id(7).is_none());
        assert!(tree.get_menu_state_by_id(8).is_none());
        assert!(tree.get_menu_state_by_id(6).is_none());
    }

    #[test]
    fn traversal_is_pre_order() {
        let mut tree = MenuTree::new();
        let root = SubMenuItem::root();
        let settings = sub(2, "Settings");
        tree.add_menu_item(&root, action(1));
        tree.add_menu_item(&root, settings.clone().into());
        tree.add_menu_item(&settings, action(3));
        tree.add_menu_item(&root, action(4));

        let order: Vec<i32> = tree
            .get_all_menu_items_from(&root)
            .into_iter()
            .map(MenuItem::id)
            .collect();
        assert_eq!(order, [0, 1, 2, 3, 4]);

        let mut parents = Vec::new();
        tree.recurse_tree_iterating_on_items(&root, |item, parent| {
            parents.push((item.id(), parent.id()));
        });
        assert_eq!(parents, [(1, 0), (2, 0), (3, 2), (4, 0)]);
        assert_eq!(tree.get_all_menu_items().len(), 5);
    }

    #[test]
    fn traversal_survives_self_listed_sub_menu() {
        let mut tree = MenuTree::new();
        let looped = sub(2, "Loop");
        tree.add_menu_item(&SubMenuItem::root(), looped.clone().into());
        tree.add_menu_item(&looped, looped.clone().into());

        let all = tree.get_all_menu_items_from(&SubMenuItem::root());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn initialize_state_uses_defaults() {
        let mut tree = MenuTree::new();
        let root = SubMenuItem::root();
        let flag: MenuItem = BooleanMenuItem {
            info: ItemInfo::new(1, "Flag"),
            ..BooleanMenuItem::default()
        }
        .into();
        let choice: MenuItem = EnumMenuItem {
            enum_entries: vec!["a".into(), "b".into()],
            info: ItemInfo::new(2, "Choice"),
        }
        .into();
        tree.add_menu_item(&root, flag.clone());
        tree.add_menu_item(&root, choice.clone());
        tree.change_item(&choice, MenuState::new(2, StateValue::Integer(1), true, true));

        tree.initialize_state_for_each_item();

        let flag_state = tree.get_menu_state(&flag).unwrap();
        assert_eq!(flag_state.value, StateValue::Boolean(false));
        assert!(!flag_state.changed);
        assert!(!flag_state.active);
        assert_eq!(tree.get_menu_state(&choice).unwrap().value, StateValue::Integer(1));
    }
}
