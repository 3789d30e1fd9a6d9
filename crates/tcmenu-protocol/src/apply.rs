//! Applying received commands to a local copy of the device's menu.

use tcmenu_domain::helper::{apply_incremental_value_change, set_menu_state};
use tcmenu_domain::{MenuState, MenuTree, StateValue, ROOT_MENU_ID};
use tracing::{debug, warn};

use crate::command::{BootItem, BootItemMenuCommand, ChangeType, MenuChangeCommand, MenuCommand};

/// What applying a command did to the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// A boot command added or replaced an item; holds its new state.
    ItemUpdated(MenuState),
    /// A change command updated an item's state.
    StateChanged(MenuState),
    /// The command was valid but left the tree as it was.
    Unchanged,
    /// A change named an item the tree does not contain.
    UnknownItem(i32),
    /// The command does not affect the tree.
    NotApplicable,
}

/// Apply a boot or change command to `tree`.
///
/// Boot items whose parent submenu is unknown are placed under the root.
pub fn apply_command_to_tree(cmd: &MenuCommand, tree: &mut MenuTree) -> ApplyOutcome {
    match cmd {
        MenuCommand::AnalogBoot(boot) => apply_boot(boot, tree),
        MenuCommand::ActionBoot(boot) => apply_boot(boot, tree),
        MenuCommand::SubMenuBoot(boot) => apply_boot(boot, tree),
        MenuCommand::EnumBoot(boot) => apply_boot(boot, tree),
        MenuCommand::BooleanBoot(boot) => apply_boot(boot, tree),
        MenuCommand::TextBoot(boot) => apply_boot(boot, tree),
        MenuCommand::RuntimeListBoot(boot) => apply_boot(boot, tree),
        MenuCommand::ScrollChoiceBoot(boot) => apply_boot(boot, tree),
        MenuCommand::Rgb32Boot(boot) => apply_boot(boot, tree),
        MenuCommand::LargeNumberBoot(boot) => apply_boot(boot, tree),
        MenuCommand::FloatBoot(boot) => apply_boot(boot, tree),
        MenuCommand::Change(change) => apply_change(change, tree),
        _ => ApplyOutcome::NotApplicable,
    }
}

fn apply_boot<I: BootItem>(boot: &BootItemMenuCommand<I>, tree: &mut MenuTree) -> ApplyOutcome {
    let item = boot.item();
    let parent_id = if tree.get_sub_menu_by_id(boot.sub_menu_id).is_some() {
        boot.sub_menu_id
    } else {
        warn!(
            item_id = item.id(),
            parent_id = boot.sub_menu_id,
            "boot item parent unknown, adding to root"
        );
        ROOT_MENU_ID
    };
    tree.add_or_update_item(parent_id, item.clone());
    let state = boot.new_menu_state(tree.get_menu_state(&item));
    tree.change_item(&item, state.clone());
    ApplyOutcome::ItemUpdated(state)
}

fn apply_change(change: &MenuChangeCommand, tree: &mut MenuTree) -> ApplyOutcome {
    let Some(item) = tree.get_menu_by_id(change.menu_item_id).cloned() else {
        debug!(item_id = change.menu_item_id, "change for unknown item");
        return ApplyOutcome::UnknownItem(change.menu_item_id);
    };

    match change.change_type {
        ChangeType::Delta => {
            let Some(delta) = change.value.as_str().and_then(|v| v.trim().parse::<i32>().ok())
            else {
                debug!(item_id = item.id(), value = ?change.value, "delta is not an integer");
                return ApplyOutcome::Unchanged;
            };
            match apply_incremental_value_change(&item, delta, tree) {
                Some(state) => ApplyOutcome::StateChanged(state),
                None => ApplyOutcome::Unchanged,
            }
        }
        ChangeType::Absolute | ChangeType::AbsoluteList => {
            let value = StateValue::from(change.value.clone());
            set_menu_state(&item, value, tree);
            match tree.get_menu_state(&item) {
                Some(state) => ApplyOutcome::StateChanged(state.clone()),
                None => ApplyOutcome::Unchanged,
            }
        }
        ChangeType::ListStateChange => ApplyOutcome::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ChangeValue, HeartbeatMode};
    use crate::correlation::CorrelationId;
    use crate::factory::*;
    use tcmenu_domain::{
        AnalogMenuItem, ItemInfo, MenuItem, RuntimeListMenuItem, ScrollChoiceMenuItem,
        SubMenuItem,
    };

    fn analog() -> AnalogMenuItem {
        AnalogMenuItem {
            max_value: 100,
            offset: 0,
            divisor: 1,
            info: ItemInfo::new(4, "Volume"),
            ..AnalogMenuItem::default()
        }
    }

    fn booted_tree() -> MenuTree {
        let mut tree = MenuTree::new();
        let sub = SubMenuItem::new(ItemInfo::new(10, "Settings"));
        apply_command_to_tree(&new_sub_menu_boot_command(0, sub).into(), &mut tree);
        apply_command_to_tree(&new_analog_boot_command(10, analog(), 50).into(), &mut tree);
        tree
    }

    #[test]
    fn boot_places_item_under_parent() {
        let tree = booted_tree();
        let sub = tree.get_sub_menu_by_id(10).unwrap().clone();
        let children = tree.get_menu_items(&sub).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), 4);
        assert_eq!(
            tree.get_menu_state_by_id(4).map(|s| s.value.clone()),
            Some(StateValue::Integer(50))
        );
    }

    #[test]
    fn boot_with_unknown_parent_goes_to_root() {
        let mut tree = MenuTree::new();
        apply_command_to_tree(&new_analog_boot_command(99, analog(), 1).into(), &mut tree);
        let root = SubMenuItem::root();
        let children = tree.get_menu_items(&root).unwrap();
        assert!(children.iter().any(|i| i.id() == 4));
    }

    #[test]
    fn reboot_marks_changed() {
        let mut tree = booted_tree();
        let outcome =
            apply_command_to_tree(&new_analog_boot_command(10, analog(), 60).into(), &mut tree);
        let ApplyOutcome::ItemUpdated(state) = outcome else {
            panic!("expected update");
        };
        assert!(state.changed);
        assert_eq!(state.value, StateValue::Integer(60));
    }

    #[test]
    fn absolute_change_sets_value() {
        let mut tree = booted_tree();
        let cmd = new_absolute_menu_change_command(CorrelationId::EMPTY, 4, 75);
        let outcome = apply_command_to_tree(&cmd.into(), &mut tree);
        let ApplyOutcome::StateChanged(state) = outcome else {
            panic!("expected state change");
        };
        assert_eq!(state.value, StateValue::Integer(75));
        assert!(state.changed);
    }

    #[test]
    fn delta_change_steps_and_respects_range() {
        let mut tree = booted_tree();
        let step = new_delta_menu_change_command(CorrelationId::EMPTY, 4, 5);
        let outcome = apply_command_to_tree(&step.into(), &mut tree);
        assert!(matches!(
            outcome,
            ApplyOutcome::StateChanged(MenuState { value: StateValue::Integer(55), .. })
        ));

        let too_far = new_delta_menu_change_command(CorrelationId::EMPTY, 4, 100);
        assert_eq!(apply_command_to_tree(&too_far.into(), &mut tree), ApplyOutcome::Unchanged);
    }

    #[test]
    fn scroll_delta_can_reach_first_entry() {
        let mut tree = MenuTree::new();
        let scroll = ScrollChoiceMenuItem {
            num_entries: 5,
            info: ItemInfo::new(6, "Scroll"),
            ..ScrollChoiceMenuItem::default()
        };
        let value = tcmenu_domain::CurrentScrollPosition::new(1, "one");
        apply_command_to_tree(&new_scroll_choice_boot_command(0, scroll, value).into(), &mut tree);

        let back = new_delta_menu_change_command(CorrelationId::EMPTY, 6, -1);
        let outcome = apply_command_to_tree(&back.into(), &mut tree);
        let ApplyOutcome::StateChanged(state) = outcome else {
            panic!("expected state change");
        };
        assert_eq!(state.value.as_scroll().map(|p| p.position), Some(0));
    }

    #[test]
    fn list_change_replaces_rows() {
        let mut tree = MenuTree::new();
        let list = RuntimeListMenuItem {
            initial_rows: 1,
            info: ItemInfo::new(8, "List"),
        };
        apply_command_to_tree(
            &new_runtime_list_boot_command(0, list, vec!["a".into()]).into(),
            &mut tree,
        );
        let cmd = MenuChangeCommand {
            menu_item_id: 8,
            correlation_id: CorrelationId::EMPTY,
            change_type: ChangeType::AbsoluteList,
            value: ChangeValue::List(vec!["x".into(), "y".into()]),
        };
        apply_command_to_tree(&cmd.into(), &mut tree);
        let item: MenuItem = tree.get_menu_by_id(8).unwrap().clone();
        assert_eq!(
            tree.get_menu_state(&item).and_then(|s| s.value.as_list().map(<[String]>::to_vec)),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn unknown_item_and_other_commands() {
        let mut tree = booted_tree();
        let cmd = new_absolute_menu_change_command(CorrelationId::EMPTY, 999, 1);
        assert_eq!(apply_command_to_tree(&cmd.into(), &mut tree), ApplyOutcome::UnknownItem(999));

        let hb = new_heartbeat_command(1000, HeartbeatMode::Normal);
        assert_eq!(apply_command_to_tree(&hb.into(), &mut tree), ApplyOutcome::NotApplicable);
    }
}
