use std::collections::HashMap;
use std::fs;

use tcmenu_domain::format::format_for_display;
use tcmenu_domain::{MenuTree, SubMenuItem};
use tcmenu_persist::{new_menu_tree_with_items, TCMENU_COPY_PREFIX};

use crate::cmd::TreeArgs;
use crate::exit::{io_error, persist_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_items, ItemRow, OutputFormat};

pub fn run(args: TreeArgs, format: OutputFormat) -> CliResult<i32> {
    let text = fs::read_to_string(&args.file)
        .map_err(|err| io_error(&format!("failed reading {}", args.file.display()), err))?;
    let text = text.trim();
    if !text.starts_with(TCMENU_COPY_PREFIX) {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{} does not start with {TCMENU_COPY_PREFIX}", args.file.display()),
        ));
    }

    let tree = new_menu_tree_with_items(text).map_err(|err| persist_error("load failed", err))?;
    print_items(&item_rows(&tree), format);
    Ok(SUCCESS)
}

/// Every item below the root in display order, with its formatted value.
pub fn item_rows(tree: &MenuTree) -> Vec<ItemRow> {
    let mut depths: HashMap<i32, usize> = HashMap::new();
    let mut rows = Vec::new();
    tree.recurse_tree_iterating_on_items(&SubMenuItem::root(), |item, parent| {
        let depth = depths.get(&parent.id()).map_or(0, |d| d + 1);
        if item.has_children() {
            depths.insert(item.id(), depth);
        }
        let value = tree
            .get_menu_state(item)
            .map(|state| format_for_display(item, &state.value))
            .unwrap_or_default();
        rows.push(ItemRow {
            id: item.id(),
            parent_id: parent.id(),
            depth,
            kind: item.kind_name(),
            name: item.name().to_string(),
            value,
        });
    });
    rows
}
