use serde::{Deserialize, Serialize};

/// A selectable entry in the frequency or voltage dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: f64,
}

/// Build the option list for a predefined table.
///
/// Entries keep the table order; the one matching `factory_default` is marked
/// "(default)". A "(custom)" entry is appended when `current` is not in the table.
pub fn assemble_dropdown_options(
    predefined: &[u32],
    factory_default: f64,
    current: f64,
) -> Vec<DropdownOption> {
    let mut options: Vec<DropdownOption> = predefined
        .iter()
        .map(|&value| {
            let value = f64::from(value);
            let label = if value == factory_default {
                format!("{value} (default)")
            } else {
                format!("{value}")
            };
            DropdownOption { label, value }
        })
        .collect();

    if !options.iter().any(|option| option.value == current) {
        options.push(DropdownOption {
            label: format!("{current} (custom)"),
            value: current,
        });
    }

    options
}
