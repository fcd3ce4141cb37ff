//! Checkbox list of the variables named in the header row.

use dioxus::prelude::*;

use dino_core::Variable;

#[derive(Clone, PartialEq)]
pub struct VariableItem {
    pub variable: Variable,
    pub checked: bool,
    pub pending: bool,
}

#[derive(Props, Clone, PartialEq)]
pub struct VariableListProps {
    pub items: Vec<VariableItem>,
    /// Bumped by the owner to rebuild the checkboxes after a refused toggle.
    #[props(default)]
    pub epoch: u64,
    pub on_toggle: EventHandler<(Variable, bool)>,
}

#[component]
pub fn VariableList(props: VariableListProps) -> Element {
    if props.items.is_empty() {
        return rsx! {
            p { class: "hint", "No variables found. Enter column names in the first row." }
        };
    }

    rsx! {
        ul { class: "variable-list",
            for item in props.items.iter() {
                li {
                    key: "{props.epoch}-{item.variable.index}",
                    class: if item.pending { "variable pending" } else { "variable" },
                    label {
                        input {
                            r#type: "checkbox",
                            "data-index": "{item.variable.index}",
                            checked: item.checked,
                            disabled: item.pending,
                            onchange: {
                                let variable = item.variable.clone();
                                move |e: Event<FormData>| props.on_toggle.call((variable.clone(), e.checked()))
                            },
                        }
                        " {item.variable.name}"
                    }
                }
            }
        }
    }
}
