//! Editable data grid. Row 0 holds the variable names.

use dioxus::prelude::*;

use dino_core::Workspace;

#[derive(Props, Clone, PartialEq)]
pub struct GridViewProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn GridView(props: GridViewProps) -> Element {
    let mut workspace = props.workspace;
    let ws = workspace.read();
    let grid = &ws.grid;
    let epoch = ws.data_epoch();
    let cols = grid.col_count();

    rsx! {
        div { class: "grid-view",
            table { class: "data-grid",
                thead {
                    tr {
                        th { class: "row-number" }
                        for col in 0..cols {
                            th { key: "{col}", "{column_letter(col)}" }
                        }
                    }
                }
                tbody {
                    for (row , cells) in grid.rows().iter().enumerate() {
                        tr {
                            // Rebuilt after import or clear so no stale DOM value survives.
                            key: "{epoch}-{row}",
                            class: if row == 0 { "header-row" } else { "" },
                            td { class: "row-number", "{row + 1}" }
                            for (col , cell) in cells.iter().enumerate() {
                                td { key: "{col}",
                                    input {
                                        class: "grid-cell",
                                        value: "{cell}",
                                        onchange: move |e: Event<FormData>| {
                                            if let Err(err) = workspace.write().edit_cell(row, col, &e.value()) {
                                                tracing::warn!(error = %err, "cell edit rejected");
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "grid-actions",
                button {
                    class: "btn btn-sm",
                    onclick: move |_| workspace.write().append_row(),
                    "+ Row"
                }
                button {
                    class: "btn btn-sm",
                    onclick: move |_| workspace.write().append_column(),
                    "+ Column"
                }
            }
        }
    }
}

/// Spreadsheet column label: A..Z, AA..
fn column_letter(mut col: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::column_letter;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }
}
