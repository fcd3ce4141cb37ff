//! Header row to checkable variable list.

/// A named data column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Column index in the grid; blank headers are skipped, not renumbered.
    pub index: usize,
    /// Header text with surrounding whitespace removed.
    pub name: String,
}

/// One entry per non-blank header, in column order.
pub fn build_variable_list<S: AsRef<str>>(headers: &[S]) -> Vec<Variable> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            let name = header.as_ref().trim();
            (!name.is_empty()).then(|| Variable {
                index,
                name: name.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_headers_and_keeps_indices() {
        let list = build_variable_list(&["age", "", "  ", " sex ", "weight"]);
        assert_eq!(
            list,
            vec![
                Variable { index: 0, name: "age".into() },
                Variable { index: 3, name: "sex".into() },
                Variable { index: 4, name: "weight".into() },
            ]
        );
    }

    #[test]
    fn all_blank_yields_empty_list() {
        assert!(build_variable_list(&["", " ", "\t"]).is_empty());
    }
}
