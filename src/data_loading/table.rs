/// Jedna bunka tabuľky; prázdna hodnota (po trim) je `None`.
pub type Cell = Option<String>;

/// Normalizuje surovú hodnotu z CSV na bunku.
pub fn cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Jednotná tabuľka v pamäti - výstup každého loadera.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index stĺpca podľa presného názvu.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Hodnoty jedného stĺpca v poradí riadkov.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).and_then(|c| c.as_deref()))
                .collect(),
        )
    }

    /// Páry (id, hodnota) pre dva pomenované stĺpce.
    pub fn pairs(&self, id_column: &str, value_column: &str) -> Option<Vec<(Cell, Cell)>> {
        let id_idx = self.column_index(id_column)?;
        let value_idx = self.column_index(value_column)?;
        Some(
            self.rows
                .iter()
                .map(|row| {
                    (
                        row.get(id_idx).cloned().flatten(),
                        row.get(value_idx).cloned().flatten(),
                    )
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::new(
            vec!["id".into(), "label".into()],
            vec![
                vec![cell("1"), cell(" a ")],
                vec![cell("2"), cell("")],
            ],
        )
    }

    #[test]
    fn cells_are_trimmed_and_empty_is_null() {
        assert_eq!(cell("  x "), Some("x".to_string()));
        assert_eq!(cell("   "), None);
    }

    #[test]
    fn column_lookup_is_exact() {
        let t = sample();
        assert!(t.has_column("label"));
        assert!(!t.has_column("Label"));
        assert_eq!(t.column("label").unwrap(), vec![Some("a"), None]);
    }

    #[test]
    fn pairs_follow_row_order() {
        let pairs = sample().pairs("id", "label").unwrap();
        assert_eq!(pairs[0], (Some("1".into()), Some("a".into())));
        assert_eq!(pairs[1], (Some("2".into()), None));
    }
}
