use super::data_loader::DataLoader;
use super::table::{cell, RawTable};
use csv::ReaderBuilder;
use std::collections::HashMap;

/// Názvy hodnotových stĺpcov, podľa ktorých sa prvý riadok spozná ako hlavička.
const HEADER_VALUE_NAMES: [&str; 6] = [
    "label",
    "label_pred",
    "label_score",
    "probability",
    "score",
    "prediction",
];

/// Záložná stratégia: surový dvojstĺpcový CSV súbor (id, hodnota).
///
/// Riadky s menej ako dvoma stĺpcami alebo prázdnym id sa ticho preskočia.
/// Opakované id prepíše skoršiu hodnotu, pozícia riadku ostáva pôvodná.
pub struct PositionalLoader;

impl PositionalLoader {
    pub fn new() -> Self {
        Self
    }

    /// Či prvý riadok vyzerá ako hlavička `id,<hodnotový stĺpec>`.
    pub fn looks_like_header(row: &[&str]) -> bool {
        let Some(first) = row.first() else {
            return false;
        };
        if first.trim().to_lowercase() != "id" {
            return false;
        }
        match row.get(1) {
            None => true,
            Some(second) => HEADER_VALUE_NAMES.contains(&second.trim().to_lowercase().as_str()),
        }
    }
}

impl DataLoader for PositionalLoader {
    fn get_name(&self) -> &str {
        "Positional Two-Column Loader"
    }

    fn load_from_string(&self, data: &str) -> Result<RawTable, String> {
        self.validate_format(data)?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());

        let mut rows: Vec<Vec<_>> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut header_checked = false;
        let mut skipped = 0usize;

        for record in rdr.records() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    log::debug!("positional loader: unreadable row skipped ({})", e);
                    skipped += 1;
                    continue;
                }
            };
            if record.len() < 2 {
                skipped += 1;
                continue;
            }
            if !header_checked {
                header_checked = true;
                let fields: Vec<&str> = record.iter().collect();
                if Self::looks_like_header(&fields) {
                    continue;
                }
            }

            let Some(id) = cell(&record[0]) else {
                skipped += 1;
                continue;
            };
            let value = cell(&record[1]);

            match positions.get(&id) {
                Some(&pos) => rows[pos][1] = value,
                None => {
                    positions.insert(id.clone(), rows.len());
                    rows.push(vec![Some(id), value]);
                }
            }
        }

        if skipped > 0 {
            log::debug!("positional loader: {} malformed rows skipped", skipped);
        }

        Ok(RawTable::new(vec!["id".to_string(), "label".to_string()], rows))
    }

    fn validate_format(&self, data: &str) -> Result<(), String> {
        if data.trim().is_empty() {
            return Err("CSV dáta sú prázdne".to_string());
        }
        Ok(())
    }
}

impl Default for PositionalLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> RawTable {
        PositionalLoader::new().load_from_string(text).unwrap()
    }

    #[test]
    fn header_detection() {
        assert!(PositionalLoader::looks_like_header(&["ID", " Probability "]));
        assert!(PositionalLoader::looks_like_header(&["id"]));
        assert!(!PositionalLoader::looks_like_header(&["id", "target"]));
        assert!(!PositionalLoader::looks_like_header(&["1", "label"]));
        assert!(!PositionalLoader::looks_like_header(&[]));
    }

    #[test]
    fn header_and_headerless_files_agree() {
        let with_header = load("id,label\n1,0\n2,1\n");
        let without_header = load("1,0\n2,1\n");
        assert_eq!(with_header, without_header);
        assert_eq!(with_header.num_rows(), 2);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let table = load("1,0\njunk\n ,1\n3,1\n");
        assert_eq!(
            table.column("id").unwrap(),
            vec![Some("1"), Some("3")]
        );
    }

    #[test]
    fn duplicate_ids_keep_last_value() {
        let table = load("a,0\nb,1\na,1\n");
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows[0], vec![Some("a".into()), Some("1".into())]);
    }

    #[test]
    fn unknown_header_is_treated_as_data() {
        let table = load("id,target\n1,0\n");
        assert_eq!(table.column("id").unwrap(), vec![Some("id"), Some("1")]);
    }
}
