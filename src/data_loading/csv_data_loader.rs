use super::data_loader::DataLoader;
use super::table::{cell, RawTable};
use csv::ReaderBuilder;

/// CSV Data Loader - štruktúrovaná stratégia s hlavičkou
///
/// Zachováva názvy stĺpcov; kratšie riadky doplní prázdnymi bunkami,
/// dlhší riadok je chyba.
pub struct CsvDataLoader;

impl CsvDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Helper pre parsovanie CSV
    fn parse_csv(&self, csv_text: &str) -> Result<RawTable, String> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| format!("Chyba pri čítaní CSV hlavičiek: {}", e))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err("CSV nemá žiadne stĺpce".to_string());
        }

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| format!("Chyba pri čítaní riadku {}: {}", idx + 1, e))?;
            if record.len() > headers.len() {
                return Err(format!(
                    "Riadok {} má {} stĺpcov, očakávaných {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                ));
            }
            let mut row: Vec<_> = record.iter().map(cell).collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load_from_string(&self, data: &str) -> Result<RawTable, String> {
        self.validate_format(data)?;
        self.parse_csv(data)
    }

    fn validate_format(&self, data: &str) -> Result<(), String> {
        if data.trim().is_empty() {
            return Err("CSV dáta sú prázdne".to_string());
        }
        Ok(())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
