use super::table::RawTable;

/// Strategy pattern pre načítanie tabuľky ground truth alebo predikcií
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta tabuľku zo stringu
    fn load_from_string(&self, data: &str) -> Result<RawTable, String>;

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> Result<(), String>;
}
