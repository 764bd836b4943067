pub mod table; // Tabuľka v pamäti
pub mod data_loader; // Strategy trait
pub mod csv_data_loader; // Štruktúrovaná stratégia
pub mod positional_loader; // Pozičný fallback
pub mod factory; // Factory a dvojstupňové načítanie

pub use table::{Cell, RawTable};
pub use data_loader::DataLoader;
pub use csv_data_loader::CsvDataLoader;
pub use positional_loader::PositionalLoader;
pub use factory::{DataLoaderFactory, TableRole};
