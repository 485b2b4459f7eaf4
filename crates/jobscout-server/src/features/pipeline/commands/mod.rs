pub mod load_database;
pub mod run_scraper;

pub use run_scraper::{RunScraperCommand, RunScraperError};
