pub mod dump;
pub mod excel;

pub use dump::write_catalog_dump;
pub use excel::{result_path, write_results};
