pub mod images;
pub mod tables;
pub mod titles;

pub use images::{extract_images, TitledImage};
pub use tables::{extract_tables, TitledTable};
pub use titles::clean_title;
