pub mod chapter;
pub mod comic;
pub mod data_info;
