pub mod date;
pub mod header;
pub mod season;
pub mod text;
