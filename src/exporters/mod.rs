mod csv;

pub use csv::{export_brand_rollup_csv, export_style_table_csv};
