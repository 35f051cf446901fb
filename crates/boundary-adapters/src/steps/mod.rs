//! Steps de la secuencia de ejemplo.

mod build_url;
mod fetch;
mod parse_date;
mod parse_rows;

pub use build_url::BuildUrl;
pub use fetch::Fetch;
pub use parse_date::ParseDate;
pub use parse_rows::{ActivityRow, ParseRows};
