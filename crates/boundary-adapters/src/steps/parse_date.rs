//! ParseDate: `"YYYY-MM-DD"` -> fecha.

use boundary_core::typed_step;
use chrono::NaiveDate;

typed_step! {
    /// Valida el día pedido. Un string que no es fecha falla aquí y no llega
    /// a construir la URL.
    pub step ParseDate {
        name: "parse_date",
        input: String,
        output: NaiveDate,
        transform(_me, raw) {
            Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_core::Step;
    use serde_json::json;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(ParseDate.transform(&json!(" 2024-02-29 ")).unwrap(), json!("2024-02-29"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(ParseDate.transform(&json!("not-a-date")).is_err());
        assert!(ParseDate.transform(&json!("2023-02-29")).is_err());
        assert!(ParseDate.transform(&json!(20240101)).is_err());
    }
}
