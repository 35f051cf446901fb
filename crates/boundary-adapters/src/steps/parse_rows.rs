//! ParseRows: respuesta JSON -> filas tipadas.
//!
//! Formato esperado (perspectiva `rank`): cada fila es un arreglo
//! `[rank, seconds, people, activity, category, productivity]`.

use boundary_core::typed_step;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RescuetimeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub rank: u32,
    pub time_spent_seconds: u64,
    pub people: u32,
    pub activity: String,
    pub category: Option<String>,
    pub productivity: i8,
}

#[derive(Deserialize)]
struct RawRow(u32, u64, u32, String, Option<String>, i8);

impl From<RawRow> for ActivityRow {
    fn from(RawRow(rank, time_spent_seconds, people, activity, category, productivity): RawRow) -> Self {
        Self { rank,
               time_spent_seconds,
               people,
               activity,
               category,
               productivity }
    }
}

typed_step! {
    pub step ParseRows {
        name: "parse_rows",
        input: Value,
        output: Vec<ActivityRow>,
        transform(_me, response) {
            if let Some(message) = response.get("error").and_then(Value::as_str) {
                return Err(RescuetimeError::Api(message.to_string()).into());
            }
            let rows = response.get("rows").and_then(Value::as_array).ok_or(RescuetimeError::MissingRows)?;
            let mut parsed = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                let raw: RawRow = serde_json::from_value(row.clone()).map_err(|source| RescuetimeError::MalformedRow { index, source })?;
                parsed.push(ActivityRow::from(raw));
            }
            Ok(parsed)
        }
    }
}
