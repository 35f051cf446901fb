use boundary_core::typed_step;
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::errors::RescuetimeError;

/// Endpoint de datos analíticos.
pub const RESCUETIME_DATA_URL: &str = "https://www.rescuetime.com/anapi/data";

// Caracteres que no pueden ir crudos en el valor de un parámetro de query.
const QUERY_VALUE: &AsciiSet = &CONTROLS.add(b' ')
                                        .add(b'"')
                                        .add(b'#')
                                        .add(b'%')
                                        .add(b'&')
                                        .add(b'+')
                                        .add(b'<')
                                        .add(b'=')
                                        .add(b'>')
                                        .add(b'?')
                                        .add(b'`')
                                        .add(b'{')
                                        .add(b'}');

typed_step! {
    /// Construye la URL del día pedido (perspectiva por ranking de actividades).
    pub step BuildUrl {
        name: "build_url",
        input: NaiveDate,
        output: String,
        fields { api_key: String },
        transform(me, day) {
            let key = me.api_key.trim();
            if key.is_empty() {
                return Err(RescuetimeError::MissingApiKey.into());
            }
            let key = utf8_percent_encode(key, QUERY_VALUE);
            let day = day.format("%Y-%m-%d");
            Ok(format!("{RESCUETIME_DATA_URL}?key={key}&perspective=rank&restrict_kind=activity&restrict_begin={day}&restrict_end={day}&format=json"))
        }
    }
}
