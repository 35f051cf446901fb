//! boundary-adapters: steps concretos sobre el núcleo.
//!
//! Este crate provee:
//! - La secuencia de ejemplo `parse_date -> build_url -> fetch -> parse_rows`
//!   contra la API de datos de Rescuetime.
//! - El contrato `Fetcher` (el único punto de IO externo) y fetchers
//!   en memoria / desde archivo.
//! - El registry estándar de outcomes y un catálogo de mensajes (`en`, `es`)
//!   que traduce cada código para el usuario final.
//!
//! Nota: el núcleo sólo ve JSON y nombres de steps. Los tipos de aquí
//! (`ActivityRow`, fechas) cruzan la frontera serializados.

pub mod errors;
pub mod fetcher;
pub mod presentation;
pub mod registry;
pub mod steps;

pub use errors::{FetchError, RescuetimeError};
pub use fetcher::{CannedFetcher, Fetcher, FileFetcher};
pub use presentation::{Lang, MessageCatalog, UnsupportedLang};
pub use registry::{outcomes, rescuetime_async_boundary, rescuetime_boundary, rescuetime_pipeline, rescuetime_registry};
pub use steps::{ActivityRow, BuildUrl, Fetch, ParseDate, ParseRows};
