//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad con nombre que transforma exactamente un valor de
//! entrada en un valor de salida, o falla. Nunca maneja el fallo de otro step.
//! Este módulo define:
//! - `Step`: interfaz neutra (JSON in, JSON out) usada por el runner.
//! - `TypedStep`: interfaz de alto nivel con tipos fuertes, adaptada a `Step`.
//! - `FnStep` / `from_fn`: steps a partir de closures.
//! - `Pipeline` y `Pipe` para ensamblar secuencias validadas.

pub mod definition;
pub mod macros;
pub mod pipeline;
pub mod typed;

pub use definition::{from_fn, FnStep, Step};
pub use pipeline::{Pipe, Pipeline, SameAs};
pub use typed::TypedStep;
