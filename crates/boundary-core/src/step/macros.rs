//! Macro utilitaria para reducir boilerplate al definir Steps tipados.
//!
//! Exportada en la raíz del crate:
//!   use boundary_core::typed_step;

/// Declara un struct y su implementación de `TypedStep`.
///
/// Formas soportadas:
/// - sin campos: `typed_step! { pub step Name { name: "x", input: A, output: B, transform(me, inp) { .. } } }`
/// - con campos: añadir `fields { key: String },` antes de `transform`; se
///   genera `Name::new(key)`.
///
/// El cuerpo de `transform` devuelve `StepResult<Output>`.
#[macro_export]
macro_rules! typed_step {
    // ---------------- Con fields ----------------
    (
        $(#[$meta:meta])*
        $vis:vis step $name:ident {
            name: $step_name:expr,
            input: $inp:ty,
            output: $out:ty,
            fields { $($fname:ident : $fty:ty),+ $(,)? },
            transform($self_ident:ident, $inp_ident:ident) $body:block
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name { $(pub $fname: $fty),+ }
        impl $name {
            pub fn new($($fname : $fty),+) -> Self { Self { $($fname),+ } }
        }
        impl $crate::step::TypedStep for $name {
            type Input = $inp;
            type Output = $out;
            const NAME: &'static str = $step_name;
            fn run_typed(&self, input: Self::Input) -> $crate::errors::StepResult<Self::Output> {
                let $self_ident = self;
                let $inp_ident: Self::Input = input;
                $body
            }
        }
    };

    // ---------------- Unit (sin fields) ----------------
    (
        $(#[$meta:meta])*
        $vis:vis step $name:ident {
            name: $step_name:expr,
            input: $inp:ty,
            output: $out:ty,
            transform($self_ident:ident, $inp_ident:ident) $body:block
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $name;
        impl $crate::step::TypedStep for $name {
            type Input = $inp;
            type Output = $out;
            const NAME: &'static str = $step_name;
            fn run_typed(&self, input: Self::Input) -> $crate::errors::StepResult<Self::Output> {
                let $self_ident = self;
                let $inp_ident: Self::Input = input;
                $body
            }
        }
    };
}
