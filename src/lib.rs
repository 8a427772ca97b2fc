//! Runtime assumptions that cost one boolean read while disabled.
//!
//! ```rust
//! use assume::AssumeError;
//!
//! // disabled by default: the condition is never evaluated
//! let mut evaluated = false;
//! assume::assume!({
//!     evaluated = true;
//!     false
//! })
//! .unwrap();
//! assert!(!evaluated);
//!
//! assume::enable();
//! assert!(matches!(assume::assume!(1 == 2), Err(AssumeError::Failed(_))));
//!
//! assume::set_handler(|_result, _site| Ok(()));
//! assume::assume!(1 == 2).unwrap();
//! assume::clear_handler();
//! assume::disable();
//! ```

use std::sync::Arc;

pub mod assumptions;
pub mod diagnostic;
pub mod error;
pub mod gate;
pub mod handler;
pub mod thunk;

pub use assumptions::Assumptions;
pub use diagnostic::DiagnosticHandler;
pub use error::{AssumeError, AssumptionFailed};
pub use handler::{Handler, HandlerFn};
pub use thunk::{Outcome, Site, Thunk, Truthy};

static GLOBAL: Assumptions = Assumptions::new();

/// The process-wide instance behind the free functions and macros
#[must_use]
pub fn global() -> &'static Assumptions {
    &GLOBAL
}

pub fn set_enabled(flag: bool) {
    GLOBAL.set_enabled(flag);
}
pub fn enable() {
    GLOBAL.set_enabled(true);
}
pub fn disable() {
    GLOBAL.set_enabled(false);
}
#[must_use]
pub fn is_enabled() -> bool {
    GLOBAL.is_enabled()
}

pub fn set_handler<F>(handler: F)
where
    F: Fn(&dyn Outcome, &Site) -> Result<(), AssumeError> + Send + Sync + 'static,
{
    GLOBAL.set_handler(handler);
}
/// Fails with [`AssumeError::InvalidHandler`] unless `value` is callable
///
/// See [`handler::HandlerRegistry::set_value`].
pub fn set_handler_value(value: Box<dyn core::any::Any + Send + Sync>) -> Result<(), AssumeError> {
    GLOBAL.handlers().set_value(value)
}
pub fn clear_handler() {
    GLOBAL.handlers().clear();
}
#[must_use]
pub fn handler() -> Arc<dyn Handler> {
    GLOBAL.handler()
}

pub fn assume<F, R>(thunk: impl Into<Option<Thunk<F>>>) -> Result<(), AssumeError>
where
    F: FnOnce() -> R,
    R: Outcome,
{
    GLOBAL.assume(thunk)
}
pub fn assumption<F, R>(thunk: impl Into<Option<Thunk<F>>>) -> Result<(), AssumeError>
where
    F: FnOnce() -> R,
    R: Outcome,
{
    GLOBAL.assumption(thunk)
}

/// Builds a [`Thunk`] recording the call site, the condition's text and the
/// calling crate's manifest directory
#[macro_export]
macro_rules! thunk {
    ($cond:expr $(,)?) => {
        $crate::Thunk::new(|| $cond)
            .with_expr(::core::stringify!($cond))
            .with_root(::core::option_env!("CARGO_MANIFEST_DIR"))
    };
}

/// Checks a condition against the process-wide instance
///
/// Without a condition this yields [`AssumeError::MissingCondition`].
#[macro_export]
macro_rules! assume {
    () => {
        $crate::assume(::core::option::Option::None::<$crate::Thunk<fn() -> bool>>)
    };
    ($cond:expr $(,)?) => {
        $crate::assume($crate::thunk!($cond))
    };
}

#[macro_export]
macro_rules! assumption {
    () => {
        $crate::assumption(::core::option::Option::None::<$crate::Thunk<fn() -> bool>>)
    };
    ($cond:expr $(,)?) => {
        $crate::assumption($crate::thunk!($cond))
    };
}
