use std::sync::Arc;

use crate::{
    error::AssumeError,
    gate::Gate,
    handler::{Handler, HandlerRegistry},
    thunk::{Outcome, Site, Thunk, Truthy},
};

/// A gate and a handler registry
///
/// The crate-level functions operate on one static instance; tests and
/// embedders can own isolated ones.
#[derive(Debug, Default)]
pub struct Assumptions {
    gate: Gate,
    handlers: HandlerRegistry,
}
impl Assumptions {
    /// Disabled, with the diagnostic handler
    #[must_use]
    pub const fn new() -> Self {
        Self::with_enabled(false)
    }
    #[must_use]
    pub const fn with_enabled(enabled: bool) -> Self {
        Self {
            gate: Gate::new(enabled),
            handlers: HandlerRegistry::new(),
        }
    }

    #[must_use]
    pub const fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn set_enabled(&self, flag: bool) {
        self.gate.set_enabled(flag);
    }
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }
    pub fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&dyn Outcome, &Site) -> Result<(), AssumeError> + Send + Sync + 'static,
    {
        self.handlers.set(handler);
    }
    #[must_use]
    pub fn handler(&self) -> Arc<dyn Handler> {
        self.handlers.get()
    }

    /// Checks a deferred condition
    ///
    /// - `None`: [`AssumeError::MissingCondition`], whether enabled or not
    /// - disabled: `Ok(())` without running the condition
    /// - enabled and falsy: whatever the active handler returns
    pub fn assume<F, R>(&self, thunk: impl Into<Option<Thunk<F>>>) -> Result<(), AssumeError>
    where
        F: FnOnce() -> R,
        R: Outcome,
    {
        let Some(thunk) = thunk.into() else {
            return Err(AssumeError::MissingCondition);
        };
        if !self.gate.is_enabled() {
            return Ok(());
        }
        let (result, site) = thunk.evaluate();
        if result.is_truthy() {
            return Ok(());
        }
        self.handlers.get().handle(&result, &site)
    }
    /// Same as [`Self::assume`]
    pub fn assumption<F, R>(&self, thunk: impl Into<Option<Thunk<F>>>) -> Result<(), AssumeError>
    where
        F: FnOnce() -> R,
        R: Outcome,
    {
        self.assume(thunk)
    }
}
