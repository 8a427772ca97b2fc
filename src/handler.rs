use core::any::Any;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::{
    diagnostic::DiagnosticHandler,
    error::AssumeError,
    thunk::{Outcome, Site},
};

/// Called with the falsy result of an enabled assumption
///
/// Returning `Ok(())` lets the assumption pass silently.
pub trait Handler: Send + Sync {
    fn handle(&self, result: &dyn Outcome, site: &Site) -> Result<(), AssumeError>;
}
impl<F> Handler for F
where
    F: Fn(&dyn Outcome, &Site) -> Result<(), AssumeError> + Send + Sync,
{
    fn handle(&self, result: &dyn Outcome, site: &Site) -> Result<(), AssumeError> {
        self(result, site)
    }
}

/// Plain function handler, accepted by [`HandlerRegistry::set_value`]
pub type HandlerFn = fn(&dyn Outcome, &Site) -> Result<(), AssumeError>;

static DIAGNOSTIC: LazyLock<Arc<dyn Handler>> = LazyLock::new(|| Arc::new(DiagnosticHandler));

#[derive(Default)]
pub struct HandlerRegistry {
    handler: RwLock<Option<Arc<dyn Handler>>>,
}
impl HandlerRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handler: RwLock::new(None),
        }
    }

    pub fn set<F>(&self, handler: F)
    where
        F: Fn(&dyn Outcome, &Site) -> Result<(), AssumeError> + Send + Sync + 'static,
    {
        self.replace(Some(Arc::new(handler)));
    }
    pub fn set_shared(&self, handler: Arc<dyn Handler>) {
        self.replace(Some(handler));
    }
    /// Registers a value whose callability is only known at runtime
    ///
    /// Accepts `Arc<dyn Handler>`, `Box<dyn Handler>` or [`HandlerFn`].
    /// Function items must be cast to [`HandlerFn`] first.
    pub fn set_value(&self, value: Box<dyn Any + Send + Sync>) -> Result<(), AssumeError> {
        let value = match value.downcast::<Arc<dyn Handler>>() {
            Ok(handler) => {
                self.replace(Some(*handler));
                return Ok(());
            }
            Err(value) => value,
        };
        let value = match value.downcast::<Box<dyn Handler>>() {
            Ok(handler) => {
                self.replace(Some(Arc::from(*handler)));
                return Ok(());
            }
            Err(value) => value,
        };
        let Ok(handler) = value.downcast::<HandlerFn>() else {
            return Err(AssumeError::InvalidHandler);
        };
        self.replace(Some(Arc::new(*handler)));
        Ok(())
    }
    pub fn clear(&self) {
        self.replace(None);
    }

    /// The registered handler, or [`DiagnosticHandler`] if there is none
    #[must_use]
    pub fn get(&self) -> Arc<dyn Handler> {
        let handler = self.handler.read().unwrap_or_else(PoisonError::into_inner);
        match handler.as_ref() {
            Some(handler) => Arc::clone(handler),
            None => Arc::clone(&DIAGNOSTIC),
        }
    }
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace(&self, handler: Option<Arc<dyn Handler>>) {
        let custom = handler.is_some();
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = handler;
        if custom {
            log::debug!("assumption handler replaced");
        } else {
            log::debug!("assumption handler reset to default");
        }
    }
}
impl core::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("custom", &self.is_custom())
            .finish()
    }
}
