use core::sync::atomic::{AtomicBool, Ordering};

/// Switch deciding whether assumptions are evaluated at all
#[derive(Debug)]
pub struct Gate {
    enabled: AtomicBool,
}
impl Gate {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn set_enabled(&self, flag: bool) {
        self.enabled.store(flag, Ordering::Relaxed);
    }
    pub fn enable(&self) {
        self.set_enabled(true);
    }
    pub fn disable(&self) {
        self.set_enabled(false);
    }
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
impl Default for Gate {
    fn default() -> Self {
        Self::new(false)
    }
}
