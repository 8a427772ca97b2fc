use core::{fmt, panic::Location};

/// Boolean-context interpretation of a condition's result
///
/// Only `false`, `None` and `Err(_)` are falsy. Wrapped values are not
/// inspected: `Some(false)` and `Ok(false)` are truthy.
pub trait Truthy {
    #[must_use]
    fn is_truthy(&self) -> bool;
}
impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}
impl Truthy for () {
    fn is_truthy(&self) -> bool {
        true
    }
}
impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}
impl<T, E> Truthy for Result<T, E> {
    fn is_truthy(&self) -> bool {
        self.is_ok()
    }
}
impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        T::is_truthy(self)
    }
}
impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        T::is_truthy(self)
    }
}

/// A condition result a handler can both test and render
pub trait Outcome: Truthy + fmt::Debug {}
impl<T: Truthy + fmt::Debug + ?Sized> Outcome for T {}

/// Where a condition was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// The condition's source text, when captured by a macro
    pub expr: Option<&'static str>,
    /// Manifest directory of the crate that wrote the condition, when
    /// captured by a macro; `file` is relative to it or to an ancestor
    pub root: Option<&'static str>,
}
impl Site {
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            expr: None,
            root: None,
        }
    }
}
impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)?;
        if let Some(expr) = self.expr {
            write!(f, " `{expr}`")?;
        }
        Ok(())
    }
}

/// A deferred condition paired with its [`Site`]
///
/// The condition runs at most once, and only while the gate is enabled.
pub struct Thunk<F> {
    condition: F,
    site: Site,
}
impl<F> Thunk<F> {
    /// Captures the caller's location
    #[must_use]
    #[track_caller]
    pub fn new(condition: F) -> Self {
        Self {
            condition,
            site: Site::caller(),
        }
    }
    #[must_use]
    pub const fn with_site(condition: F, site: Site) -> Self {
        Self { condition, site }
    }
    #[must_use]
    pub fn with_expr(mut self, expr: &'static str) -> Self {
        self.site.expr = Some(expr);
        self
    }
    #[must_use]
    pub fn with_root(mut self, root: Option<&'static str>) -> Self {
        self.site.root = root;
        self
    }

    #[must_use]
    pub const fn site(&self) -> &Site {
        &self.site
    }
    pub fn evaluate<R>(self) -> (R, Site)
    where
        F: FnOnce() -> R,
    {
        let result = (self.condition)();
        (result, self.site)
    }
}
impl<F> fmt::Debug for Thunk<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk").field("site", &self.site).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(true.is_truthy());
        assert!(!false.is_truthy());
        assert!(Some(0).is_truthy());
        assert!(!None::<u8>.is_truthy());
        assert!(Ok::<_, ()>(0).is_truthy());
        assert!(!Err::<(), _>("no").is_truthy());
        assert!(().is_truthy());
        assert!(!(&&false).is_truthy());
        assert!(Box::new(true).is_truthy());
        assert!(Some(false).is_truthy());
        assert!(Ok::<_, ()>(false).is_truthy());
    }

    #[test]
    fn test_captures_caller() {
        let line = line!() + 1;
        let thunk = Thunk::new(|| true);
        assert_eq!(thunk.site().file, file!());
        assert_eq!(thunk.site().line, line);
        assert_eq!(thunk.site().expr, None);
        assert_eq!(thunk.site().root, None);
    }

    #[test]
    fn test_evaluate_once() {
        let mut calls = 0;
        let thunk = Thunk::new(|| {
            calls += 1;
            calls
        })
        .with_expr("calls")
        .with_root(Some("/work/crate"));
        let (result, site) = thunk.evaluate();
        assert_eq!(result, 1);
        assert_eq!(calls, 1);
        assert_eq!(site.expr, Some("calls"));
        assert_eq!(site.root, Some("/work/crate"));
    }

    #[test]
    fn test_display() {
        let site = Site {
            file: "src/main.rs",
            line: 3,
            column: 5,
            expr: Some("a < b"),
            root: None,
        };
        assert_eq!(site.to_string(), "src/main.rs:3:5 `a < b`");
    }
}
