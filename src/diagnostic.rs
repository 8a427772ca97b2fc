use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{
    error::{AssumeError, AssumptionFailed},
    handler::Handler,
    thunk::{Outcome, Site},
};

pub const SOURCE_UNAVAILABLE: &str = "<unable to read source line>";

/// The handler in effect when none is registered
///
/// Always fails with [`AssumptionFailed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticHandler;
impl Handler for DiagnosticHandler {
    fn handle(&self, result: &dyn Outcome, site: &Site) -> Result<(), AssumeError> {
        Err(AssumptionFailed {
            file: site.file.to_owned(),
            line: site.line,
            code: source_line_or_placeholder(site),
            result: format!("{result:?}"),
        }
        .into())
    }
}

#[must_use]
pub fn source_line_or_placeholder(site: &Site) -> String {
    let Some(path) = resolve_source(site) else {
        log::debug!("source file {} not found", site.file);
        return SOURCE_UNAVAILABLE.to_owned();
    };
    match read_source_line(&path, site.line) {
        Ok(Some(code)) => code,
        Ok(None) => {
            log::debug!("{} has no line {}", path.display(), site.line);
            SOURCE_UNAVAILABLE.to_owned()
        }
        Err(e) => {
            log::debug!("failed to read {}: {e}", path.display());
            SOURCE_UNAVAILABLE.to_owned()
        }
    }
}

/// Locates `site.file`
///
/// Relative paths are tried against the current directory, then against the
/// site's root and each of its ancestors (workspace members record paths
/// relative to the workspace root), then against `CARGO_MANIFEST_DIR` of the
/// running process and its ancestors.
#[must_use]
pub fn resolve_source(site: &Site) -> Option<PathBuf> {
    let file = Path::new(site.file);
    if file.is_absolute() || file.is_file() {
        return file.is_file().then(|| file.to_path_buf());
    }
    let runtime_root = std::env::var_os("CARGO_MANIFEST_DIR");
    let roots = site
        .root
        .map(OsString::from)
        .into_iter()
        .chain(runtime_root);
    for root in roots {
        for dir in Path::new(&root).ancestors() {
            let candidate = dir.join(file);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Line numbers start at 1
pub fn read_source_line(file: &Path, line: u32) -> io::Result<Option<String>> {
    let Some(index) = (line as usize).checked_sub(1) else {
        return Ok(None);
    };
    let reader = BufReader::new(File::open(file)?);
    let Some(code) = reader.lines().nth(index) else {
        return Ok(None);
    };
    Ok(Some(code?.trim_end().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(file: &'static str, line: u32) -> Site {
        Site {
            file,
            line,
            column: 1,
            expr: None,
            root: None,
        }
    }

    /// Restores the working directory on drop
    struct CwdGuard {
        prev: PathBuf,
    }
    impl CwdGuard {
        fn enter(dir: &Path) -> Self {
            let prev = std::env::current_dir().unwrap();
            std::env::set_current_dir(dir).unwrap();
            Self { prev }
        }
    }
    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.prev);
        }
    }

    #[test]
    fn test_reads_own_source() {
        // marker: diagnostic-source-line
        let line = line!() - 1;
        let code = source_line_or_placeholder(&site(file!(), line));
        assert_eq!(code.trim(), "// marker: diagnostic-source-line");
    }

    #[test]
    fn test_reads_source_outside_package_root() {
        let line = line!() + 1;
        let thunk = crate::thunk!(line == 0);
        let site = *thunk.site();
        assert_eq!(site.root, Some(env!("CARGO_MANIFEST_DIR")));

        let _cwd = CwdGuard::enter(&std::env::temp_dir());
        let path = resolve_source(&site).unwrap();
        assert!(path.is_absolute());
        assert_eq!(
            source_line_or_placeholder(&Site { line, ..site }).trim(),
            "let thunk = crate::thunk!(line == 0);"
        );
    }

    #[test]
    fn test_resolves_from_root_ancestor() {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/src/nested");
        let site = Site {
            root: Some(root),
            ..site(file!(), 1)
        };
        let path = resolve_source(&site).unwrap();
        assert!(path.ends_with(file!()));
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(
            source_line_or_placeholder(&site("does/not/exist.rs", 1)),
            SOURCE_UNAVAILABLE
        );
        assert_eq!(source_line_or_placeholder(&site(file!(), 0)), SOURCE_UNAVAILABLE);
        assert_eq!(
            source_line_or_placeholder(&site(file!(), u32::MAX)),
            SOURCE_UNAVAILABLE
        );
    }

    #[test]
    fn test_always_fails() {
        let err = DiagnosticHandler
            .handle(&None::<u8>, &site("does/not/exist.rs", 7))
            .unwrap_err();
        let AssumeError::Failed(failed) = err else {
            panic!("unexpected error");
        };
        assert_eq!(
            failed,
            AssumptionFailed {
                file: "does/not/exist.rs".into(),
                line: 7,
                code: SOURCE_UNAVAILABLE.into(),
                result: "None".into(),
            }
        );
        assert_eq!(
            failed.to_string(),
            "assumption failed in does/not/exist.rs\nsource code (line 7):\n<unable to read source line>\nresult was: None"
        );
    }
}
