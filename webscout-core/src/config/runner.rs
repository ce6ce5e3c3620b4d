//! Tool-runner executable resolution.
//!
//! Runner shims ship as `npx.cmd` on Windows and as a bare `npx` elsewhere,
//! so Windows lookups try the `.cmd` variant first.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Names to try, in order, for the executable `name`.
    pub fn candidates(self, name: &str) -> Vec<String> {
        match self {
            Platform::Windows if !has_extension(name) => {
                vec![format!("{name}.cmd"), name.to_string()]
            }
            _ => vec![name.to_string()],
        }
    }
}

fn has_extension(name: &str) -> bool {
    Path::new(name).extension().is_some()
}

/// Resolves an executable name to a path on the host.
pub trait ExecutableLookup {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// Searches `PATH` the way the shell would.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLookup;

impl ExecutableLookup for PathLookup {
    fn find(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

impl<F> ExecutableLookup for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn find(&self, name: &str) -> Option<PathBuf> {
        self(name)
    }
}

pub fn resolve_executable(
    name: &str,
    platform: Platform,
    lookup: &impl ExecutableLookup,
) -> Option<PathBuf> {
    platform
        .candidates(name)
        .iter()
        .find_map(|candidate| lookup.find(candidate))
}
