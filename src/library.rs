//! Locating the native library and resolving its symbols.
//!
//! Symbol lookup goes through the [`SymbolSource`] trait, so the marshaling
//! layer does not care where addresses come from:
//!
//! - [`NativeLibrary`] opens a shared library with `libloading`
//! - [`SymbolTable`] maps names to addresses registered in-process, for a
//!   statically linked library or for tests
//!
//! [`Symbols`] wraps a source with a per-name cache.
//!
//! ## Library resolution
//!
//! [`LoaderConfig::from_env`] honors two variables:
//!
//! - `SHARED_LIBRARY_SUFFIX`: comma-separated list of file suffixes to try
//! - `LEXICAL_LIBRARY_PATH`: directories searched before anything else
//!
//! Candidates are tried in order: every search directory with every suffix,
//! then the platform file name through the system loader, then the working
//! directory with every suffix.

// This module needs unsafe for FFI.
#![allow(unsafe_code)]

use std::collections::HashMap;
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::Arc;

use libloading::Library;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_LIBRARY_NAME: &str = "lexical_capi";
pub const SUFFIX_ENV: &str = "SHARED_LIBRARY_SUFFIX";
pub const PATH_ENV: &str = "LEXICAL_LIBRARY_PATH";

/// Platform default shared-library suffixes, in preference order.
#[must_use]
pub fn default_suffixes() -> Vec<String> {
    let suffixes: &[&str] = if cfg!(target_os = "windows") {
        &["dll"]
    } else if cfg!(target_os = "macos") {
        &["dylib", "so"]
    } else {
        &["so"]
    };
    suffixes.iter().map(|s| (*s).to_string()).collect()
}

fn parse_suffixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_start_matches('.').to_string())
        .collect()
}

/// Where and under which names to look for the native library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub library_name: String,
    pub suffixes: Vec<String>,
    pub search_paths: Vec<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            suffixes: default_suffixes(),
            search_paths: Vec::new(),
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Reads overrides through `lookup` instead of the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        let mut config = LoaderConfig::default();
        if let Some(value) = lookup(SUFFIX_ENV) {
            let suffixes = parse_suffixes(&value.to_string_lossy());
            if !suffixes.is_empty() {
                config.suffixes = suffixes;
            }
        }
        if let Some(value) = lookup(PATH_ENV) {
            config.search_paths = std::env::split_paths(&value).collect();
        }
        config
    }

    #[must_use]
    pub fn with_library_name(mut self, name: &str) -> Self {
        self.library_name = name.to_string();
        self
    }

    #[must_use]
    pub fn with_suffixes(mut self, suffixes: &[&str]) -> Self {
        self.suffixes = suffixes.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    fn file_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for suffix in &self.suffixes {
            names.push(format!("lib{}.{}", self.library_name, suffix));
            if suffix == "dll" {
                names.push(format!("{}.{}", self.library_name, suffix));
            }
        }
        names
    }

    /// Every path [`NativeLibrary::load`] will try, in order.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let names = self.file_names();
        let mut out: Vec<PathBuf> = self
            .search_paths
            .iter()
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .collect();
        out.push(PathBuf::from(libloading::library_filename(&self.library_name)));
        out.extend(names.iter().map(|name| Path::new(".").join(name)));
        out
    }
}

/// Resolves symbol names to addresses.
pub trait SymbolSource: Send + Sync {
    /// Address of `name`, or `None` when it is not exported.
    fn address(&self, name: &str) -> Option<NonNull<c_void>>;
}

/// A shared library opened with `libloading`.
pub struct NativeLibrary {
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Opens the library at `path`.
    ///
    /// # Safety
    ///
    /// Running the library's initializers is only sound for a library that
    /// exports the lexical C API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] when the loader rejects the file.
    pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let library = Library::new(path).map_err(|e| Error::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "opened native library");
        Ok(NativeLibrary {
            path: path.to_path_buf(),
            library,
        })
    }

    /// Tries every candidate of `config` until one opens.
    ///
    /// # Safety
    ///
    /// Same as [`NativeLibrary::open`], for whichever candidate opens first.
    ///
    /// # Errors
    ///
    /// Returns the last [`Error::Load`] if some candidate existed but failed
    /// to open, otherwise [`Error::LibraryNotFound`].
    pub unsafe fn load(config: &LoaderConfig) -> Result<Self> {
        let mut searched = Vec::new();
        let mut last_error = None;
        for candidate in config.candidates() {
            let bare = candidate.components().count() == 1;
            searched.push(candidate.display().to_string());
            if !bare && !candidate.exists() {
                continue;
            }
            match Self::open(&candidate) {
                Ok(library) => return Ok(library),
                Err(err) => {
                    if !bare {
                        tracing::warn!(path = %candidate.display(), error = %err, "failed to open candidate");
                        last_error = Some(err);
                    }
                }
            }
        }
        Err(last_error.unwrap_or(Error::LibraryNotFound { searched }))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for NativeLibrary {
    fn address(&self, name: &str) -> Option<NonNull<c_void>> {
        // SAFETY: the symbol is taken as an untyped address; callers give it
        // a type at the call site.
        let symbol = unsafe { self.library.get::<*mut c_void>(name.as_bytes()) }.ok()?;
        NonNull::new(*symbol)
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("path", &self.path).finish()
    }
}

/// In-process name-to-address table.
///
/// Used for statically linked native code and for substituting native
/// functions in tests.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, usize>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function pointer, already cast to `*const ()`.
    #[must_use]
    pub fn with_function(mut self, name: &str, function: *const ()) -> Self {
        self.entries.insert(name.to_string(), function as usize);
        self
    }

    /// Registers the address of a static.
    #[must_use]
    pub fn with_static<T>(mut self, name: &str, value: &'static T) -> Self {
        self.entries
            .insert(name.to_string(), value as *const T as usize);
        self
    }

    /// Registers a capability marker or any other presence-only symbol.
    #[must_use]
    pub fn with_marker(self, name: &str) -> Self {
        static MARKER: u8 = 1;
        self.with_static(name, &MARKER)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolSource for SymbolTable {
    fn address(&self, name: &str) -> Option<NonNull<c_void>> {
        self.entries
            .get(name)
            .and_then(|&addr| NonNull::new(addr as *mut c_void))
    }
}

/// Symbol source with a per-name cache.
///
/// Addresses are stored as `usize` so the cache is `Send + Sync`.
pub struct Symbols {
    source: Arc<dyn SymbolSource>,
    cache: RwLock<HashMap<String, Option<usize>>>,
}

impl Symbols {
    #[must_use]
    pub fn new(source: Arc<dyn SymbolSource>) -> Self {
        Symbols {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Address of `name`, resolved at most once.
    #[must_use]
    pub fn address(&self, name: &str) -> Option<usize> {
        if let Some(hit) = self.cache.read().get(name) {
            return *hit;
        }
        let resolved = self.source.address(name).map(|ptr| ptr.as_ptr() as usize);
        tracing::trace!(symbol = name, found = resolved.is_some(), "resolved native symbol");
        self.cache.write().insert(name.to_string(), resolved);
        resolved
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.address(name).is_some()
    }

    /// # Errors
    ///
    /// Returns [`Error::SymbolNotFound`] when `name` is not exported.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.address(name)
            .ok_or_else(|| Error::SymbolNotFound(name.to_string()))
    }

    /// Reads an exported `usize` static.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymbolNotFound`] when `name` is not exported.
    pub fn read_usize(&self, name: &str) -> Result<usize> {
        let addr = self.require(name)?;
        // SAFETY: size statics are exported as `usize` and never written.
        Ok(unsafe { std::ptr::read(addr as *const usize) })
    }
}

impl std::fmt::Debug for Symbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbols")
            .field("cached", &self.cache.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.library_name, "lexical_capi");
        assert!(!config.suffixes.is_empty());
        assert!(config.search_paths.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let config = LoaderConfig::from_lookup(|key| match key {
            SUFFIX_ENV => Some(OsString::from("dylib, .so")),
            _ => None,
        });
        assert_eq!(config.suffixes, vec!["dylib".to_string(), "so".to_string()]);

        let config = LoaderConfig::from_lookup(|_| None);
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_env_search_path() {
        let joined = std::env::join_paths(["/opt/lexical", "/usr/local/lib"]).unwrap();
        let config = LoaderConfig::from_lookup(|key| (key == PATH_ENV).then(|| joined.clone()));
        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("/opt/lexical"), PathBuf::from("/usr/local/lib")]
        );
    }

    #[test]
    fn test_candidates_order() {
        let config = LoaderConfig::new()
            .with_suffixes(&["so"])
            .with_search_path("/opt/lexical");
        let candidates = config.candidates();
        assert_eq!(candidates[0], PathBuf::from("/opt/lexical/liblexical_capi.so"));
        assert_eq!(
            candidates[1],
            PathBuf::from(libloading::library_filename("lexical_capi"))
        );
        assert_eq!(candidates[2], Path::new(".").join("liblexical_capi.so"));
    }

    #[test]
    fn test_dll_candidates_include_bare_name() {
        let config = LoaderConfig::new().with_suffixes(&["dll"]);
        let candidates = config.candidates();
        assert!(candidates.contains(&Path::new(".").join("lexical_capi.dll")));
        assert!(candidates.contains(&Path::new(".").join("liblexical_capi.dll")));
    }

    #[test]
    fn test_load_missing_library() {
        let config = LoaderConfig::new()
            .with_library_name("lexical_bridge_does_not_exist")
            .with_search_path("/nonexistent");
        // SAFETY: no candidate exists, nothing is opened.
        let result = unsafe { NativeLibrary::load(&config) };
        assert!(matches!(result, Err(Error::LibraryNotFound { .. })));
    }

    struct Counting {
        inner: SymbolTable,
        lookups: AtomicUsize,
    }

    impl SymbolSource for Counting {
        fn address(&self, name: &str) -> Option<NonNull<c_void>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.address(name)
        }
    }

    #[test]
    fn test_symbols_cache_hits_and_misses() {
        let source = Arc::new(Counting {
            inner: SymbolTable::new().with_marker("PRESENT"),
            lookups: AtomicUsize::new(0),
        });
        let symbols = Symbols::new(source.clone());
        assert!(symbols.has("PRESENT"));
        assert!(symbols.has("PRESENT"));
        assert!(!symbols.has("ABSENT"));
        assert!(!symbols.has("ABSENT"));
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
        assert!(matches!(symbols.require("ABSENT"), Err(Error::SymbolNotFound(_))));
    }

    #[test]
    fn test_read_usize() {
        static SIZE: usize = 64;
        let symbols = Symbols::new(Arc::new(SymbolTable::new().with_static("SIZE", &SIZE)));
        assert_eq!(symbols.read_usize("SIZE").unwrap(), 64);
    }
}
