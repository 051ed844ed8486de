//! Process-wide configuration of the native library.
//!
//! The native library keeps a few settings in global state: the NaN and
//! infinity spellings, the default and backup exponent characters and the
//! default float rounding mode. They are reached through a [`ConfigStore`]:
//!
//! - [`NativeConfig`] reads and writes the library's own globals
//! - [`MemoryConfig`] keeps the values in memory, for tests
//!
//! [`Config`] owns a store together with the values it held at [`Config::init`].
//!
//! ## Data races
//!
//! The native globals have no locking of their own. A setter running on one
//! thread while another thread parses or writes floats is a data race inside
//! the native library, and two setters on different threads race each other.
//! [`Config`] does not and cannot prevent that for callers that bypass it.
//! Code that changes configuration while other threads make calls must hold
//! [`Config::lock`] around both, or use [`Config::scoped`], which holds it
//! for "set, run, restore".

// This module needs unsafe for FFI.
#![allow(unsafe_code)]

use std::ffi::c_int;
use std::sync::Arc;

use parking_lot::{const_mutex, const_reentrant_mutex, Mutex, ReentrantMutex, ReentrantMutexGuard};
use serde::{Deserialize, Serialize};

use crate::api::Marshaler;
use crate::capability::{Capabilities, Capability};
use crate::error::{Error, Result};
use crate::library::Symbols;
use crate::options::{
    check_inf, check_infinity, check_length, check_nan, RoundingKind, BUFFER_SIZE,
    DEFAULT_INFINITY_STRING, DEFAULT_INF_STRING, DEFAULT_NAN_STRING,
};

pub const DEFAULT_EXPONENT_CHAR: u8 = b'e';
pub const DEFAULT_EXPONENT_BACKUP_CHAR: u8 = b'^';

static CONFIG_LOCK: ReentrantMutex<()> = const_reentrant_mutex(());

/// Access to the native library's global settings.
///
/// Stores report [`Error::Unsupported`] for settings the library was built
/// without: the backup exponent needs radix support and the rounding mode
/// needs rounding support.
pub trait ConfigStore: Send {
    fn nan_string(&self) -> Result<String>;
    fn set_nan_string(&mut self, value: &str) -> Result<()>;
    fn inf_string(&self) -> Result<String>;
    fn set_inf_string(&mut self, value: &str) -> Result<()>;
    fn infinity_string(&self) -> Result<String>;
    fn set_infinity_string(&mut self, value: &str) -> Result<()>;
    fn exponent_default(&self) -> Result<u8>;
    fn set_exponent_default(&mut self, value: u8) -> Result<()>;
    fn exponent_backup(&self) -> Result<u8>;
    fn set_exponent_backup(&mut self, value: u8) -> Result<()>;
    fn rounding(&self) -> Result<RoundingKind>;
    fn set_rounding(&mut self, value: RoundingKind) -> Result<()>;
}

/// One complete set of values. Settings the library lacks are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub nan_string: String,
    pub inf_string: String,
    pub infinity_string: String,
    pub exponent_default: u8,
    pub exponent_backup: Option<u8>,
    pub rounding: Option<RoundingKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            nan_string: DEFAULT_NAN_STRING.to_string(),
            inf_string: DEFAULT_INF_STRING.to_string(),
            infinity_string: DEFAULT_INFINITY_STRING.to_string(),
            exponent_default: DEFAULT_EXPONENT_CHAR,
            exponent_backup: Some(DEFAULT_EXPONENT_BACKUP_CHAR),
            rounding: Some(RoundingKind::default()),
        }
    }
}

fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::Unsupported(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

impl Settings {
    /// Reads every setting from `store`.
    ///
    /// # Errors
    ///
    /// Propagates store failures other than unsupported settings.
    pub fn read(store: &dyn ConfigStore) -> Result<Self> {
        Ok(Settings {
            nan_string: store.nan_string()?,
            inf_string: store.inf_string()?,
            infinity_string: store.infinity_string()?,
            exponent_default: store.exponent_default()?,
            exponent_backup: optional(store.exponent_backup())?,
            rounding: optional(store.rounding())?,
        })
    }
}

fn check_exponent_char(value: u8) -> Result<()> {
    if !value.is_ascii() || value.is_ascii_digit() || matches!(value, b'+' | b'-') {
        return Err(Error::Config(format!(
            "invalid exponent character {:?}",
            char::from(value)
        )));
    }
    Ok(())
}

/// The native library's global settings, with the initial values kept for
/// [`Config::reset`].
pub struct Config {
    store: Box<dyn ConfigStore>,
    initial: Settings,
}

impl Config {
    /// Captures the current values of `store`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn init(store: Box<dyn ConfigStore>) -> Result<Self> {
        let initial = Settings::read(store.as_ref())?;
        tracing::debug!(?initial, "captured native configuration");
        Ok(Config { store, initial })
    }

    /// Process-wide lock serializing configuration changes and the calls
    /// that depend on them. Reentrant on the same thread.
    #[must_use]
    pub fn lock() -> ReentrantMutexGuard<'static, ()> {
        CONFIG_LOCK.lock()
    }

    #[must_use]
    pub fn initial(&self) -> &Settings {
        &self.initial
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub fn current(&self) -> Result<Settings> {
        Settings::read(self.store.as_ref())
    }

    /// Writes every value of `settings`. `None` entries are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid value; earlier values stay
    /// applied.
    pub fn apply(&mut self, settings: &Settings) -> Result<()> {
        let _guard = Self::lock();
        // Infinity must not be shorter than inf, so widen before narrowing.
        if let Err(err) = self.set_infinity_string(&settings.infinity_string) {
            let retried = self
                .set_inf_string(&settings.inf_string)
                .and_then(|()| self.set_infinity_string(&settings.infinity_string));
            if retried.is_err() {
                return Err(err);
            }
        }
        self.set_inf_string(&settings.inf_string)?;
        self.set_nan_string(&settings.nan_string)?;
        self.set_exponent_default(settings.exponent_default)?;
        if let Some(backup) = settings.exponent_backup {
            self.set_exponent_backup(backup)?;
        }
        if let Some(rounding) = settings.rounding {
            self.set_rounding(rounding)?;
        }
        Ok(())
    }

    /// Restores the values captured by [`Config::init`].
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn reset(&mut self) -> Result<()> {
        let initial = self.initial.clone();
        self.apply(&initial)?;
        tracing::debug!("restored native configuration");
        Ok(())
    }

    /// Holds [`Config::lock`] while `f` runs, then restores the values that
    /// were current before it.
    ///
    /// # Errors
    ///
    /// Propagates failures reading or restoring the values. Errors returned
    /// by `f` itself are part of `T`.
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Config) -> T,
    {
        let _guard = Self::lock();
        let saved = self.current()?;
        let out = f(self);
        self.apply(&saved)?;
        Ok(out)
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub fn nan_string(&self) -> Result<String> {
        self.store.nan_string()
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] unless `value` starts with `N` or `n`.
    pub fn set_nan_string(&mut self, value: &str) -> Result<()> {
        check_nan(value).map_err(|e| Error::Config(e.to_string()))?;
        let _guard = Self::lock();
        self.store.set_nan_string(value)?;
        tracing::debug!(value, "set nan string");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub fn inf_string(&self) -> Result<String> {
        self.store.inf_string()
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] unless `value` starts with `I` or `i` and is
    /// not longer than the infinity string.
    pub fn set_inf_string(&mut self, value: &str) -> Result<()> {
        check_inf(value).map_err(|e| Error::Config(e.to_string()))?;
        let _guard = Self::lock();
        let infinity = self.store.infinity_string()?;
        check_infinity(&infinity, value).map_err(|e| Error::Config(e.to_string()))?;
        self.store.set_inf_string(value)?;
        tracing::debug!(value, "set inf string");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub fn infinity_string(&self) -> Result<String> {
        self.store.infinity_string()
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] unless `value` starts with `I` or `i` and is
    /// not shorter than the inf string.
    pub fn set_infinity_string(&mut self, value: &str) -> Result<()> {
        let _guard = Self::lock();
        let inf = self.store.inf_string()?;
        check_infinity(value, &inf).map_err(|e| Error::Config(e.to_string()))?;
        self.store.set_infinity_string(value)?;
        tracing::debug!(value, "set infinity string");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub fn exponent_default(&self) -> Result<u8> {
        self.store.exponent_default()
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] for a digit, sign or non-ASCII byte.
    pub fn set_exponent_default(&mut self, value: u8) -> Result<()> {
        check_exponent_char(value)?;
        let _guard = Self::lock();
        self.store.set_exponent_default(value)?;
        tracing::debug!(value = %char::from(value), "set default exponent character");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without radix support.
    pub fn exponent_backup(&self) -> Result<u8> {
        self.store.exponent_backup()
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] for a digit, sign or non-ASCII byte, and
    /// [`Error::Unsupported`] without radix support.
    pub fn set_exponent_backup(&mut self, value: u8) -> Result<()> {
        check_exponent_char(value)?;
        let _guard = Self::lock();
        self.store.set_exponent_backup(value)?;
        tracing::debug!(value = %char::from(value), "set backup exponent character");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without rounding support.
    pub fn rounding(&self) -> Result<RoundingKind> {
        self.store.rounding()
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without rounding support.
    pub fn set_rounding(&mut self, value: RoundingKind) -> Result<()> {
        let _guard = Self::lock();
        self.store.set_rounding(value)?;
        tracing::debug!(?value, "set rounding mode");
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("initial", &self.initial)
            .finish()
    }
}

/// In-memory store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryConfig {
    settings: Settings,
    capabilities: Capabilities,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig::new(Capabilities::all())
    }
}

impl MemoryConfig {
    /// Defaults of a library with `capabilities`.
    #[must_use]
    pub fn new(capabilities: Capabilities) -> Self {
        let mut settings = Settings::default();
        if !capabilities.radix {
            settings.exponent_backup = None;
        }
        if !capabilities.rounding {
            settings.rounding = None;
        }
        MemoryConfig {
            settings,
            capabilities,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ConfigStore for MemoryConfig {
    fn nan_string(&self) -> Result<String> {
        Ok(self.settings.nan_string.clone())
    }

    fn set_nan_string(&mut self, value: &str) -> Result<()> {
        self.settings.nan_string = value.to_string();
        Ok(())
    }

    fn inf_string(&self) -> Result<String> {
        Ok(self.settings.inf_string.clone())
    }

    fn set_inf_string(&mut self, value: &str) -> Result<()> {
        self.settings.inf_string = value.to_string();
        Ok(())
    }

    fn infinity_string(&self) -> Result<String> {
        Ok(self.settings.infinity_string.clone())
    }

    fn set_infinity_string(&mut self, value: &str) -> Result<()> {
        self.settings.infinity_string = value.to_string();
        Ok(())
    }

    fn exponent_default(&self) -> Result<u8> {
        Ok(self.settings.exponent_default)
    }

    fn set_exponent_default(&mut self, value: u8) -> Result<()> {
        self.settings.exponent_default = value;
        Ok(())
    }

    fn exponent_backup(&self) -> Result<u8> {
        self.capabilities.require(Capability::Radix)?;
        self.settings.exponent_backup.ok_or(Error::NoValue)
    }

    fn set_exponent_backup(&mut self, value: u8) -> Result<()> {
        self.capabilities.require(Capability::Radix)?;
        self.settings.exponent_backup = Some(value);
        Ok(())
    }

    fn rounding(&self) -> Result<RoundingKind> {
        self.capabilities.require(Capability::Rounding)?;
        self.settings.rounding.ok_or(Error::NoValue)
    }

    fn set_rounding(&mut self, value: RoundingKind) -> Result<()> {
        self.capabilities.require(Capability::Rounding)?;
        self.settings.rounding = Some(value);
        Ok(())
    }
}

pub const NAN_STRING_GETTER: &str = "get_nan_string_ffi";
pub const NAN_STRING_SETTER: &str = "set_nan_string_ffi";
pub const INF_STRING_GETTER: &str = "get_inf_string_ffi";
pub const INF_STRING_SETTER: &str = "set_inf_string_ffi";
pub const INFINITY_STRING_GETTER: &str = "get_infinity_string_ffi";
pub const INFINITY_STRING_SETTER: &str = "set_infinity_string_ffi";
pub const EXPONENT_DEFAULT_SYMBOL: &str = "EXPONENT_DEFAULT_CHAR";
pub const EXPONENT_BACKUP_SYMBOL: &str = "EXPONENT_BACKUP_CHAR";
pub const ROUNDING_SYMBOL: &str = "FLOAT_ROUNDING";

type GetStringFn = extern "C" fn(*mut *const u8, *mut usize) -> c_int;
type SetStringFn = extern "C" fn(*const u8, usize) -> c_int;

#[derive(Clone, Copy)]
enum Special {
    Nan,
    Inf,
    Infinity,
}

impl Special {
    const fn getter(self) -> &'static str {
        match self {
            Special::Nan => NAN_STRING_GETTER,
            Special::Inf => INF_STRING_GETTER,
            Special::Infinity => INFINITY_STRING_GETTER,
        }
    }

    const fn setter(self) -> &'static str {
        match self {
            Special::Nan => NAN_STRING_SETTER,
            Special::Inf => INF_STRING_SETTER,
            Special::Infinity => INFINITY_STRING_SETTER,
        }
    }
}

// The native library keeps the pointer it is handed, so each buffer lives
// until the next set of the same string.
static RETAINED: Mutex<[Option<Box<[u8]>>; 3]> = const_mutex([None, None, None]);

/// Store backed by the native library's globals.
pub struct NativeConfig {
    symbols: Arc<Symbols>,
    capabilities: Capabilities,
    buffer_size: usize,
}

impl NativeConfig {
    /// # Safety
    ///
    /// The configuration symbols `symbols` resolves must have the signatures
    /// and static types of the lexical C API.
    #[must_use]
    pub unsafe fn new(symbols: Arc<Symbols>, capabilities: Capabilities) -> Self {
        NativeConfig {
            symbols,
            capabilities,
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Store for the library behind `marshaler`, bounded by its published
    /// buffer size.
    #[must_use]
    pub fn for_marshaler(marshaler: &Marshaler) -> Self {
        let descriptor = marshaler.descriptor();
        // SAFETY: covered by the contract of `Marshaler::new`.
        let store = unsafe { Self::new(marshaler.symbols().clone(), descriptor.capabilities) };
        store.with_buffer_size(descriptor.sizes.buffer_size())
    }

    /// Longest special-value spelling the setters hand to the library.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn get_string(&self, which: Special) -> Result<String> {
        let addr = self.symbols.require(which.getter())?;
        // SAFETY: the getter has the `GetStringFn` signature.
        let getter: GetStringFn = unsafe { std::mem::transmute_copy(&addr) };
        let mut ptr: *const u8 = std::ptr::null();
        let mut size = 0usize;
        if getter(&mut ptr, &mut size) != 0 || ptr.is_null() {
            return Err(Error::Config(format!("{} failed", which.getter())));
        }
        // SAFETY: the native library reported a live buffer of `size` bytes.
        let bytes = unsafe { std::slice::from_raw_parts(ptr, size) };
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Config(format!("{} returned invalid UTF-8: {}", which.getter(), e)))
    }

    fn set_string(&mut self, which: Special, value: &str) -> Result<()> {
        check_length(which.setter(), value, self.buffer_size)
            .map_err(|e| Error::Config(e.to_string()))?;
        let addr = self.symbols.require(which.setter())?;
        // SAFETY: the setter has the `SetStringFn` signature.
        let setter: SetStringFn = unsafe { std::mem::transmute_copy(&addr) };
        let buffer: Box<[u8]> = value.as_bytes().into();
        let mut retained = RETAINED.lock();
        if setter(buffer.as_ptr(), buffer.len()) != 0 {
            return Err(Error::Config(format!("{} failed", which.setter())));
        }
        retained[which as usize] = Some(buffer);
        Ok(())
    }

    fn char_static(&self, name: &str) -> Result<*mut u8> {
        Ok(self.symbols.require(name)? as *mut u8)
    }
}

impl ConfigStore for NativeConfig {
    fn nan_string(&self) -> Result<String> {
        self.get_string(Special::Nan)
    }

    fn set_nan_string(&mut self, value: &str) -> Result<()> {
        self.set_string(Special::Nan, value)
    }

    fn inf_string(&self) -> Result<String> {
        self.get_string(Special::Inf)
    }

    fn set_inf_string(&mut self, value: &str) -> Result<()> {
        self.set_string(Special::Inf, value)
    }

    fn infinity_string(&self) -> Result<String> {
        self.get_string(Special::Infinity)
    }

    fn set_infinity_string(&mut self, value: &str) -> Result<()> {
        self.set_string(Special::Infinity, value)
    }

    fn exponent_default(&self) -> Result<u8> {
        let ptr = self.char_static(EXPONENT_DEFAULT_SYMBOL)?;
        // SAFETY: exported as a mutable `u8` static.
        Ok(unsafe { ptr.read_volatile() })
    }

    fn set_exponent_default(&mut self, value: u8) -> Result<()> {
        let ptr = self.char_static(EXPONENT_DEFAULT_SYMBOL)?;
        // SAFETY: exported as a mutable `u8` static.
        unsafe { ptr.write_volatile(value) };
        Ok(())
    }

    fn exponent_backup(&self) -> Result<u8> {
        self.capabilities.require(Capability::Radix)?;
        let ptr = self.char_static(EXPONENT_BACKUP_SYMBOL)?;
        // SAFETY: exported as a mutable `u8` static.
        Ok(unsafe { ptr.read_volatile() })
    }

    fn set_exponent_backup(&mut self, value: u8) -> Result<()> {
        self.capabilities.require(Capability::Radix)?;
        let ptr = self.char_static(EXPONENT_BACKUP_SYMBOL)?;
        // SAFETY: exported as a mutable `u8` static.
        unsafe { ptr.write_volatile(value) };
        Ok(())
    }

    fn rounding(&self) -> Result<RoundingKind> {
        self.capabilities.require(Capability::Rounding)?;
        let ptr = self.symbols.require(ROUNDING_SYMBOL)? as *const c_int;
        // SAFETY: exported as a mutable `c_int` static.
        let raw = unsafe { ptr.read_volatile() };
        u32::try_from(raw)
            .ok()
            .and_then(RoundingKind::from_u32)
            .ok_or_else(|| Error::Config(format!("unknown rounding mode {}", raw)))
    }

    fn set_rounding(&mut self, value: RoundingKind) -> Result<()> {
        self.capabilities.require(Capability::Rounding)?;
        let ptr = self.symbols.require(ROUNDING_SYMBOL)? as *mut c_int;
        // SAFETY: exported as a mutable `c_int` static.
        unsafe { ptr.write_volatile(value.as_u32() as c_int) };
        Ok(())
    }
}

impl std::fmt::Debug for NativeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeConfig")
            .field("capabilities", &self.capabilities)
            .field("buffer_size", &self.buffer_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Config {
        Config::init(Box::new(MemoryConfig::default())).unwrap()
    }

    #[test]
    fn test_init_captures_defaults() {
        let config = memory();
        assert_eq!(config.initial(), &Settings::default());
        assert_eq!(config.nan_string().unwrap(), "NaN");
        assert_eq!(config.exponent_default().unwrap(), b'e');
    }

    #[test]
    fn test_setters_validate() {
        let mut config = memory();
        assert!(matches!(config.set_nan_string("x"), Err(Error::Config(_))));
        assert!(config.set_nan_string("nan").is_ok());
        assert_eq!(config.nan_string().unwrap(), "nan");

        assert!(config.set_infinity_string("in").is_err());
        assert!(config.set_inf_string("infinity_and_beyond").is_err());
        assert!(config.set_exponent_default(b'1').is_err());
        assert!(config.set_exponent_default(b'+').is_err());
        assert!(config.set_exponent_default(b'p').is_ok());
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut config = memory();
        config.set_nan_string("nan").unwrap();
        config.set_rounding(RoundingKind::TowardZero).unwrap();
        config.set_exponent_backup(b'p').unwrap();
        config.reset().unwrap();
        assert_eq!(config.current().unwrap(), Settings::default());
    }

    #[test]
    fn test_apply_shorter_infinity() {
        let mut config = memory();
        let settings = Settings {
            inf_string: "I".to_string(),
            infinity_string: "Inf".to_string(),
            ..Settings::default()
        };
        config.apply(&settings).unwrap();
        assert_eq!(config.current().unwrap(), settings);
        config.reset().unwrap();
        assert_eq!(config.infinity_string().unwrap(), "infinity");
    }

    #[test]
    fn test_apply_keeps_first_error() {
        let mut config = memory();
        let settings = Settings {
            inf_string: "x".to_string(),
            infinity_string: "I".to_string(),
            ..Settings::default()
        };
        match config.apply(&settings) {
            Err(Error::Config(message)) => assert!(message.contains("shorter"), "{}", message),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(config.current().unwrap(), Settings::default());
    }

    #[test]
    fn test_scoped_restores() {
        let mut config = memory();
        let seen = config
            .scoped(|cfg| {
                cfg.set_nan_string("nan").unwrap();
                cfg.scoped(|inner| inner.nan_string().unwrap()).unwrap()
            })
            .unwrap();
        assert_eq!(seen, "nan");
        assert_eq!(config.nan_string().unwrap(), "NaN");
    }

    #[test]
    fn test_missing_capabilities() {
        let store = MemoryConfig::new(Capabilities::none());
        assert!(store.settings().exponent_backup.is_none());
        let mut config = Config::init(Box::new(store)).unwrap();
        assert_eq!(config.initial().rounding, None);
        assert!(matches!(
            config.set_rounding(RoundingKind::TowardZero),
            Err(Error::Unsupported(Capability::Rounding))
        ));
        assert!(matches!(
            config.exponent_backup(),
            Err(Error::Unsupported(Capability::Radix))
        ));
        config.reset().unwrap();
    }

    #[test]
    fn test_settings_serde() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Settings::default());
    }
}
