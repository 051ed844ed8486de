//! # lexical_bridge
//!
//! Host-side bindings to the lexical C API, a native library for parsing
//! and formatting numbers.
//!
//! ## What crosses the boundary?
//!
//! The native library takes pointer ranges and small `#[repr(C)]` structs and
//! returns tagged structs by value. Every field offset, discriminant and byte
//! length has to match its in-memory layout exactly. This crate owns that
//! layout:
//!
//! - **Number formats**: a grammar for numeric literals packed into one `u64`
//!   ([`NumberFormat`]), assembled by a validating [`NumberFormatBuilder`]
//! - **Tagged values**: `Option`, `Result` and partial-parse results decoded
//!   tag first, so the wrong payload arm is never read ([`tagged`])
//! - **Errors**: native error codes and their byte index ([`ErrorCode`],
//!   [`NativeError`]) next to host-side validation errors ([`Error`])
//! - **Wide integers**: 128-bit values as 16-byte buffers, converted to and
//!   from arbitrary-precision integers modulo 2^128 ([`wide`])
//! - **Calls**: symbol resolution, capability gating and buffer sizing
//!   ([`Bridge`], [`Lexical`], [`LexicalExt`])
//! - **Process configuration**: the library's global NaN and infinity
//!   spellings, exponent characters and rounding mode ([`Config`])
//!
//! ## Quick Start
//!
//! ```rust
//! use lexical_bridge::{presets, NumberFormatBuilder};
//!
//! let format = NumberFormatBuilder::new()
//!     .with_digit_separator(b'_')
//!     .with_internal_digit_separator(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(format.digit_separator(), b'_');
//! assert_eq!(format.rebuild().build().unwrap(), format);
//!
//! // The decimal-point and exponent characters must differ.
//! assert!(NumberFormatBuilder::new().with_decimal_point(b'e').build().is_err());
//! assert_eq!(presets::STANDARD.digit_separator(), 0);
//! ```
//!
//! ### Calling the native library
//!
//! ```rust,no_run
//! use lexical_bridge::{Lexical, LexicalExt};
//!
//! # fn main() -> lexical_bridge::Result<()> {
//! // SAFETY: the library found on the search path exports the lexical C API.
//! let bridge = unsafe { lexical_bridge::load()? };
//!
//! let value: i32 = bridge.parse(b"-42")?;
//! let (value, used): (i32, usize) = bridge.parse_partial(b"10a")?;
//! assert_eq!((value, used), (10, 2));
//!
//! if let Some(extended) = bridge.as_extended() {
//!     assert_eq!(extended.write_radix(&10u64, 2)?, "1010");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Library resolution
//!
//! [`load`] reads `SHARED_LIBRARY_SUFFIX` and `LEXICAL_LIBRARY_PATH` through
//! [`LoaderConfig::from_env`]. See [`library`] for the search order.
//!
//! ## Thread safety
//!
//! Everything except [`Config`] is pure and safe to share between threads.
//! The native configuration is a single process-wide resource; see
//! [`config`] for how to serialize changes to it.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (library loading, capability resolution,
//! configuration changes) and never installs a subscriber.

#![deny(unsafe_code)]

pub mod api;
pub mod capability;
pub mod config;
pub mod error;
pub mod format;
pub mod library;
pub mod number;
pub mod options;
pub mod presets;
pub mod symbol;
pub mod tagged;
pub mod wide;

pub use api::{Bridge, Extended, Lexical, LexicalExt, Marshaler, Minimal};
pub use capability::{Capabilities, Capability, Descriptor, FormattedSize, FormattedSizes};
pub use config::{Config, ConfigStore, MemoryConfig, NativeConfig, Settings};
pub use error::{Error, ErrorCode, NativeError, Result};
pub use format::{NumberFormat, NumberFormatBuilder, NumberFormatFlags};
pub use library::{LoaderConfig, NativeLibrary, SymbolSource, SymbolTable, Symbols};
pub use number::Number;
pub use options::{
    NativeOptions, ParseFloatOptions, ParseFloatOptionsBuilder, ParseIntegerOptions,
    ParseIntegerOptionsBuilder, RoundingKind, WriteFloatOptions, WriteFloatOptionsBuilder,
    WriteIntegerOptions, WriteIntegerOptionsBuilder,
};
pub use wide::{WideInt128, WideUInt128};

/// Loads the native library using the process environment.
///
/// # Safety
///
/// The library found must export the lexical C API.
///
/// # Errors
///
/// Returns [`Error::LibraryNotFound`] or [`Error::Load`] when no candidate
/// opens, and propagates missing size statics.
#[allow(unsafe_code)]
#[must_use = "this returns the result of the operation, errors must be handled"]
pub unsafe fn load() -> Result<Bridge> {
    Bridge::load(&LoaderConfig::from_env())
}

/// Loads the native library using `config`.
///
/// # Safety
///
/// Same as [`load`].
///
/// # Errors
///
/// Same as [`load`].
#[allow(unsafe_code)]
#[must_use = "this returns the result of the operation, errors must be handled"]
pub unsafe fn load_with_config(config: &LoaderConfig) -> Result<Bridge> {
    Bridge::load(config)
}

/// Process configuration of the library behind `bridge`.
///
/// # Errors
///
/// Propagates failures reading the initial values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn native_config(bridge: &Bridge) -> Result<Config> {
    Config::init(Box::new(NativeConfig::for_marshaler(bridge.marshaler())))
}
