//! Calls into the native library.
//!
//! [`Marshaler`] turns host buffers into the `(first, last)` pointer pairs the
//! native functions take, calls the resolved entry point and decodes the
//! tagged struct it returns. Output buffers are sized from the published
//! formatted-size statics and cut at the end pointer the writer returns.
//!
//! The public surface comes in two variants, chosen once from the
//! [`Descriptor`](crate::capability::Descriptor):
//!
//! - [`Minimal`] implements [`Lexical`]: decimal parse and write, plus options
//!   that stay within the available capabilities
//! - [`Extended`] also implements [`LexicalExt`]: radix and format shortcuts
//!
//! [`Bridge`] holds whichever variant the loaded library supports.
//!
//! ```rust,no_run
//! use lexical_bridge::{Bridge, Lexical, LoaderConfig};
//!
//! # fn main() -> lexical_bridge::Result<()> {
//! // SAFETY: the library on the search path exports the lexical C API.
//! let bridge = unsafe { Bridge::load(&LoaderConfig::from_env())? };
//! let value: u64 = bridge.parse(b"1234")?;
//! assert_eq!(bridge.write(&value)?, "1234");
//! # Ok(())
//! # }
//! ```

// This module needs unsafe for FFI.
#![allow(unsafe_code)]

use std::sync::Arc;

use crate::capability::{Capabilities, Capability, Descriptor};
use crate::error::{Error, Result};
use crate::format::NumberFormat;
use crate::library::{LoaderConfig, NativeLibrary, SymbolSource, Symbols};
use crate::number::Number;
use crate::options::NativeOptions;
use crate::symbol::SymbolName;
use crate::tagged::{RawPartialResult, RawResult};

type ParseFn<R> = extern "C" fn(*const u8, *const u8) -> RawResult<R>;
type ParsePartialFn<R> = extern "C" fn(*const u8, *const u8) -> RawPartialResult<R>;
type ParseOptionsFn<R, O> = extern "C" fn(*const u8, *const u8, O) -> RawResult<R>;
type ParsePartialOptionsFn<R, O> = extern "C" fn(*const u8, *const u8, O) -> RawPartialResult<R>;
type WriteFn<R> = extern "C" fn(R, *mut u8, *mut u8) -> *mut u8;
type WriteOptionsFn<R, O> = extern "C" fn(R, *mut u8, *mut u8, O) -> *mut u8;

/// Reinterprets a resolved address as a function pointer of type `F`.
///
/// # Safety
///
/// `F` must be a function pointer type matching the native signature.
unsafe fn cast<F: Copy>(addr: usize) -> F {
    debug_assert_eq!(std::mem::size_of::<F>(), std::mem::size_of::<usize>());
    std::mem::transmute_copy(&addr)
}

/// Resolves symbols and performs calls.
pub struct Marshaler {
    symbols: Arc<Symbols>,
    descriptor: Descriptor,
}

impl Marshaler {
    /// # Safety
    ///
    /// Every symbol of the lexical C API that `symbols` resolves must have
    /// the signature or static type its name implies.
    #[must_use]
    pub unsafe fn new(symbols: Arc<Symbols>, descriptor: Descriptor) -> Self {
        Marshaler {
            symbols,
            descriptor,
        }
    }

    /// Probes the descriptor from `symbols`, then wraps them.
    ///
    /// # Safety
    ///
    /// Same as [`Marshaler::new`].
    ///
    /// # Errors
    ///
    /// Propagates missing size statics.
    pub unsafe fn resolve(symbols: Arc<Symbols>) -> Result<Self> {
        let descriptor = Descriptor::resolve(&symbols)?;
        Ok(Self::new(symbols, descriptor))
    }

    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn symbols(&self) -> &Arc<Symbols> {
        &self.symbols
    }

    fn function<F: Copy>(&self, name: SymbolName) -> Result<F> {
        let addr = self.symbols.require(&name.to_string())?;
        // SAFETY: guaranteed by the contract of `Marshaler::new`.
        Ok(unsafe { cast(addr) })
    }

    fn check<N: Number>(&self, mut needed: Capabilities) -> Result<()> {
        if N::WIDE {
            needed.i128 = true;
        }
        self.descriptor.capabilities.require_all(needed)
    }

    /// Gates `options` on the capabilities and the published buffer size.
    fn check_options<N: Number, O: NativeOptions>(&self, options: &O) -> Result<()> {
        self.check::<N>(options.requires())?;
        options.check_buffer(self.descriptor.sizes.buffer_size())
    }

    /// Parses all of `bytes` as `N`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] when the native parser rejects the input.
    pub fn parse<N: Number>(&self, bytes: &[u8]) -> Result<N> {
        self.check::<N>(Capabilities::none())?;
        let f: ParseFn<N::Raw> = self.function(SymbolName::parse(N::STEM))?;
        let range = bytes.as_ptr_range();
        f(range.start, range.end).decode().map(N::from_raw)
    }

    /// Parses the longest valid prefix of `bytes` and reports how many bytes
    /// it used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] when no prefix is a valid number.
    pub fn parse_partial<N: Number>(&self, bytes: &[u8]) -> Result<(N, usize)> {
        self.check::<N>(Capabilities::none())?;
        let f: ParsePartialFn<N::Raw> =
            self.function(SymbolName::parse(N::STEM).with_partial(true))?;
        let range = bytes.as_ptr_range();
        let (raw, consumed) = f(range.start, range.end).decode_partial()?;
        Ok((N::from_raw(raw), consumed))
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when `options` need a capability the
    /// library lacks, [`Error::InvalidOptions`] when a spelling does not fit
    /// the library's buffer, or [`Error::Native`] when parsing fails.
    pub fn parse_with_options<N: Number>(
        &self,
        bytes: &[u8],
        options: &N::ParseOptions,
    ) -> Result<N> {
        self.check_options::<N, _>(options)?;
        let name = SymbolName::parse(N::STEM).with_options(true);
        let f: ParseOptionsFn<N::Raw, <N::ParseOptions as NativeOptions>::Raw<'_>> =
            self.function(name)?;
        let range = bytes.as_ptr_range();
        f(range.start, range.end, options.lower())
            .decode()
            .map(N::from_raw)
    }

    /// # Errors
    ///
    /// Same as [`Marshaler::parse_with_options`].
    pub fn parse_partial_with_options<N: Number>(
        &self,
        bytes: &[u8],
        options: &N::ParseOptions,
    ) -> Result<(N, usize)> {
        self.check_options::<N, _>(options)?;
        let name = SymbolName::parse(N::STEM)
            .with_partial(true)
            .with_options(true);
        let f: ParsePartialOptionsFn<N::Raw, <N::ParseOptions as NativeOptions>::Raw<'_>> =
            self.function(name)?;
        let range = bytes.as_ptr_range();
        let (raw, consumed) = f(range.start, range.end, options.lower()).decode_partial()?;
        Ok((N::from_raw(raw), consumed))
    }

    /// Writes `value` in decimal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the writer reports an end
    /// outside the buffer or produces invalid UTF-8.
    pub fn write<N: Number>(&self, value: &N) -> Result<String> {
        self.check::<N>(Capabilities::none())?;
        let f: WriteFn<N::Raw> = self.function(SymbolName::write(N::STEM))?;
        let size = self.descriptor.sizes.for_write(N::STEM, 10)?;
        let raw = value.to_raw();
        fill(size, |first, last| f(raw, first, last))
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when `options` need a capability the
    /// library lacks, otherwise the same as [`Marshaler::write`].
    pub fn write_with_options<N: Number>(
        &self,
        value: &N,
        options: &N::WriteOptions,
    ) -> Result<String> {
        self.check_options::<N, _>(options)?;
        let name = SymbolName::write(N::STEM).with_options(true);
        let f: WriteOptionsFn<N::Raw, <N::WriteOptions as NativeOptions>::Raw<'_>> =
            self.function(name)?;
        let size = self.descriptor.sizes.for_write(N::STEM, options.radix())?;
        let raw = value.to_raw();
        let lowered = options.lower();
        fill(size, |first, last| f(raw, first, last, lowered))
    }
}

/// Runs a native writer over a fresh buffer of `size` bytes and keeps the
/// bytes before the returned end pointer.
fn fill<F>(size: usize, write: F) -> Result<String>
where
    F: FnOnce(*mut u8, *mut u8) -> *mut u8,
{
    let mut buffer = vec![0u8; size];
    let range = buffer.as_mut_ptr_range();
    let (first, last) = (range.start, range.end);
    let end = write(first, last);
    let written = (end as usize)
        .checked_sub(first as usize)
        .filter(|&len| len <= size)
        .ok_or_else(|| Error::invalid_argument("native writer returned an end outside the buffer"))?;
    buffer.truncate(written);
    String::from_utf8(buffer)
        .map_err(|e| Error::InvalidArgument(format!("native writer produced invalid UTF-8: {}", e)))
}

impl std::fmt::Debug for Marshaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marshaler")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Operations every build of the native library provides.
pub trait Lexical {
    fn marshaler(&self) -> &Marshaler;

    fn descriptor(&self) -> &Descriptor {
        self.marshaler().descriptor()
    }

    fn capabilities(&self) -> Capabilities {
        self.descriptor().capabilities
    }

    /// # Errors
    ///
    /// See [`Marshaler::parse`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse<N: Number>(&self, bytes: &[u8]) -> Result<N> {
        self.marshaler().parse(bytes)
    }

    /// # Errors
    ///
    /// See [`Marshaler::parse_partial`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_partial<N: Number>(&self, bytes: &[u8]) -> Result<(N, usize)> {
        self.marshaler().parse_partial(bytes)
    }

    /// # Errors
    ///
    /// See [`Marshaler::parse_with_options`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_with_options<N: Number>(&self, bytes: &[u8], options: &N::ParseOptions) -> Result<N> {
        self.marshaler().parse_with_options(bytes, options)
    }

    /// # Errors
    ///
    /// See [`Marshaler::parse_partial_with_options`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_partial_with_options<N: Number>(
        &self,
        bytes: &[u8],
        options: &N::ParseOptions,
    ) -> Result<(N, usize)> {
        self.marshaler().parse_partial_with_options(bytes, options)
    }

    /// # Errors
    ///
    /// See [`Marshaler::write`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn write<N: Number>(&self, value: &N) -> Result<String> {
        self.marshaler().write(value)
    }

    /// # Errors
    ///
    /// See [`Marshaler::write_with_options`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn write_with_options<N: Number>(&self, value: &N, options: &N::WriteOptions) -> Result<String> {
        self.marshaler().write_with_options(value, options)
    }
}

/// Radix and format shortcuts, only for libraries built with them.
pub trait LexicalExt: Lexical {
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for a radix outside `2..=36`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_radix<N: Number>(&self, bytes: &[u8], radix: u8) -> Result<N> {
        let options = N::ParseOptions::from_radix(radix)?;
        self.parse_with_options(bytes, &options)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for a radix outside `2..=36`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_partial_radix<N: Number>(&self, bytes: &[u8], radix: u8) -> Result<(N, usize)> {
        let options = N::ParseOptions::from_radix(radix)?;
        self.parse_partial_with_options(bytes, &options)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for a radix outside `2..=36`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn write_radix<N: Number>(&self, value: &N, radix: u8) -> Result<String> {
        let options = N::WriteOptions::from_radix(radix)?;
        self.write_with_options(value, &options)
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without format support.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_format<N: Number>(&self, bytes: &[u8], format: NumberFormat) -> Result<N> {
        let options = N::ParseOptions::from_format(format)?;
        self.parse_with_options(bytes, &options)
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without format support.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    fn parse_partial_format<N: Number>(
        &self,
        bytes: &[u8],
        format: NumberFormat,
    ) -> Result<(N, usize)> {
        let options = N::ParseOptions::from_format(format)?;
        self.parse_partial_with_options(bytes, &options)
    }
}

/// Bridge to a library with decimal support only.
#[derive(Debug)]
pub struct Minimal {
    marshaler: Marshaler,
}

impl Minimal {
    #[must_use]
    pub fn new(marshaler: Marshaler) -> Self {
        Minimal { marshaler }
    }
}

impl Lexical for Minimal {
    fn marshaler(&self) -> &Marshaler {
        &self.marshaler
    }
}

/// Bridge to a library built with radix, format or rounding support.
#[derive(Debug)]
pub struct Extended {
    marshaler: Marshaler,
}

impl Extended {
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when the library has none of the
    /// extended capabilities.
    pub fn new(marshaler: Marshaler) -> Result<Self> {
        if !marshaler.descriptor().capabilities.is_extended() {
            return Err(Error::Unsupported(Capability::Radix));
        }
        Ok(Extended { marshaler })
    }
}

impl Lexical for Extended {
    fn marshaler(&self) -> &Marshaler {
        &self.marshaler
    }
}

impl LexicalExt for Extended {}

/// The variant matching the loaded library.
#[derive(Debug)]
pub enum Bridge {
    Minimal(Minimal),
    Extended(Extended),
}

impl Bridge {
    /// Picks the variant from the marshaler's descriptor.
    #[must_use]
    pub fn select(marshaler: Marshaler) -> Self {
        if marshaler.descriptor().capabilities.is_extended() {
            tracing::debug!("selected extended bridge");
            Bridge::Extended(Extended { marshaler })
        } else {
            tracing::debug!("selected minimal bridge");
            Bridge::Minimal(Minimal::new(marshaler))
        }
    }

    /// Resolves the descriptor from `source` and selects a variant.
    ///
    /// # Safety
    ///
    /// Every parse and write symbol `source` resolves must have the signature
    /// its name implies.
    ///
    /// # Errors
    ///
    /// Propagates missing size statics.
    pub unsafe fn from_source(source: Arc<dyn SymbolSource>) -> Result<Self> {
        let symbols = Arc::new(Symbols::new(source));
        Ok(Self::select(Marshaler::resolve(symbols)?))
    }

    /// Opens the native library described by `config`.
    ///
    /// # Safety
    ///
    /// The library found must export the lexical C API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryNotFound`] or [`Error::Load`] when no
    /// candidate opens, and propagates missing size statics.
    pub unsafe fn load(config: &LoaderConfig) -> Result<Self> {
        let library = NativeLibrary::load(config)?;
        Self::from_source(Arc::new(library))
    }

    #[must_use]
    pub fn as_extended(&self) -> Option<&Extended> {
        match self {
            Bridge::Extended(extended) => Some(extended),
            Bridge::Minimal(_) => None,
        }
    }

    #[must_use]
    pub fn is_extended(&self) -> bool {
        matches!(self, Bridge::Extended(_))
    }
}

impl Lexical for Bridge {
    fn marshaler(&self) -> &Marshaler {
        match self {
            Bridge::Minimal(minimal) => minimal.marshaler(),
            Bridge::Extended(extended) => extended.marshaler(),
        }
    }
}
