//! Options bundles for parse and write calls.
//!
//! This module provides four immutable bundles, each with a builder that
//! validates on `build()` and a `rebuild()` that seeds a fresh builder:
//!
//! - [`ParseIntegerOptions`]: radix and optional number format
//! - [`ParseFloatOptions`]: radix, exponent base/radix, format, rounding,
//!   algorithm selection and special-value spellings
//! - [`WriteIntegerOptions`]: radix
//! - [`WriteFloatOptions`]: radix, optional format, trimming and special-value spellings
//!
//! Deserializing a bundle runs the same validation as its builder.
//!
//! Each bundle lowers to a `#[repr(C)]` view ([`NativeOptions::lower`]) that
//! matches the native layout and borrows the bundle's strings for the
//! duration of one call.
//!
//! ## Examples
//!
//! ```rust
//! use lexical_bridge::{ParseFloatOptions, RoundingKind};
//!
//! let options = ParseFloatOptions::builder()
//!     .with_nan_string("nan")
//!     .with_rounding(RoundingKind::TowardZero)
//!     .build()
//!     .unwrap();
//! assert_eq!(options.nan_string(), "nan");
//! assert_eq!(options.rebuild().build().unwrap(), options);
//!
//! // NaN spellings must start with 'N' or 'n'.
//! assert!(ParseFloatOptions::builder().with_nan_string("i").build().is_err());
//! ```

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{Error, Result};
use crate::format::NumberFormat;
use crate::presets;
use crate::tagged::RawOption;

pub const DEFAULT_RADIX: u8 = 10;
pub const MIN_RADIX: u8 = 2;
pub const MAX_RADIX: u8 = 36;

/// Upper bound on special-value spellings, matching the native default
/// buffer size. A loaded library may publish a smaller one, checked through
/// [`NativeOptions::check_buffer`] before each call.
pub const BUFFER_SIZE: usize = 1024;

pub const DEFAULT_NAN_STRING: &str = "NaN";
pub const DEFAULT_INF_STRING: &str = "inf";
pub const DEFAULT_INFINITY_STRING: &str = "infinity";

/// Rounding mode for float parsing.
///
/// # Examples
///
/// ```rust
/// use lexical_bridge::RoundingKind;
///
/// assert_eq!(RoundingKind::NearestTieEven.as_u32(), 0);
/// assert_eq!(RoundingKind::from_u32(4), Some(RoundingKind::TowardZero));
/// ```
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingKind {
    /// Round to the nearest, tie to even.
    #[default]
    NearestTieEven = 0,
    /// Round to the nearest, tie away from zero.
    NearestTieAwayZero = 1,
    /// Round toward positive infinity.
    TowardPositiveInfinity = 2,
    /// Round toward negative infinity.
    TowardNegativeInfinity = 3,
    /// Round toward zero.
    TowardZero = 4,
}

impl RoundingKind {
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(RoundingKind::NearestTieEven),
            1 => Some(RoundingKind::NearestTieAwayZero),
            2 => Some(RoundingKind::TowardPositiveInfinity),
            3 => Some(RoundingKind::TowardNegativeInfinity),
            4 => Some(RoundingKind::TowardZero),
            _ => None,
        }
    }
}

/// Lowering of an options bundle to its native layout.
pub trait NativeOptions {
    /// The `#[repr(C)]` view passed by value to the native call.
    type Raw<'a>: Copy
    where
        Self: 'a;

    /// Borrows `self` as the native view.
    fn lower(&self) -> Self::Raw<'_>;

    /// Radix the output or input is expressed in.
    fn radix(&self) -> u32;

    /// Capabilities the native library must have to honor these options.
    fn requires(&self) -> Capabilities;

    /// Default options in `radix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the radix is outside `2..=36`.
    fn from_radix(radix: u8) -> Result<Self>
    where
        Self: Sized;

    /// Default options with a custom number format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the bundle has no format field.
    fn from_format(format: NumberFormat) -> Result<Self>
    where
        Self: Sized;

    /// Checks that every string the native view borrows fits a native
    /// buffer of `limit` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] naming the first string that does not fit.
    fn check_buffer(&self, _limit: usize) -> Result<()> {
        Ok(())
    }
}

fn check_radix(name: &str, radix: u8) -> Result<()> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(Error::InvalidOptions(format!(
            "{} must be in {}..={}, found {}",
            name, MIN_RADIX, MAX_RADIX, radix
        )))
    }
}

pub(crate) fn check_length(name: &str, value: &str, limit: usize) -> Result<()> {
    if value.len() > limit {
        return Err(Error::InvalidOptions(format!(
            "{} is longer than {} bytes",
            name, limit
        )));
    }
    Ok(())
}

fn check_special(name: &str, value: &str, first: &[u8]) -> Result<()> {
    check_length(name, value, BUFFER_SIZE)?;
    match value.as_bytes().first() {
        None => Err(Error::InvalidOptions(format!("{} must not be empty", name))),
        Some(ch) if first.contains(ch) => Ok(()),
        Some(_) => Err(Error::InvalidOptions(format!(
            "{} must start with one of {:?}",
            name,
            String::from_utf8_lossy(first)
        ))),
    }
}

pub(crate) fn check_nan(value: &str) -> Result<()> {
    check_special("nan string", value, b"Nn")
}

pub(crate) fn check_inf(value: &str) -> Result<()> {
    check_special("inf string", value, b"Ii")
}

pub(crate) fn check_infinity(value: &str, inf: &str) -> Result<()> {
    check_special("infinity string", value, b"Ii")?;
    if value.len() < inf.len() {
        return Err(Error::invalid_options(
            "infinity string must not be shorter than the inf string",
        ));
    }
    Ok(())
}

fn requires_radix(radixes: &[u32]) -> bool {
    radixes.iter().any(|&radix| radix != u32::from(DEFAULT_RADIX))
}

// PARSE INTEGER

/// Options to customize parsing integers.
///
/// Deserialization goes through [`ParseIntegerOptionsBuilder::build`], so a
/// stored bundle is validated like a built one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParseIntegerOptionsBuilder")]
pub struct ParseIntegerOptions {
    radix: u32,
    format: Option<NumberFormat>,
}

/// Builder for [`ParseIntegerOptions`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseIntegerOptionsBuilder {
    radix: u8,
    format: Option<NumberFormat>,
}

impl Default for ParseIntegerOptionsBuilder {
    fn default() -> Self {
        ParseIntegerOptionsBuilder {
            radix: DEFAULT_RADIX,
            format: None,
        }
    }
}

impl ParseIntegerOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_radix(mut self, radix: u8) -> Self {
        self.radix = radix;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Option<NumberFormat>) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn radix(&self) -> u8 {
        self.radix
    }

    #[must_use]
    pub fn format(&self) -> Option<NumberFormat> {
        self.format
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the radix is outside `2..=36`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn build(&self) -> Result<ParseIntegerOptions> {
        check_radix("radix", self.radix)?;
        Ok(ParseIntegerOptions {
            radix: u32::from(self.radix),
            format: self.format,
        })
    }
}

impl TryFrom<ParseIntegerOptionsBuilder> for ParseIntegerOptions {
    type Error = Error;

    fn try_from(builder: ParseIntegerOptionsBuilder) -> Result<Self> {
        builder.build()
    }
}

impl Default for ParseIntegerOptions {
    fn default() -> Self {
        ParseIntegerOptions::decimal()
    }
}

impl ParseIntegerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ParseIntegerOptionsBuilder {
        ParseIntegerOptionsBuilder::new()
    }

    #[must_use]
    pub const fn decimal() -> Self {
        ParseIntegerOptions {
            radix: 10,
            format: None,
        }
    }

    #[must_use]
    pub const fn binary() -> Self {
        ParseIntegerOptions {
            radix: 2,
            format: None,
        }
    }

    #[must_use]
    pub const fn hexadecimal() -> Self {
        ParseIntegerOptions {
            radix: 16,
            format: None,
        }
    }

    #[must_use]
    pub fn rebuild(&self) -> ParseIntegerOptionsBuilder {
        ParseIntegerOptionsBuilder {
            // Validated on construction, always fits.
            radix: self.radix as u8,
            format: self.format,
        }
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }

    #[must_use]
    pub fn format(&self) -> Option<NumberFormat> {
        self.format
    }
}

/// Native layout of [`ParseIntegerOptions`].
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawParseIntegerOptions {
    pub radix: u32,
    pub format: RawOption<u64>,
}

impl NativeOptions for ParseIntegerOptions {
    type Raw<'a> = RawParseIntegerOptions;

    fn lower(&self) -> RawParseIntegerOptions {
        RawParseIntegerOptions {
            radix: self.radix,
            format: self.format.map(NumberFormat::bits).into(),
        }
    }

    fn radix(&self) -> u32 {
        self.radix
    }

    fn requires(&self) -> Capabilities {
        Capabilities::none()
            .with_radix(requires_radix(&[self.radix]))
            .with_format(self.format.is_some())
    }

    fn from_radix(radix: u8) -> Result<Self> {
        ParseIntegerOptions::builder().with_radix(radix).build()
    }

    fn from_format(format: NumberFormat) -> Result<Self> {
        ParseIntegerOptions::builder().with_format(Some(format)).build()
    }
}

// PARSE FLOAT

/// Options to customize parsing floats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParseFloatOptionsBuilder")]
pub struct ParseFloatOptions {
    radix: u32,
    exponent_base: u32,
    exponent_radix: u32,
    format: NumberFormat,
    rounding: RoundingKind,
    incorrect: bool,
    lossy: bool,
    nan_string: String,
    inf_string: String,
    infinity_string: String,
}

/// Builder for [`ParseFloatOptions`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseFloatOptionsBuilder {
    radix: u8,
    exponent_base: u8,
    exponent_radix: u8,
    format: NumberFormat,
    rounding: RoundingKind,
    incorrect: bool,
    lossy: bool,
    nan_string: String,
    inf_string: String,
    infinity_string: String,
}

impl Default for ParseFloatOptionsBuilder {
    fn default() -> Self {
        ParseFloatOptionsBuilder {
            radix: DEFAULT_RADIX,
            exponent_base: DEFAULT_RADIX,
            exponent_radix: DEFAULT_RADIX,
            format: presets::STANDARD,
            rounding: RoundingKind::default(),
            incorrect: false,
            lossy: false,
            nan_string: DEFAULT_NAN_STRING.to_string(),
            inf_string: DEFAULT_INF_STRING.to_string(),
            infinity_string: DEFAULT_INFINITY_STRING.to_string(),
        }
    }
}

impl ParseFloatOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_radix(mut self, radix: u8) -> Self {
        self.radix = radix;
        self
    }

    /// Numerical base of the exponent (the `b` in `m * b^e`).
    #[must_use]
    pub fn with_exponent_base(mut self, base: u8) -> Self {
        self.exponent_base = base;
        self
    }

    /// Radix the exponent digits are written in.
    #[must_use]
    pub fn with_exponent_radix(mut self, radix: u8) -> Self {
        self.exponent_radix = radix;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingKind) -> Self {
        self.rounding = rounding;
        self
    }

    /// Use the fast, incorrect parser.
    #[must_use]
    pub fn with_incorrect(mut self, incorrect: bool) -> Self {
        self.incorrect = incorrect;
        self
    }

    /// Use the intermediate, lossy parser.
    #[must_use]
    pub fn with_lossy(mut self, lossy: bool) -> Self {
        self.lossy = lossy;
        self
    }

    #[must_use]
    pub fn with_nan_string(mut self, value: impl Into<String>) -> Self {
        self.nan_string = value.into();
        self
    }

    #[must_use]
    pub fn with_inf_string(mut self, value: impl Into<String>) -> Self {
        self.inf_string = value.into();
        self
    }

    #[must_use]
    pub fn with_infinity_string(mut self, value: impl Into<String>) -> Self {
        self.infinity_string = value.into();
        self
    }

    #[must_use]
    pub fn radix(&self) -> u8 {
        self.radix
    }

    #[must_use]
    pub fn format(&self) -> NumberFormat {
        self.format
    }

    #[must_use]
    pub fn rounding(&self) -> RoundingKind {
        self.rounding
    }

    #[must_use]
    pub fn nan_string(&self) -> &str {
        &self.nan_string
    }

    #[must_use]
    pub fn inf_string(&self) -> &str {
        &self.inf_string
    }

    #[must_use]
    pub fn infinity_string(&self) -> &str {
        &self.infinity_string
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for an out-of-range radix, a
    /// malformed special-value spelling, or `incorrect` combined with `lossy`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn build(&self) -> Result<ParseFloatOptions> {
        check_radix("radix", self.radix)?;
        check_radix("exponent base", self.exponent_base)?;
        check_radix("exponent radix", self.exponent_radix)?;
        check_nan(&self.nan_string)?;
        check_inf(&self.inf_string)?;
        check_infinity(&self.infinity_string, &self.inf_string)?;
        if self.incorrect && self.lossy {
            return Err(Error::invalid_options(
                "incorrect and lossy parsers are mutually exclusive",
            ));
        }
        Ok(ParseFloatOptions {
            radix: u32::from(self.radix),
            exponent_base: u32::from(self.exponent_base),
            exponent_radix: u32::from(self.exponent_radix),
            format: self.format,
            rounding: self.rounding,
            incorrect: self.incorrect,
            lossy: self.lossy,
            nan_string: self.nan_string.clone(),
            inf_string: self.inf_string.clone(),
            infinity_string: self.infinity_string.clone(),
        })
    }
}

impl TryFrom<ParseFloatOptionsBuilder> for ParseFloatOptions {
    type Error = Error;

    fn try_from(builder: ParseFloatOptionsBuilder) -> Result<Self> {
        builder.build()
    }
}

impl Default for ParseFloatOptions {
    fn default() -> Self {
        ParseFloatOptions::decimal()
    }
}

impl ParseFloatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ParseFloatOptionsBuilder {
        ParseFloatOptionsBuilder::new()
    }

    fn with_base(radix: u32) -> Self {
        ParseFloatOptions {
            radix,
            exponent_base: radix,
            exponent_radix: radix,
            format: presets::STANDARD,
            rounding: RoundingKind::default(),
            incorrect: false,
            lossy: false,
            nan_string: DEFAULT_NAN_STRING.to_string(),
            inf_string: DEFAULT_INF_STRING.to_string(),
            infinity_string: DEFAULT_INFINITY_STRING.to_string(),
        }
    }

    #[must_use]
    pub fn decimal() -> Self {
        Self::with_base(10)
    }

    #[must_use]
    pub fn binary() -> Self {
        Self::with_base(2)
    }

    #[must_use]
    pub fn hexadecimal() -> Self {
        Self::with_base(16)
    }

    #[must_use]
    pub fn rebuild(&self) -> ParseFloatOptionsBuilder {
        ParseFloatOptionsBuilder {
            radix: self.radix as u8,
            exponent_base: self.exponent_base as u8,
            exponent_radix: self.exponent_radix as u8,
            format: self.format,
            rounding: self.rounding,
            incorrect: self.incorrect,
            lossy: self.lossy,
            nan_string: self.nan_string.clone(),
            inf_string: self.inf_string.clone(),
            infinity_string: self.infinity_string.clone(),
        }
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }

    #[must_use]
    pub fn exponent_base(&self) -> u32 {
        self.exponent_base
    }

    #[must_use]
    pub fn exponent_radix(&self) -> u32 {
        self.exponent_radix
    }

    #[must_use]
    pub fn format(&self) -> NumberFormat {
        self.format
    }

    #[must_use]
    pub fn rounding(&self) -> RoundingKind {
        self.rounding
    }

    #[must_use]
    pub fn incorrect(&self) -> bool {
        self.incorrect
    }

    #[must_use]
    pub fn lossy(&self) -> bool {
        self.lossy
    }

    #[must_use]
    pub fn nan_string(&self) -> &str {
        &self.nan_string
    }

    #[must_use]
    pub fn inf_string(&self) -> &str {
        &self.inf_string
    }

    #[must_use]
    pub fn infinity_string(&self) -> &str {
        &self.infinity_string
    }

    /// Packs radix, exponent base, exponent radix, rounding and the parser
    /// selection into the native `u32` word.
    #[must_use]
    pub fn compressed(&self) -> u32 {
        self.radix
            | (self.exponent_base << 8)
            | (self.exponent_radix << 16)
            | (self.rounding.as_u32() << 24)
            | (u32::from(self.incorrect) << 28)
            | (u32::from(self.lossy) << 29)
    }
}

/// Native layout of [`ParseFloatOptions`].
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawParseFloatOptions<'a> {
    pub compressed: u32,
    pub format: u64,
    pub nan_string_ptr: *const u8,
    pub nan_string_size: usize,
    pub inf_string_ptr: *const u8,
    pub inf_string_size: usize,
    pub infinity_string_ptr: *const u8,
    pub infinity_string_size: usize,
    _strings: PhantomData<&'a str>,
}

impl NativeOptions for ParseFloatOptions {
    type Raw<'a> = RawParseFloatOptions<'a>;

    fn lower(&self) -> RawParseFloatOptions<'_> {
        RawParseFloatOptions {
            compressed: self.compressed(),
            format: self.format.bits(),
            nan_string_ptr: self.nan_string.as_ptr(),
            nan_string_size: self.nan_string.len(),
            inf_string_ptr: self.inf_string.as_ptr(),
            inf_string_size: self.inf_string.len(),
            infinity_string_ptr: self.infinity_string.as_ptr(),
            infinity_string_size: self.infinity_string.len(),
            _strings: PhantomData,
        }
    }

    fn radix(&self) -> u32 {
        self.radix
    }

    fn requires(&self) -> Capabilities {
        Capabilities::none()
            .with_radix(requires_radix(&[self.radix, self.exponent_base, self.exponent_radix]))
            .with_format(self.format != presets::STANDARD)
            .with_rounding(self.rounding != RoundingKind::default())
    }

    fn from_radix(radix: u8) -> Result<Self> {
        ParseFloatOptions::builder()
            .with_radix(radix)
            .with_exponent_base(radix)
            .with_exponent_radix(radix)
            .build()
    }

    fn from_format(format: NumberFormat) -> Result<Self> {
        ParseFloatOptions::builder().with_format(format).build()
    }

    fn check_buffer(&self, limit: usize) -> Result<()> {
        check_length("nan string", &self.nan_string, limit)?;
        check_length("inf string", &self.inf_string, limit)?;
        check_length("infinity string", &self.infinity_string, limit)
    }
}

// WRITE INTEGER

/// Options to customize writing integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WriteIntegerOptionsBuilder")]
pub struct WriteIntegerOptions {
    radix: u32,
}

/// Builder for [`WriteIntegerOptions`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteIntegerOptionsBuilder {
    radix: u8,
}

impl Default for WriteIntegerOptionsBuilder {
    fn default() -> Self {
        WriteIntegerOptionsBuilder {
            radix: DEFAULT_RADIX,
        }
    }
}

impl WriteIntegerOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_radix(mut self, radix: u8) -> Self {
        self.radix = radix;
        self
    }

    #[must_use]
    pub fn radix(&self) -> u8 {
        self.radix
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the radix is outside `2..=36`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn build(&self) -> Result<WriteIntegerOptions> {
        check_radix("radix", self.radix)?;
        Ok(WriteIntegerOptions {
            radix: u32::from(self.radix),
        })
    }
}

impl TryFrom<WriteIntegerOptionsBuilder> for WriteIntegerOptions {
    type Error = Error;

    fn try_from(builder: WriteIntegerOptionsBuilder) -> Result<Self> {
        builder.build()
    }
}

impl Default for WriteIntegerOptions {
    fn default() -> Self {
        WriteIntegerOptions::decimal()
    }
}

impl WriteIntegerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> WriteIntegerOptionsBuilder {
        WriteIntegerOptionsBuilder::new()
    }

    #[must_use]
    pub const fn decimal() -> Self {
        WriteIntegerOptions { radix: 10 }
    }

    #[must_use]
    pub const fn binary() -> Self {
        WriteIntegerOptions { radix: 2 }
    }

    #[must_use]
    pub const fn hexadecimal() -> Self {
        WriteIntegerOptions { radix: 16 }
    }

    #[must_use]
    pub fn rebuild(&self) -> WriteIntegerOptionsBuilder {
        WriteIntegerOptionsBuilder {
            radix: self.radix as u8,
        }
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }
}

/// Native layout of [`WriteIntegerOptions`].
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawWriteIntegerOptions {
    pub radix: u32,
}

impl NativeOptions for WriteIntegerOptions {
    type Raw<'a> = RawWriteIntegerOptions;

    fn lower(&self) -> RawWriteIntegerOptions {
        RawWriteIntegerOptions { radix: self.radix }
    }

    fn radix(&self) -> u32 {
        self.radix
    }

    fn requires(&self) -> Capabilities {
        Capabilities::none().with_radix(requires_radix(&[self.radix]))
    }

    fn from_radix(radix: u8) -> Result<Self> {
        WriteIntegerOptions::builder().with_radix(radix).build()
    }

    fn from_format(_format: NumberFormat) -> Result<Self> {
        Err(Error::invalid_options("integer writers take no number format"))
    }
}

// WRITE FLOAT

/// Options to customize writing floats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WriteFloatOptionsBuilder")]
pub struct WriteFloatOptions {
    radix: u32,
    format: Option<NumberFormat>,
    trim_floats: bool,
    nan_string: String,
    inf_string: String,
}

/// Builder for [`WriteFloatOptions`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteFloatOptionsBuilder {
    radix: u8,
    format: Option<NumberFormat>,
    trim_floats: bool,
    nan_string: String,
    inf_string: String,
}

impl Default for WriteFloatOptionsBuilder {
    fn default() -> Self {
        WriteFloatOptionsBuilder {
            radix: DEFAULT_RADIX,
            format: None,
            trim_floats: false,
            nan_string: DEFAULT_NAN_STRING.to_string(),
            inf_string: DEFAULT_INF_STRING.to_string(),
        }
    }
}

impl WriteFloatOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_radix(mut self, radix: u8) -> Self {
        self.radix = radix;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Option<NumberFormat>) -> Self {
        self.format = format;
        self
    }

    /// Drop the trailing `.0` from integral floats.
    #[must_use]
    pub fn with_trim_floats(mut self, trim_floats: bool) -> Self {
        self.trim_floats = trim_floats;
        self
    }

    #[must_use]
    pub fn with_nan_string(mut self, value: impl Into<String>) -> Self {
        self.nan_string = value.into();
        self
    }

    #[must_use]
    pub fn with_inf_string(mut self, value: impl Into<String>) -> Self {
        self.inf_string = value.into();
        self
    }

    #[must_use]
    pub fn radix(&self) -> u8 {
        self.radix
    }

    #[must_use]
    pub fn format(&self) -> Option<NumberFormat> {
        self.format
    }

    #[must_use]
    pub fn trim_floats(&self) -> bool {
        self.trim_floats
    }

    #[must_use]
    pub fn nan_string(&self) -> &str {
        &self.nan_string
    }

    #[must_use]
    pub fn inf_string(&self) -> &str {
        &self.inf_string
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for an out-of-range radix or a
    /// malformed special-value spelling.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn build(&self) -> Result<WriteFloatOptions> {
        check_radix("radix", self.radix)?;
        check_nan(&self.nan_string)?;
        check_inf(&self.inf_string)?;
        Ok(WriteFloatOptions {
            radix: u32::from(self.radix),
            format: self.format,
            trim_floats: self.trim_floats,
            nan_string: self.nan_string.clone(),
            inf_string: self.inf_string.clone(),
        })
    }
}

impl TryFrom<WriteFloatOptionsBuilder> for WriteFloatOptions {
    type Error = Error;

    fn try_from(builder: WriteFloatOptionsBuilder) -> Result<Self> {
        builder.build()
    }
}

impl Default for WriteFloatOptions {
    fn default() -> Self {
        WriteFloatOptions::decimal()
    }
}

impl WriteFloatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> WriteFloatOptionsBuilder {
        WriteFloatOptionsBuilder::new()
    }

    fn with_base(radix: u32) -> Self {
        WriteFloatOptions {
            radix,
            format: None,
            trim_floats: false,
            nan_string: DEFAULT_NAN_STRING.to_string(),
            inf_string: DEFAULT_INF_STRING.to_string(),
        }
    }

    #[must_use]
    pub fn decimal() -> Self {
        Self::with_base(10)
    }

    #[must_use]
    pub fn binary() -> Self {
        Self::with_base(2)
    }

    #[must_use]
    pub fn hexadecimal() -> Self {
        Self::with_base(16)
    }

    #[must_use]
    pub fn rebuild(&self) -> WriteFloatOptionsBuilder {
        WriteFloatOptionsBuilder {
            radix: self.radix as u8,
            format: self.format,
            trim_floats: self.trim_floats,
            nan_string: self.nan_string.clone(),
            inf_string: self.inf_string.clone(),
        }
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }

    #[must_use]
    pub fn format(&self) -> Option<NumberFormat> {
        self.format
    }

    #[must_use]
    pub fn trim_floats(&self) -> bool {
        self.trim_floats
    }

    #[must_use]
    pub fn nan_string(&self) -> &str {
        &self.nan_string
    }

    #[must_use]
    pub fn inf_string(&self) -> &str {
        &self.inf_string
    }

    /// Packs radix and trimming into the native `u32` word.
    #[must_use]
    pub fn compressed(&self) -> u32 {
        self.radix | (u32::from(self.trim_floats) << 8)
    }
}

/// Native layout of [`WriteFloatOptions`].
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawWriteFloatOptions<'a> {
    pub compressed: u32,
    pub format: RawOption<u64>,
    pub nan_string_ptr: *const u8,
    pub nan_string_size: usize,
    pub inf_string_ptr: *const u8,
    pub inf_string_size: usize,
    _strings: PhantomData<&'a str>,
}

impl NativeOptions for WriteFloatOptions {
    type Raw<'a> = RawWriteFloatOptions<'a>;

    fn lower(&self) -> RawWriteFloatOptions<'_> {
        RawWriteFloatOptions {
            compressed: self.compressed(),
            format: self.format.map(NumberFormat::bits).into(),
            nan_string_ptr: self.nan_string.as_ptr(),
            nan_string_size: self.nan_string.len(),
            inf_string_ptr: self.inf_string.as_ptr(),
            inf_string_size: self.inf_string.len(),
            _strings: PhantomData,
        }
    }

    fn radix(&self) -> u32 {
        self.radix
    }

    fn requires(&self) -> Capabilities {
        Capabilities::none()
            .with_radix(requires_radix(&[self.radix]))
            .with_format(self.format.is_some())
    }

    fn from_radix(radix: u8) -> Result<Self> {
        WriteFloatOptions::builder().with_radix(radix).build()
    }

    fn from_format(format: NumberFormat) -> Result<Self> {
        WriteFloatOptions::builder().with_format(Some(format)).build()
    }

    fn check_buffer(&self, limit: usize) -> Result<()> {
        check_length("nan string", &self.nan_string, limit)?;
        check_length("inf string", &self.inf_string, limit)
    }
}
