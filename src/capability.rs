//! Capability descriptor of the loaded native library.
//!
//! Optional features of the native library (custom number formats, non-decimal
//! radixes, rounding modes, 128-bit integers) are announced by exported
//! marker symbols. They are probed exactly once, when the library is loaded,
//! and the resulting [`Descriptor`] is handed to every component that needs
//! it. Nothing re-probes per call.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::library::Symbols;
use crate::number::{STEMS, WIDE_STEMS};

/// Version of the [`Descriptor`] layout.
pub const DESCRIPTOR_VERSION: u32 = 1;

/// Symbol holding the size of the native scratch buffer.
pub const BUFFER_SIZE_SYMBOL: &str = "LEXICAL_BUFFER_SIZE";

/// One optional feature of the native library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Format,
    Radix,
    Rounding,
    I128,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Format,
        Capability::Radix,
        Capability::Rounding,
        Capability::I128,
    ];

    /// Name of the exported marker symbol.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Capability::Format => "LEXICAL_HAS_FORMAT",
            Capability::Radix => "LEXICAL_HAS_RADIX",
            Capability::Rounding => "LEXICAL_HAS_ROUNDING",
            Capability::I128 => "LEXICAL_HAS_I128",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Format => "format",
            Capability::Radix => "radix",
            Capability::Rounding => "rounding",
            Capability::I128 => "i128",
        })
    }
}

/// A set of capabilities, either available or required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub format: bool,
    pub radix: bool,
    pub rounding: bool,
    pub i128: bool,
}

impl Capabilities {
    #[must_use]
    pub const fn none() -> Self {
        Capabilities {
            format: false,
            radix: false,
            rounding: false,
            i128: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Capabilities {
            format: true,
            radix: true,
            rounding: true,
            i128: true,
        }
    }

    #[must_use]
    pub const fn with_format(mut self, value: bool) -> Self {
        self.format = value;
        self
    }

    #[must_use]
    pub const fn with_radix(mut self, value: bool) -> Self {
        self.radix = value;
        self
    }

    #[must_use]
    pub const fn with_rounding(mut self, value: bool) -> Self {
        self.rounding = value;
        self
    }

    #[must_use]
    pub const fn with_i128(mut self, value: bool) -> Self {
        self.i128 = value;
        self
    }

    #[must_use]
    pub const fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Format => self.format,
            Capability::Radix => self.radix,
            Capability::Rounding => self.rounding,
            Capability::I128 => self.i128,
        }
    }

    /// Reads every marker symbol once.
    #[must_use]
    pub fn probe(symbols: &Symbols) -> Self {
        Capabilities {
            format: symbols.has(Capability::Format.marker()),
            radix: symbols.has(Capability::Radix.marker()),
            rounding: symbols.has(Capability::Rounding.marker()),
            i128: symbols.has(Capability::I128.marker()),
        }
    }

    /// Whether any call variant beyond plain decimal is available.
    #[must_use]
    pub const fn is_extended(&self) -> bool {
        self.format || self.radix || self.rounding
    }

    /// First capability in `needed` that `self` lacks.
    #[must_use]
    pub fn missing(&self, needed: Capabilities) -> Option<Capability> {
        Capability::ALL
            .into_iter()
            .find(|&cap| needed.has(cap) && !self.has(cap))
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when `capability` is unavailable.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(Error::Unsupported(capability))
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] naming the first missing capability.
    pub fn require_all(&self, needed: Capabilities) -> Result<()> {
        match self.missing(needed) {
            Some(capability) => Err(Error::Unsupported(capability)),
            None => Ok(()),
        }
    }
}

/// Maximum output sizes for one numeric type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSize {
    /// Bound for any radix the library supports.
    pub radix: usize,
    /// Bound for decimal output.
    pub decimal: usize,
}

/// Published output bounds, keyed by type stem (`"i8"`, `"f64"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSizes {
    entries: BTreeMap<String, FormattedSize>,
    buffer_size: usize,
}

/// `LEXICAL_I8_FORMATTED_SIZE` and friends.
#[must_use]
pub fn size_symbol(stem: &str, decimal: bool) -> String {
    let mut name = format!("LEXICAL_{}_FORMATTED_SIZE", stem.to_ascii_uppercase());
    if decimal {
        name.push_str("_DECIMAL");
    }
    name
}

impl FormattedSizes {
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        FormattedSizes {
            entries: BTreeMap::new(),
            buffer_size,
        }
    }

    #[must_use]
    pub fn with_size(mut self, stem: &str, size: FormattedSize) -> Self {
        self.entries.insert(stem.to_string(), size);
        self
    }

    /// Reads every size static the library exports for its capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymbolNotFound`] when a required static is missing.
    pub fn read(symbols: &Symbols, capabilities: &Capabilities) -> Result<Self> {
        let mut sizes = FormattedSizes::new(symbols.read_usize(BUFFER_SIZE_SYMBOL)?);
        let wide: &[&str] = if capabilities.i128 { &WIDE_STEMS } else { &[] };
        for stem in STEMS.iter().chain(wide) {
            let size = FormattedSize {
                radix: symbols.read_usize(&size_symbol(stem, false))?,
                decimal: symbols.read_usize(&size_symbol(stem, true))?,
            };
            sizes.entries.insert((*stem).to_string(), size);
        }
        Ok(sizes)
    }

    #[must_use]
    pub fn get(&self, stem: &str) -> Option<FormattedSize> {
        self.entries.get(stem).copied()
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Output buffer length for a write of `stem` in `radix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when no size was published for `stem`.
    pub fn for_write(&self, stem: &str, radix: u32) -> Result<usize> {
        let size = self
            .get(stem)
            .ok_or_else(|| Error::InvalidArgument(format!("no formatted size for {}", stem)))?;
        Ok(if radix == 10 { size.decimal } else { size.radix })
    }
}

/// Everything resolved about the native library at load time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub version: u32,
    pub capabilities: Capabilities,
    pub sizes: FormattedSizes,
}

impl Descriptor {
    /// Probes capabilities and reads the size statics.
    ///
    /// # Errors
    ///
    /// Propagates missing size statics.
    pub fn resolve(symbols: &Symbols) -> Result<Self> {
        let capabilities = Capabilities::probe(symbols);
        let sizes = FormattedSizes::read(symbols, &capabilities)?;
        tracing::debug!(
            format = capabilities.format,
            radix = capabilities.radix,
            rounding = capabilities.rounding,
            i128 = capabilities.i128,
            buffer_size = sizes.buffer_size(),
            "resolved native capabilities"
        );
        Ok(Descriptor {
            version: DESCRIPTOR_VERSION,
            capabilities,
            sizes,
        })
    }
}
