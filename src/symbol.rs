//! Names of native entry points.
//!
//! Every parse and write function follows one pattern:
//!
//! ```text
//! lexical_<verb><type>(_radix|_format|_format_radix)?(_partial)?(_lossy)?(_with_options)?
//! ```
//!
//! where parse functions read `ato<type>` and write functions read
//! `<type>toa`.
//!
//! ```rust
//! use lexical_bridge::symbol::{Modifier, SymbolName};
//!
//! let name = SymbolName::parse("f64")
//!     .with_modifier(Modifier::Radix)
//!     .with_partial(true)
//!     .with_lossy(true);
//! assert_eq!(name.to_string(), "lexical_atof64_radix_partial_lossy");
//! assert_eq!(SymbolName::write("u8").to_string(), "lexical_u8toa");
//! ```

use std::fmt;

/// Direction of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Parse,
    Write,
}

/// Capability-specific variant of an entry point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Modifier {
    #[default]
    None,
    Radix,
    Format,
    FormatRadix,
}

impl Modifier {
    const fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Radix => "_radix",
            Modifier::Format => "_format",
            Modifier::FormatRadix => "_format_radix",
        }
    }
}

/// Typed rendering of a native function name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolName {
    verb: Verb,
    stem: &'static str,
    modifier: Modifier,
    partial: bool,
    lossy: bool,
    with_options: bool,
}

impl SymbolName {
    #[must_use]
    pub const fn new(verb: Verb, stem: &'static str) -> Self {
        SymbolName {
            verb,
            stem,
            modifier: Modifier::None,
            partial: false,
            lossy: false,
            with_options: false,
        }
    }

    #[must_use]
    pub const fn parse(stem: &'static str) -> Self {
        Self::new(Verb::Parse, stem)
    }

    #[must_use]
    pub const fn write(stem: &'static str) -> Self {
        Self::new(Verb::Write, stem)
    }

    #[must_use]
    pub const fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Only meaningful for parse calls.
    #[must_use]
    pub const fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Only meaningful for float parse calls.
    #[must_use]
    pub const fn with_lossy(mut self, lossy: bool) -> Self {
        self.lossy = lossy;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, with_options: bool) -> Self {
        self.with_options = with_options;
        self
    }

    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    #[must_use]
    pub const fn stem(&self) -> &'static str {
        self.stem
    }

    #[must_use]
    pub const fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.partial
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verb {
            Verb::Parse => write!(f, "lexical_ato{}", self.stem)?,
            Verb::Write => write!(f, "lexical_{}toa", self.stem)?,
        }
        f.write_str(self.modifier.suffix())?;
        if self.partial {
            f.write_str("_partial")?;
        }
        if self.lossy {
            f.write_str("_lossy")?;
        }
        if self.with_options {
            f.write_str("_with_options")?;
        }
        Ok(())
    }
}
