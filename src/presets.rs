//! Named number formats for common languages and data formats.
//!
//! Every preset is evaluated at compile time through the same validation as
//! [`NumberFormatBuilder::build`]; an invalid preset does not compile.
//!
//! ```rust
//! use lexical_bridge::presets;
//!
//! assert!(presets::JSON.no_special());
//! assert_eq!(presets::RUST_LITERAL.digit_separator(), b'_');
//! assert_eq!(presets::STANDARD, presets::RUST_STRING);
//! ```

use crate::format::{NumberFormat, NumberFormatBuilder};

const fn base() -> NumberFormatBuilder {
    NumberFormatBuilder::new()
}

const fn required_exponent() -> NumberFormatBuilder {
    base().with_required_exponent_digits(true)
}

/// No restrictions beyond the default punctuation.
pub const PERMISSIVE: NumberFormat = base().build_const();

/// Accepts digit separators anywhere, with no separator character.
pub const IGNORE: NumberFormat = base()
    .with_internal_digit_separator(true)
    .with_leading_digit_separator(true)
    .with_trailing_digit_separator(true)
    .with_consecutive_digit_separator(true)
    .with_special_digit_separator(true)
    .build_const();

/// Rust float literal.
pub const RUST_LITERAL: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_digits(true)
    .with_no_positive_mantissa_sign(true)
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .with_trailing_digit_separator(true)
    .with_consecutive_digit_separator(true)
    .build_const();

/// Rust float parsed from a string.
pub const RUST_STRING: NumberFormat = required_exponent().build_const();

/// [`RUST_STRING`], with case-sensitive special values.
pub const RUST_STRING_STRICT: NumberFormat = required_exponent()
    .with_case_sensitive_special(true)
    .build_const();

/// Format used when none is given.
pub const STANDARD: NumberFormat = RUST_STRING;

pub const PYTHON3_LITERAL: NumberFormat = required_exponent()
    .with_no_special(true)
    .with_no_integer_leading_zeros(true)
    .build_const();

pub const PYTHON3_STRING: NumberFormat = required_exponent().build_const();

pub const PYTHON_LITERAL: NumberFormat = PYTHON3_LITERAL;
pub const PYTHON_STRING: NumberFormat = PYTHON3_STRING;

/// C++17 literal, with `'` as the digit separator.
pub const CXX17_LITERAL: NumberFormat = required_exponent()
    .with_digit_separator(b'\'')
    .with_case_sensitive_special(true)
    .with_internal_digit_separator(true)
    .build_const();

pub const CXX17_STRING: NumberFormat = required_exponent().build_const();

pub const CXX_LITERAL: NumberFormat = CXX17_LITERAL;
pub const CXX_STRING: NumberFormat = CXX17_STRING;

pub const C18_LITERAL: NumberFormat = required_exponent()
    .with_case_sensitive_special(true)
    .build_const();

pub const C18_STRING: NumberFormat = required_exponent().build_const();

pub const C_LITERAL: NumberFormat = C18_LITERAL;
pub const C_STRING: NumberFormat = C18_STRING;

pub const RUBY_LITERAL: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_digits(true)
    .with_no_special(true)
    .with_no_float_leading_zeros(true)
    .with_internal_digit_separator(true)
    .build_const();

pub const RUBY_STRING: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .build_const();

pub const SWIFT_LITERAL: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_digits(true)
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .with_trailing_digit_separator(true)
    .with_consecutive_digit_separator(true)
    .build_const();

pub const SWIFT_STRING: NumberFormat = base().with_required_fraction_digits(true).build_const();

pub const GO_LITERAL: NumberFormat = base()
    .with_required_fraction_digits(true)
    .with_no_special(true)
    .build_const();

pub const GO_STRING: NumberFormat = base().with_required_fraction_digits(true).build_const();

pub const HASKELL_LITERAL: NumberFormat = base()
    .with_required_digits(true)
    .with_no_positive_mantissa_sign(true)
    .with_no_special(true)
    .build_const();

pub const HASKELL_STRING: NumberFormat = base()
    .with_required_digits(true)
    .with_no_positive_mantissa_sign(true)
    .with_case_sensitive_special(true)
    .build_const();

pub const JAVASCRIPT_LITERAL: NumberFormat = required_exponent()
    .with_case_sensitive_special(true)
    .with_no_float_leading_zeros(true)
    .build_const();

pub const JAVASCRIPT_STRING: NumberFormat = base().with_case_sensitive_special(true).build_const();

pub const JAVA_LITERAL: NumberFormat = required_exponent()
    .with_digit_separator(b'_')
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .with_consecutive_digit_separator(true)
    .build_const();

pub const JAVA_STRING: NumberFormat = required_exponent()
    .with_case_sensitive_special(true)
    .build_const();

pub const ELIXIR_LITERAL: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_digits(true)
    .with_no_exponent_without_fraction(true)
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .build_const();

pub const OCAML_LITERAL: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_integer_digits(true)
    .with_required_exponent_digits(true)
    .with_no_positive_mantissa_sign(true)
    .with_case_sensitive_special(true)
    .with_internal_digit_separator(true)
    .with_fraction_leading_digit_separator(true)
    .with_trailing_digit_separator(true)
    .with_consecutive_digit_separator(true)
    .build_const();

pub const D_STRING: NumberFormat = required_exponent()
    .with_digit_separator(b'_')
    .with_integer_internal_digit_separator(true)
    .with_fraction_internal_digit_separator(true)
    .with_integer_trailing_digit_separator(true)
    .with_fraction_trailing_digit_separator(true)
    .build_const();

/// Strict JSON numbers: no `+`, no specials, no leading zeros.
pub const JSON: NumberFormat = base()
    .with_required_digits(true)
    .with_no_positive_mantissa_sign(true)
    .with_no_special(true)
    .with_no_integer_leading_zeros(true)
    .with_no_float_leading_zeros(true)
    .build_const();

/// TOML floats, with `_` between digits.
pub const TOML: NumberFormat = base()
    .with_digit_separator(b'_')
    .with_required_digits(true)
    .with_no_special(true)
    .with_internal_digit_separator(true)
    .with_no_float_leading_zeros(true)
    .build_const();

pub const YAML: NumberFormat = JSON;

pub const XML: NumberFormat = base().with_case_sensitive_special(true).build_const();

pub const SQLITE: NumberFormat = required_exponent().with_no_special(true).build_const();
pub const POSTGRESQL: NumberFormat = SQLITE;
pub const MYSQL: NumberFormat = SQLITE;

pub const MONGODB: NumberFormat = required_exponent()
    .with_case_sensitive_special(true)
    .build_const();

/// Every preset with its name.
pub const ALL: &[(&str, NumberFormat)] = &[
    ("permissive", PERMISSIVE),
    ("ignore", IGNORE),
    ("standard", STANDARD),
    ("rust_literal", RUST_LITERAL),
    ("rust_string", RUST_STRING),
    ("rust_string_strict", RUST_STRING_STRICT),
    ("python3_literal", PYTHON3_LITERAL),
    ("python3_string", PYTHON3_STRING),
    ("cxx17_literal", CXX17_LITERAL),
    ("cxx17_string", CXX17_STRING),
    ("c18_literal", C18_LITERAL),
    ("c18_string", C18_STRING),
    ("ruby_literal", RUBY_LITERAL),
    ("ruby_string", RUBY_STRING),
    ("swift_literal", SWIFT_LITERAL),
    ("swift_string", SWIFT_STRING),
    ("go_literal", GO_LITERAL),
    ("go_string", GO_STRING),
    ("haskell_literal", HASKELL_LITERAL),
    ("haskell_string", HASKELL_STRING),
    ("javascript_literal", JAVASCRIPT_LITERAL),
    ("javascript_string", JAVASCRIPT_STRING),
    ("java_literal", JAVA_LITERAL),
    ("java_string", JAVA_STRING),
    ("elixir_literal", ELIXIR_LITERAL),
    ("ocaml_literal", OCAML_LITERAL),
    ("d_string", D_STRING),
    ("json", JSON),
    ("toml", TOML),
    ("yaml", YAML),
    ("xml", XML),
    ("sqlite", SQLITE),
    ("postgresql", POSTGRESQL),
    ("mysql", MYSQL),
    ("mongodb", MONGODB),
];

/// Looks up a preset by its snake_case name.
#[must_use]
pub fn by_name(name: &str) -> Option<NumberFormat> {
    ALL.iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, format)| *format)
}
