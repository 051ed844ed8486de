use std::ffi::c_int;
use std::sync::atomic::{AtomicI32, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use lexical_bridge::capability::size_symbol;
use lexical_bridge::number::{STEMS, WIDE_STEMS};
use lexical_bridge::options::{
    RawParseFloatOptions, RawParseIntegerOptions, RawWriteIntegerOptions,
};
use lexical_bridge::tagged::{RawPartialResult, RawResult, Tuple};
use lexical_bridge::*;
use num_bigint::{BigInt, BigUint};

// Fake native library

fn scan(bytes: &[u8], radix: u32) -> std::result::Result<(i128, usize), NativeError> {
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let mut value: i128 = 0;
    let mut index = start;
    while index < bytes.len() {
        let Some(digit) = char::from(bytes[index]).to_digit(radix) else {
            break;
        };
        value = value
            .checked_mul(i128::from(radix))
            .and_then(|v| v.checked_add(i128::from(digit)))
            .ok_or(NativeError::new(ErrorCode::Overflow, index))?;
        index += 1;
    }
    if index == start {
        let code = if bytes.len() == start {
            ErrorCode::Empty
        } else {
            ErrorCode::InvalidDigit
        };
        return Err(NativeError::new(code, start));
    }
    Ok((if negative { -value } else { value }, index))
}

fn narrow<T: TryFrom<i128>>(value: i128) -> std::result::Result<T, NativeError> {
    T::try_from(value).map_err(|_| {
        let code = if value < 0 {
            ErrorCode::Underflow
        } else {
            ErrorCode::Overflow
        };
        NativeError::new(code, 0)
    })
}

fn parse_full<T: TryFrom<i128>>(bytes: &[u8], radix: u32) -> std::result::Result<T, NativeError> {
    let (value, consumed) = scan(bytes, radix)?;
    if consumed != bytes.len() {
        return Err(NativeError::new(ErrorCode::InvalidDigit, consumed));
    }
    narrow(value)
}

unsafe fn input<'a>(first: *const u8, last: *const u8) -> &'a [u8] {
    std::slice::from_raw_parts(first, last as usize - first as usize)
}

fn emit(text: &str, first: *mut u8, last: *mut u8) -> *mut u8 {
    if text.len() > last as usize - first as usize {
        return std::ptr::null_mut();
    }
    // SAFETY: checked against the buffer bounds above.
    unsafe {
        std::ptr::copy_nonoverlapping(text.as_ptr(), first, text.len());
        first.add(text.len())
    }
}

extern "C" fn atoi<T: TryFrom<i128> + Copy>(first: *const u8, last: *const u8) -> RawResult<T> {
    // SAFETY: the bridge passes the bounds of one live slice.
    let bytes = unsafe { input(first, last) };
    parse_full::<T>(bytes, 10).into()
}

extern "C" fn atoi_partial<T: TryFrom<i128> + Copy>(
    first: *const u8,
    last: *const u8,
) -> RawPartialResult<T> {
    // SAFETY: as above.
    let bytes = unsafe { input(first, last) };
    scan(bytes, 10)
        .and_then(|(value, consumed)| narrow::<T>(value).map(|v| Tuple::new(v, consumed)))
        .into()
}

extern "C" fn atoi_options<T: TryFrom<i128> + Copy>(
    first: *const u8,
    last: *const u8,
    options: RawParseIntegerOptions,
) -> RawResult<T> {
    // SAFETY: as above.
    let bytes = unsafe { input(first, last) };
    parse_full::<T>(bytes, options.radix).into()
}

extern "C" fn atof64(first: *const u8, last: *const u8) -> RawResult<f64> {
    // SAFETY: as above.
    let bytes = unsafe { input(first, last) };
    parse_float(bytes, b"NaN")
}

extern "C" fn atof64_options(
    first: *const u8,
    last: *const u8,
    options: RawParseFloatOptions<'_>,
) -> RawResult<f64> {
    // SAFETY: as above, and the options borrow live strings for the call.
    let (bytes, nan) = unsafe {
        (
            input(first, last),
            std::slice::from_raw_parts(options.nan_string_ptr, options.nan_string_size),
        )
    };
    parse_float(bytes, nan)
}

fn parse_float(bytes: &[u8], nan: &[u8]) -> RawResult<f64> {
    if bytes.is_empty() {
        return RawResult::err(NativeError::new(ErrorCode::Empty, 0));
    }
    if bytes == nan {
        return RawResult::ok(f64::NAN);
    }
    match std::str::from_utf8(bytes).ok().and_then(|s| s.parse::<f64>().ok()) {
        Some(value) => RawResult::ok(value),
        None => RawResult::err(NativeError::new(ErrorCode::InvalidDigit, 0)),
    }
}

extern "C" fn itoa<T: ToString + Copy>(value: T, first: *mut u8, last: *mut u8) -> *mut u8 {
    emit(&value.to_string(), first, last)
}

extern "C" fn u64toa_options(
    value: u64,
    first: *mut u8,
    last: *mut u8,
    options: RawWriteIntegerOptions,
) -> *mut u8 {
    let text = match options.radix {
        2 => format!("{:b}", value),
        8 => format!("{:o}", value),
        16 => format!("{:X}", value),
        _ => value.to_string(),
    };
    emit(&text, first, last)
}

static RADIX_SIZE: usize = 128;
static DECIMAL_SIZE: usize = 48;
static BUFFER_SIZE: usize = 1024;

fn table(extended: bool) -> SymbolTable {
    let mut table = SymbolTable::new().with_static("LEXICAL_BUFFER_SIZE", &BUFFER_SIZE);
    for stem in STEMS.iter().chain(WIDE_STEMS.iter()) {
        table = table
            .with_static(&size_symbol(stem, false), &RADIX_SIZE)
            .with_static(&size_symbol(stem, true), &DECIMAL_SIZE);
    }
    table = table
        .with_function("lexical_atoi8", atoi::<i8> as *const ())
        .with_function("lexical_atoi32", atoi::<i32> as *const ())
        .with_function("lexical_atoi32_partial", atoi_partial::<i32> as *const ())
        .with_function("lexical_atoi32_with_options", atoi_options::<i32> as *const ())
        .with_function("lexical_atou64", atoi::<u64> as *const ())
        .with_function("lexical_atou128", atoi::<u128> as *const ())
        .with_function("lexical_atoi128", atoi::<i128> as *const ())
        .with_function("lexical_atof64", atof64 as *const ())
        .with_function("lexical_atof64_with_options", atof64_options as *const ())
        .with_function("lexical_u64toa", itoa::<u64> as *const ())
        .with_function("lexical_u64toa_with_options", u64toa_options as *const ())
        .with_function("lexical_i8toa", itoa::<i8> as *const ())
        .with_function("lexical_u128toa", itoa::<u128> as *const ())
        .with_function("lexical_i128toa", itoa::<i128> as *const ())
        .with_function("lexical_f64toa", itoa::<f64> as *const ());
    if extended {
        table = table
            .with_marker("LEXICAL_HAS_RADIX")
            .with_marker("LEXICAL_HAS_FORMAT")
            .with_marker("LEXICAL_HAS_I128");
    }
    table
}

fn bridge(extended: bool) -> Bridge {
    // SAFETY: every registered symbol has the signature its name implies.
    unsafe { Bridge::from_source(Arc::new(table(extended))) }.unwrap()
}

// End-to-end scenarios

#[test]
fn test_decimal_preset_has_no_separator() {
    assert_eq!(presets::STANDARD.digit_separator(), 0);
    let format = NumberFormatBuilder::new().build().unwrap();
    assert_eq!(format.digit_separator(), 0);
}

#[test]
fn test_parse_i8() {
    let bridge = bridge(false);
    assert_eq!(bridge.parse::<i8>(b"10").unwrap(), 10);
    assert_eq!(bridge.parse::<i8>(b"-128").unwrap(), -128);
}

#[test]
fn test_parse_partial_stops_at_trailing_bytes() {
    let bridge = bridge(false);
    assert_eq!(bridge.parse_partial::<i32>(b"10a").unwrap(), (10, 2));
    assert_eq!(bridge.parse_partial::<i32>(b"10").unwrap(), (10, 2));
}

#[test]
fn test_parse_empty() {
    let bridge = bridge(true);
    let errors = [
        bridge.parse::<i8>(b"").unwrap_err(),
        bridge.parse_partial::<i32>(b"").unwrap_err(),
        bridge.parse::<f64>(b"").unwrap_err(),
        bridge
            .parse_with_options::<i32>(b"", &ParseIntegerOptions::binary())
            .unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.code(), Some(ErrorCode::Empty));
        assert_eq!(err.index(), Some(0));
        assert!(!err.is_local());
    }
}

#[test]
fn test_native_errors_carry_index() {
    let bridge = bridge(false);
    let err = bridge.parse::<i8>(b"12x4").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidDigit));
    assert_eq!(err.index(), Some(2));

    let err = bridge.parse::<i8>(b"128").unwrap_err();
    assert!(err.code().unwrap().is_overflow());
}

#[test]
fn test_write_radix() {
    let bridge = bridge(true);
    let extended = bridge.as_extended().unwrap();
    assert_eq!(extended.write_radix(&10u64, 2).unwrap(), "1010");
    assert_eq!(extended.write_radix(&10u64, 16).unwrap(), "A");
    assert_eq!(
        bridge
            .write_with_options(&10u64, &WriteIntegerOptions::binary())
            .unwrap(),
        "1010"
    );
    assert_eq!(bridge.write(&10u64).unwrap(), "10");
}

#[test]
fn test_parse_radix() {
    let bridge = bridge(true);
    let extended = bridge.as_extended().unwrap();
    assert_eq!(extended.parse_radix::<i32>(b"1010", 2).unwrap(), 10);
    assert_eq!(extended.parse_radix::<i32>(b"ff", 16).unwrap(), 255);
    let err = extended.parse_radix::<i32>(b"12", 2).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidDigit));
    assert_eq!(err.index(), Some(1));
}

#[test]
fn test_wide_values_wrap() {
    let bridge = bridge(true);
    let big = BigUint::from(1u8) << 128usize;
    assert_eq!(bridge.write(&big).unwrap(), "0");
    assert_eq!(WideUInt128::from_biguint(&big).to_biguint(), BigUint::from(0u8));

    let value: BigUint = bridge.parse(b"12345").unwrap();
    assert_eq!(value, BigUint::from(12345u32));
    let value: BigInt = bridge.parse(b"-12345").unwrap();
    assert_eq!(value, BigInt::from(-12345));
    assert_eq!(bridge.write(&u128::MAX).unwrap(), u128::MAX.to_string());
}

#[test]
fn test_minimal_bridge_gates_before_calling() {
    let bridge = bridge(false);
    assert!(!bridge.is_extended());
    assert_eq!(bridge.capabilities(), Capabilities::none());

    let err = bridge
        .write_with_options(&10u64, &WriteIntegerOptions::binary())
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported(Capability::Radix)));
    assert!(err.is_local());

    let err = bridge.parse::<u128>(b"1").unwrap_err();
    assert!(matches!(err, Error::Unsupported(Capability::I128)));

    let options = ParseIntegerOptions::builder()
        .with_format(Some(presets::JSON))
        .build()
        .unwrap();
    let err = bridge.parse_with_options::<i32>(b"1", &options).unwrap_err();
    assert!(matches!(err, Error::Unsupported(Capability::Format)));
}

#[test]
fn test_float_options_cross_boundary() {
    let bridge = bridge(false);
    let options = ParseFloatOptions::builder()
        .with_nan_string("nan")
        .build()
        .unwrap();
    assert!(bridge.parse_with_options::<f64>(b"nan", &options).unwrap().is_nan());
    assert!(bridge.parse_with_options::<f64>(b"nan!", &options).is_err());
    assert!(bridge.parse::<f64>(b"NaN").unwrap().is_nan());
    assert_eq!(bridge.parse::<f64>(b"1.5").unwrap(), 1.5);
    assert_eq!(bridge.write(&1.5f64).unwrap(), "1.5");
}

#[test]
fn test_missing_entry_point() {
    let bridge = bridge(false);
    assert!(matches!(bridge.parse::<u16>(b"1"), Err(Error::SymbolNotFound(_))));
}

#[test]
fn test_descriptor() {
    let bridge = bridge(true);
    let descriptor = bridge.descriptor();
    assert!(descriptor.capabilities.radix);
    assert!(descriptor.capabilities.format);
    assert!(!descriptor.capabilities.rounding);
    assert_eq!(descriptor.sizes.buffer_size(), 1024);
    assert_eq!(descriptor.sizes.for_write("u128", 10).unwrap(), 48);
    assert_eq!(descriptor.sizes.for_write("u64", 2).unwrap(), 128);

    let json = serde_json::to_string(descriptor).unwrap();
    let back: Descriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, descriptor);
}

#[test]
fn test_missing_size_static() {
    let table = SymbolTable::new().with_function("lexical_atoi8", atoi::<i8> as *const ());
    // SAFETY: the only registered function has the signature its name implies.
    let result = unsafe { Bridge::from_source(Arc::new(table)) };
    assert!(matches!(result, Err(Error::SymbolNotFound(_))));
}

// Fake native configuration

static EXPONENT_DEFAULT: AtomicU8 = AtomicU8::new(b'e');
static EXPONENT_BACKUP: AtomicU8 = AtomicU8::new(b'^');
static ROUNDING: AtomicI32 = AtomicI32::new(0);
static NAN_PTR: AtomicUsize = AtomicUsize::new(0);
static NAN_LEN: AtomicUsize = AtomicUsize::new(0);

extern "C" fn get_nan(ptr: *mut *const u8, size: *mut usize) -> c_int {
    let (addr, len) = match NAN_PTR.load(Ordering::SeqCst) {
        0 => (b"NaN".as_ptr() as usize, 3),
        addr => (addr, NAN_LEN.load(Ordering::SeqCst)),
    };
    // SAFETY: the bridge passes valid out-pointers.
    unsafe {
        *ptr = addr as *const u8;
        *size = len;
    }
    0
}

extern "C" fn set_nan(ptr: *const u8, size: usize) -> c_int {
    NAN_LEN.store(size, Ordering::SeqCst);
    NAN_PTR.store(ptr as usize, Ordering::SeqCst);
    0
}

extern "C" fn get_inf(ptr: *mut *const u8, size: *mut usize) -> c_int {
    // SAFETY: as above.
    unsafe {
        *ptr = b"inf".as_ptr();
        *size = 3;
    }
    0
}

extern "C" fn get_infinity(ptr: *mut *const u8, size: *mut usize) -> c_int {
    // SAFETY: as above.
    unsafe {
        *ptr = b"infinity".as_ptr();
        *size = 8;
    }
    0
}

extern "C" fn set_rejected(_ptr: *const u8, _size: usize) -> c_int {
    1
}

#[test]
fn test_native_config() {
    let table = table(false)
        .with_marker("LEXICAL_HAS_ROUNDING")
        .with_function("get_nan_string_ffi", get_nan as *const ())
        .with_function("set_nan_string_ffi", set_nan as *const ())
        .with_function("get_inf_string_ffi", get_inf as *const ())
        .with_function("set_inf_string_ffi", set_rejected as *const ())
        .with_function("get_infinity_string_ffi", get_infinity as *const ())
        .with_function("set_infinity_string_ffi", set_rejected as *const ())
        .with_static("EXPONENT_DEFAULT_CHAR", &EXPONENT_DEFAULT)
        .with_static("EXPONENT_BACKUP_CHAR", &EXPONENT_BACKUP)
        .with_static("FLOAT_ROUNDING", &ROUNDING);
    // SAFETY: every registered symbol has the type its name implies.
    let bridge = unsafe { Bridge::from_source(Arc::new(table)) }.unwrap();
    let mut config = native_config(&bridge).unwrap();

    assert_eq!(config.initial().nan_string, "NaN");
    assert_eq!(config.initial().exponent_backup, None);
    assert_eq!(config.initial().rounding, Some(RoundingKind::NearestTieEven));

    config
        .scoped(|cfg| {
            cfg.set_nan_string("nan").unwrap();
            cfg.set_exponent_default(b'E').unwrap();
            cfg.set_rounding(RoundingKind::TowardZero).unwrap();
            assert_eq!(cfg.nan_string().unwrap(), "nan");
            assert_eq!(EXPONENT_DEFAULT.load(Ordering::SeqCst), b'E');
            assert_eq!(ROUNDING.load(Ordering::SeqCst), 4);
        })
        .unwrap_err();

    // Restoring the inf strings fails because the fake setter rejects them.
    assert_eq!(config.nan_string().unwrap(), "nan");
    assert!(matches!(config.set_inf_string("INF"), Err(Error::Config(_))));
    assert!(matches!(
        config.set_exponent_backup(b'p'),
        Err(Error::Unsupported(Capability::Radix))
    ));

    config.set_nan_string("NaN").unwrap();
    config.set_exponent_default(b'e').unwrap();
    config.set_rounding(RoundingKind::NearestTieEven).unwrap();
    assert_eq!(EXPONENT_DEFAULT.load(Ordering::SeqCst), b'e');
    assert_eq!(ROUNDING.load(Ordering::SeqCst), 0);
}

static SMALL_BUFFER_SIZE: usize = 8;

#[test]
fn test_published_buffer_size_bounds_spellings() {
    let table = table(false)
        .with_static("LEXICAL_BUFFER_SIZE", &SMALL_BUFFER_SIZE)
        .with_function("get_nan_string_ffi", get_nan as *const ())
        .with_function("set_nan_string_ffi", set_rejected as *const ())
        .with_function("get_inf_string_ffi", get_inf as *const ())
        .with_function("get_infinity_string_ffi", get_infinity as *const ())
        .with_static("EXPONENT_DEFAULT_CHAR", &EXPONENT_DEFAULT);
    // SAFETY: every registered symbol has the type its name implies.
    let bridge = unsafe { Bridge::from_source(Arc::new(table)) }.unwrap();
    assert_eq!(bridge.descriptor().sizes.buffer_size(), 8);

    let options = ParseFloatOptions::builder()
        .with_nan_string("nan_value")
        .build()
        .unwrap();
    let err = bridge
        .parse_with_options::<f64>(b"nan_value", &options)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)));
    let value = bridge
        .parse_with_options::<f64>(b"1.5", &ParseFloatOptions::decimal())
        .unwrap();
    assert_eq!(value, 1.5);

    let mut config = native_config(&bridge).unwrap();
    match config.set_nan_string("nan_value") {
        Err(Error::Config(message)) => assert!(message.contains("longer than 8 bytes"), "{}", message),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_memory_config_scoped() {
    let mut config = Config::init(Box::new(MemoryConfig::default())).unwrap();
    let nan = config
        .scoped(|cfg| {
            cfg.set_nan_string("nan").unwrap();
            cfg.nan_string().unwrap()
        })
        .unwrap();
    assert_eq!(nan, "nan");
    assert_eq!(config.nan_string().unwrap(), "NaN");
}

#[test]
fn test_loader_config_serde() {
    let config = LoaderConfig::new()
        .with_suffixes(&["so"])
        .with_search_path("/opt/lexical");
    let json = serde_json::to_string(&config).unwrap();
    let back: LoaderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
