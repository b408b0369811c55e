//! End-to-end field packaging tests: fixed and variable length fields,
//! the no-prefix fallback to the configured maximum length, consumed-byte
//! arithmetic, failure wrapping for the buffer forms, and the deliberate
//! absence of wrapping for the stream form.

use std::error::Error as _;
use std::io::Cursor;
use std::sync::Arc;

use open_interchange_codec::interpret::{BcdInterpreter, BinaryInterpreter};
use open_interchange_codec::padding::{LeftPadder, ZERO_PADDER};
use open_interchange_codec::prefix::{AsciiPrefixer, BcdPrefixer, BinaryPrefixer};
use open_interchange_codec::CodecError;
use open_interchange_field::{Component, Field, FieldError, FieldPackager, Result};

/// Component whose value access always fails; key lookup optionally
/// fails too.
struct BrokenComponent {
    key_fails: bool,
}

impl Component for BrokenComponent {
    fn value(&self) -> Result<String> {
        Err(FieldError::Value("value store offline".to_string()))
    }

    fn set_value(&mut self, _value: String) -> Result<()> {
        Err(FieldError::Value("value store offline".to_string()))
    }

    fn key(&self) -> Result<String> {
        if self.key_fails {
            Err(FieldError::KeyUnavailable)
        } else {
            Ok("35".to_string())
        }
    }
}

// ─── Fixed-length fields ───

#[test]
fn test_fixed_length_literal_field() {
    let packager = FieldPackager::builder().length(4).build();

    let raw = packager.pack(&Field::new(41, "AB12")).unwrap();
    assert_eq!(raw, b"AB12");

    let mut decoded = Field::empty(41);
    let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(decoded.value().unwrap(), "AB12");
}

#[test]
fn test_no_prefix_falls_back_to_configured_length() {
    // The null prefixer reports no usable length; unpack must substitute
    // the configured maximum rather than fail.
    let packager = FieldPackager::builder().length(3).build();

    let mut decoded = Field::empty(1);
    let consumed = packager.unpack(&mut decoded, b"XYZtrailing", 0).unwrap();
    assert_eq!(consumed, 3);
    assert_eq!(decoded.value().unwrap(), "XYZ");
}

#[test]
fn test_padding_is_applied_on_pack_but_kept_on_unpack() {
    let packager = FieldPackager::builder()
        .length(6)
        .padder(Arc::new(ZERO_PADDER))
        .build();

    let raw = packager.pack(&Field::new(4, "123")).unwrap();
    assert_eq!(raw, b"000123");

    // The decoded value keeps its padding; stripping is a caller
    // convention, not part of the unpack contract.
    let mut decoded = Field::empty(4);
    packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(decoded.value().unwrap(), "000123");
}

// ─── Variable-length fields ───

#[test]
fn test_ascii_prefixed_field() {
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let raw = packager.pack(&Field::new(43, "HI")).unwrap();
    assert_eq!(raw, b"02HI");

    let mut decoded = Field::empty(43);
    let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(decoded.value().unwrap(), "HI");
}

#[test]
fn test_empty_value_with_prefix() {
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let raw = packager.pack(&Field::new(44, "")).unwrap();
    assert_eq!(raw, b"00");

    let mut decoded = Field::empty(44);
    let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(consumed, 2);
    assert_eq!(decoded.value().unwrap(), "");
}

#[test]
fn test_bcd_field_with_bcd_prefix() {
    let packager = FieldPackager::builder()
        .length(10)
        .interpreter(Arc::new(BcdInterpreter::LEFT_PADDED))
        .prefixer(Arc::new(BcdPrefixer::LL))
        .build();

    let raw = packager.pack(&Field::new(7, "12345")).unwrap();
    assert_eq!(raw, [0x05, 0x01, 0x23, 0x45]);

    let mut decoded = Field::empty(7);
    let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(consumed, 1 + 3);
    assert_eq!(decoded.value().unwrap(), "12345");
}

#[test]
fn test_binary_field_with_binary_prefix() {
    let packager = FieldPackager::builder()
        .length(16)
        .interpreter(Arc::new(BinaryInterpreter))
        .prefixer(Arc::new(BinaryPrefixer::B))
        .build();

    let raw = packager.pack(&Field::new(52, "CAFE")).unwrap();
    assert_eq!(raw, [0x04, 0xCA, 0xFE]);

    let mut decoded = Field::empty(52);
    let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
    assert_eq!(consumed, 3);
    assert_eq!(decoded.value().unwrap(), "CAFE");
}

#[test]
fn test_unpack_at_offset() {
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let mut buffer = b"????".to_vec();
    buffer.extend_from_slice(b"03ABCrest");

    let mut decoded = Field::empty(48);
    let consumed = packager.unpack(&mut decoded, &buffer, 4).unwrap();
    assert_eq!(consumed, 5);
    assert_eq!(decoded.value().unwrap(), "ABC");
}

// ─── Length arithmetic ───

#[test]
fn test_max_packed_length_sums_prefix_and_payload() {
    let literal = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();
    assert_eq!(literal.max_packed_length(), 2 + 10);

    let bcd = FieldPackager::builder()
        .length(11)
        .interpreter(Arc::new(BcdInterpreter::LEFT_PADDED))
        .prefixer(Arc::new(BcdPrefixer::LL))
        .build();
    assert_eq!(bcd.max_packed_length(), 1 + 6);

    let fixed = FieldPackager::builder().length(8).build();
    assert_eq!(fixed.max_packed_length(), 8);
}

// ─── Failure wrapping (buffer forms) ───

#[test]
fn test_packing_failure_carries_field_key_and_cause() {
    let packager = FieldPackager::builder().length(4).build();

    let err = packager
        .pack(&BrokenComponent { key_fails: false })
        .unwrap_err();
    match err {
        FieldError::Packing { field, source, .. } => {
            assert_eq!(field, "35");
            assert!(matches!(*source, FieldError::Value(_)));
        }
        other => panic!("expected packing failure, got {other:?}"),
    }
}

#[test]
fn test_packing_failure_with_failing_key_reports_unknown() {
    let packager = FieldPackager::builder().length(4).build();

    let err = packager
        .pack(&BrokenComponent { key_fails: true })
        .unwrap_err();
    match err {
        FieldError::Packing { field, source, .. } => {
            assert_eq!(field, "unknown");
            assert!(matches!(*source, FieldError::Value(_)));
        }
        other => panic!("expected packing failure, got {other:?}"),
    }
}

#[test]
fn test_unpacking_failure_with_failing_key_reports_unknown() {
    let packager = FieldPackager::builder().length(4).build();

    let mut component = BrokenComponent { key_fails: true };
    let err = packager.unpack(&mut component, b"AB12", 0).unwrap_err();
    match err {
        FieldError::Unpacking { field, source, .. } => {
            assert_eq!(field, "unknown");
            assert!(matches!(*source, FieldError::Value(_)));
        }
        other => panic!("expected unpacking failure, got {other:?}"),
    }
}

#[test]
fn test_oversized_value_wraps_padder_error() {
    let packager = FieldPackager::builder()
        .length(4)
        .padder(Arc::new(LeftPadder::new('0')))
        .build();

    let err = packager.pack(&Field::new(11, "12345")).unwrap_err();
    match err {
        FieldError::Packing { field, source, .. } => {
            assert_eq!(field, "11");
            assert!(matches!(
                *source,
                FieldError::Codec(CodecError::DataTooLong { length: 5, max: 4 })
            ));
        }
        other => panic!("expected packing failure, got {other:?}"),
    }
}

#[test]
fn test_truncated_buffer_wraps_as_unpacking_failure() {
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let mut decoded = Field::empty(2);
    let err = packager.unpack(&mut decoded, b"05AB", 0).unwrap_err();
    match err {
        FieldError::Unpacking { field, source, .. } => {
            assert_eq!(field, "2");
            assert!(matches!(
                *source,
                FieldError::Codec(CodecError::BufferTooShort { .. })
            ));
        }
        other => panic!("expected unpacking failure, got {other:?}"),
    }
}

#[test]
fn test_error_source_chain_reaches_original_cause() {
    let packager = FieldPackager::builder()
        .length(4)
        .padder(Arc::new(ZERO_PADDER))
        .build();

    let err = packager.pack(&Field::new(11, "12345")).unwrap_err();
    let source = err.source().expect("wrapped failure keeps its cause");
    let inner = source
        .downcast_ref::<FieldError>()
        .expect("cause is a field error");
    assert!(matches!(
        inner,
        FieldError::Codec(CodecError::DataTooLong { .. })
    ));
}

// ─── Stream form ───

#[test]
fn test_stream_unpack_with_prefix_advances_cursor() {
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let mut input = Cursor::new(b"02HIrest".to_vec());
    let mut decoded = Field::empty(43);
    packager.unpack_stream(&mut decoded, &mut input).unwrap();

    assert_eq!(decoded.value().unwrap(), "HI");
    assert_eq!(input.position(), 4);
}

#[test]
fn test_stream_unpack_fixed_length_reads_configured_length() {
    let packager = FieldPackager::builder().length(3).build();

    let mut input = Cursor::new(b"XYZtrailing".to_vec());
    let mut decoded = Field::empty(1);
    packager.unpack_stream(&mut decoded, &mut input).unwrap();

    assert_eq!(decoded.value().unwrap(), "XYZ");
    assert_eq!(input.position(), 3);
}

#[test]
fn test_stream_truncation_surfaces_as_io_error() {
    // The stream form performs no failure wrapping: a short read is an
    // I/O error, not an unpacking failure.
    let packager = FieldPackager::builder()
        .length(10)
        .prefixer(Arc::new(AsciiPrefixer::LL))
        .build();

    let mut input = Cursor::new(b"05AB".to_vec());
    let mut decoded = Field::empty(2);
    let err = packager.unpack_stream(&mut decoded, &mut input).unwrap_err();
    assert!(matches!(err, FieldError::Io(_)));
}

#[test]
fn test_stream_codec_error_propagates_unwrapped() {
    let packager = FieldPackager::builder()
        .length(2)
        .interpreter(Arc::new(BcdInterpreter::LEFT_PADDED))
        .build();

    // 0xAB is not a valid BCD byte.
    let mut input = Cursor::new(vec![0xABu8]);
    let mut decoded = Field::empty(3);
    let err = packager.unpack_stream(&mut decoded, &mut input).unwrap_err();
    assert!(matches!(err, FieldError::Codec(CodecError::InvalidData(_))));
}

// ─── Shared use ───

#[test]
fn test_one_packager_serves_concurrent_calls() {
    let packager = Arc::new(
        FieldPackager::builder()
            .length(4)
            .prefixer(Arc::new(AsciiPrefixer::LL))
            .build(),
    );

    let handles: Vec<_> = (0u32..8)
        .map(|i| {
            let packager = Arc::clone(&packager);
            std::thread::spawn(move || {
                let field = Field::new(i, format!("{:04}", i));
                let raw = packager.pack(&field).unwrap();
                let mut decoded = Field::empty(i);
                let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
                assert_eq!(consumed, raw.len());
                assert_eq!(decoded.value().unwrap(), format!("{:04}", i));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
