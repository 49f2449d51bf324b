//! Host record to wire buffer.

use crate::check::{HostRecord, RecordLayout};
use crate::descriptor::LayoutDescriptor;
use crate::error::{LayoutError, Result};

/// Serializes a host record image into `out`.
///
/// `host` holds the record's in-memory bytes (at least `host_size`). Only the
/// first `wire_length` bytes of `out` are written, and only declared field
/// bytes of `host` are read. Returns the number of bytes written.
pub fn serialize_bytes(
    host: &[u8],
    out: &mut [u8],
    descriptor: &LayoutDescriptor,
) -> Result<usize> {
    ensure_host_len(host.len(), descriptor)?;
    ensure_wire_len(out.len(), descriptor)?;

    for field in descriptor.fields() {
        field.wire.scatter(&host[field.host.clone()], out);
    }
    Ok(descriptor.wire_length())
}

/// Serializes a typed record into `out`. Returns the number of bytes written.
pub fn serialize<T: HostRecord>(
    record: &T,
    out: &mut [u8],
    layout: &RecordLayout<T>,
) -> Result<usize> {
    let descriptor = layout.descriptor();
    ensure_wire_len(out.len(), descriptor)?;
    scatter_record(record, out, descriptor);
    Ok(descriptor.wire_length())
}

/// Serializes a typed record into a new buffer of exactly `wire_length` bytes.
#[must_use]
pub fn serialize_to_vec<T: HostRecord>(record: &T, layout: &RecordLayout<T>) -> Vec<u8> {
    let mut buffer = vec![0u8; layout.wire_length()];
    scatter_record(record, &mut buffer, layout.descriptor());
    buffer
}

/// `descriptor` must come from a `RecordLayout<T>` and `out` must hold `wire_length` bytes.
fn scatter_record<T: HostRecord>(record: &T, out: &mut [u8], descriptor: &LayoutDescriptor) {
    let base = (record as *const T).cast::<u8>();
    for field in descriptor.fields() {
        // SAFETY: the layout was checked against `size_of::<T>()` and its host
        // ranges cover initialized field bytes of `T`.
        let src =
            unsafe { core::slice::from_raw_parts(base.add(field.host.start), field.wire.len) };
        field.wire.scatter(src, out);
    }
}

pub(crate) fn ensure_wire_len(actual: usize, descriptor: &LayoutDescriptor) -> Result<()> {
    if actual < descriptor.wire_length() {
        return Err(LayoutError::WireBufferTooShort {
            required: descriptor.wire_length(),
            actual,
        });
    }
    Ok(())
}

pub(crate) fn ensure_host_len(actual: usize, descriptor: &LayoutDescriptor) -> Result<()> {
    if actual < descriptor.host_size() {
        return Err(LayoutError::HostBufferTooShort {
            required: descriptor.host_size(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::RawLayout;

    fn descriptor(
        wire: &[u32],
        host: &[u32],
        wire_length: u32,
        host_size: u32,
    ) -> LayoutDescriptor {
        let field_count = (wire.len() / 2) as u32;
        let raw = RawLayout::new(field_count, wire_length, host_size, wire, host);
        LayoutDescriptor::new(&raw).unwrap()
    }

    #[test]
    fn forward_field_keeps_byte_order() {
        let d = descriptor(&[0, 2], &[0, 2], 2, 2);
        let mut out = [0u8; 2];
        assert_eq!(serialize_bytes(&[0x11, 0x22], &mut out, &d).unwrap(), 2);
        assert_eq!(out, [0x11, 0x22]);
    }

    #[test]
    fn reverse_field_inverts_byte_order() {
        let d = descriptor(&[4, 2, 0, 2], &[0, 2, 2, 4], 4, 4);
        let mut out = [0u8; 4];
        serialize_bytes(&[0x11, 0x22, 0x33, 0x44], &mut out, &d).unwrap();
        assert_eq!(out[3], 0x11);
        assert_eq!(out[2], 0x22);
        assert_eq!(&out[..2], &[0x33, 0x44]);
    }

    #[test]
    fn padding_is_never_copied() {
        // u8 at 0, u16 at 2, u16 at 4; byte 1 is padding
        let d = descriptor(&[0, 1, 1, 3, 3, 5], &[0, 1, 2, 4, 4, 6], 5, 6);
        let host = [0xAA, 0xEE, 0x01, 0x02, 0x03, 0x04];
        let mut out = [0u8; 5];
        serialize_bytes(&host, &mut out, &d).unwrap();
        assert_eq!(out, [0xAA, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn bytes_past_wire_length_are_untouched() {
        let d = descriptor(&[0, 2], &[0, 2], 2, 2);
        let mut out = [0x55u8; 4];
        serialize_bytes(&[1, 2], &mut out, &d).unwrap();
        assert_eq!(out, [1, 2, 0x55, 0x55]);
    }

    #[test]
    fn rejects_short_wire_buffer() {
        let d = descriptor(&[0, 2, 2, 4], &[0, 2, 2, 4], 4, 4);
        let mut out = [0u8; 3];
        let err = serialize_bytes(&[0; 4], &mut out, &d).unwrap_err();
        assert_eq!(
            err,
            LayoutError::WireBufferTooShort {
                required: 4,
                actual: 3,
            }
        );
        assert_eq!(out, [0; 3]);
    }

    #[test]
    fn rejects_short_host_image() {
        let d = descriptor(&[0, 2], &[2, 4], 2, 4);
        let mut out = [0u8; 2];
        let err = serialize_bytes(&[0; 3], &mut out, &d).unwrap_err();
        assert!(matches!(err, LayoutError::HostBufferTooShort { required: 4, actual: 3 }));
    }
}
