//! Wire buffer to host record.

use crate::check::{HostRecord, RecordLayout};
use crate::descriptor::LayoutDescriptor;
use crate::error::Result;
use crate::ser::{ensure_host_len, ensure_wire_len};

/// Deserializes `input` into a host record image.
///
/// Only declared field bytes of `host` are written; padding keeps whatever
/// the caller left there.
pub fn deserialize_bytes(
    input: &[u8],
    host: &mut [u8],
    descriptor: &LayoutDescriptor,
) -> Result<()> {
    ensure_wire_len(input.len(), descriptor)?;
    ensure_host_len(host.len(), descriptor)?;

    for field in descriptor.fields() {
        field.wire.gather(input, &mut host[field.host.clone()]);
    }
    Ok(())
}

/// Deserializes `input` into the declared fields of `record`.
pub fn deserialize<T: HostRecord>(
    input: &[u8],
    record: &mut T,
    layout: &RecordLayout<T>,
) -> Result<()> {
    let descriptor = layout.descriptor();
    ensure_wire_len(input.len(), descriptor)?;

    let base = (record as *mut T).cast::<u8>();
    for field in descriptor.fields() {
        // SAFETY: the layout was checked against `size_of::<T>()`; `HostRecord`
        // guarantees every byte pattern in a declared field is a valid `T`.
        let dst = unsafe {
            core::slice::from_raw_parts_mut(base.add(field.host.start), field.wire.len)
        };
        field.wire.gather(input, dst);
    }
    Ok(())
}

/// Builds a record from `input`, starting from `T::default()` for undeclared bytes.
pub fn deserialize_new<T: HostRecord + Default>(
    input: &[u8],
    layout: &RecordLayout<T>,
) -> Result<T> {
    let mut record = T::default();
    deserialize(input, &mut record, layout)?;
    Ok(record)
}
