//! Layout descriptors: the contract between the code generator and the engine.
//!
//! Generated code emits a [`RawLayout`] per record type, with ranges flattened
//! as `{field0_a, field0_b, field1_a, field1_b, ...}`. [`LayoutDescriptor::new`]
//! checks every range once; afterwards the descriptor is immutable and the
//! copy engine relies on it without re-checking offsets.

use core::ops::Range;

use crate::direction::{self, Direction, WireSpan};
use crate::error::{LayoutError, Result};
use crate::format;

/// Unvalidated layout as emitted by the code generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawLayout<'a> {
    pub field_count: u32,
    pub wire_length: u32,
    pub host_size: u32,
    pub wire_ranges: &'a [u32],
    pub host_ranges: &'a [u32],
}

impl<'a> RawLayout<'a> {
    #[must_use]
    pub const fn new(
        field_count: u32,
        wire_length: u32,
        host_size: u32,
        wire_ranges: &'a [u32],
        host_ranges: &'a [u32],
    ) -> Self {
        Self {
            field_count,
            wire_length,
            host_size,
            wire_ranges,
            host_ranges,
        }
    }
}

/// Owned counterpart of [`RawLayout`], produced when decoding or exporting layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawLayoutBuf {
    pub field_count: u32,
    pub wire_length: u32,
    pub host_size: u32,
    pub wire_ranges: Vec<u32>,
    pub host_ranges: Vec<u32>,
}

impl RawLayoutBuf {
    #[must_use]
    pub fn as_raw(&self) -> RawLayout<'_> {
        RawLayout::new(
            self.field_count,
            self.wire_length,
            self.host_size,
            &self.wire_ranges,
            &self.host_ranges,
        )
    }
}

/// Placement of one field in both host and wire space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPlan {
    pub wire: WireSpan,
    pub host: Range<usize>,
}

/// A validated layout for one record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutDescriptor {
    wire_length: usize,
    host_size: usize,
    fields: Box<[FieldPlan]>,
}

impl LayoutDescriptor {
    /// Validates a generated layout.
    ///
    /// Rejects layouts whose ranges leave their declared bounds, overlap,
    /// disagree on a field's length, or leave holes in the wire buffer.
    pub fn new(raw: &RawLayout<'_>) -> Result<Self> {
        let descriptor = Self::validate(raw).inspect_err(|err| {
            log::warn!("rejected layout with {} fields: {err}", raw.field_count);
        })?;

        log::debug!(
            "validated layout: {} fields, wire_length={}, host_size={}, reversed={}",
            descriptor.field_count(),
            descriptor.wire_length,
            descriptor.host_size,
            descriptor.reversed_fields()
        );
        Ok(descriptor)
    }

    /// Decodes and validates a descriptor record in the generator's binary format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = format::decode(bytes)?;
        Self::new(&raw.as_raw())
    }

    /// Encodes the descriptor in the generator's binary format.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        format::encode(&self.to_raw_parts().as_raw())
    }

    fn validate(raw: &RawLayout<'_>) -> Result<Self> {
        let field_count = raw.field_count as usize;
        let wire_length = raw.wire_length as usize;
        let host_size = raw.host_size as usize;

        let pairs_ok = field_count
            .checked_mul(2)
            .is_some_and(|n| n == raw.wire_ranges.len() && n == raw.host_ranges.len());
        if !pairs_ok {
            return Err(LayoutError::PairCountMismatch {
                field_count,
                wire_pairs: raw.wire_ranges.len() / 2,
                host_pairs: raw.host_ranges.len() / 2,
            });
        }

        let mut fields = Vec::with_capacity(field_count);
        let pairs = raw
            .wire_ranges
            .chunks_exact(2)
            .zip(raw.host_ranges.chunks_exact(2));
        for (field, (wire, host)) in pairs.enumerate() {
            let wire = direction::resolve(wire[0], wire[1]);
            let (start, end) = (host[0] as usize, host[1] as usize);

            if start > end {
                return Err(LayoutError::HostRangeReversed { field, start, end });
            }
            if end - start != wire.len {
                return Err(LayoutError::FieldLengthMismatch {
                    field,
                    wire: wire.len,
                    host: end - start,
                });
            }
            if end > host_size {
                return Err(LayoutError::HostRangeOutOfBounds {
                    field,
                    range: start..end,
                    host_size,
                });
            }
            if wire.span().end > wire_length {
                return Err(LayoutError::WireRangeOutOfBounds {
                    field,
                    range: wire.span(),
                    wire_length,
                });
            }

            fields.push(FieldPlan {
                wire,
                host: start..end,
            });
        }

        check_wire_coverage(&fields, wire_length)?;
        check_host_disjoint(&fields)?;

        Ok(Self {
            wire_length,
            host_size,
            fields: fields.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Size in bytes of the packed wire form.
    #[must_use]
    pub const fn wire_length(&self) -> usize {
        self.wire_length
    }

    /// In-memory size of the host record the layout was generated for.
    #[must_use]
    pub const fn host_size(&self) -> usize {
        self.host_size
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FieldPlan> {
        self.fields.get(index)
    }

    pub fn fields(&self) -> core::slice::Iter<'_, FieldPlan> {
        self.fields.iter()
    }

    /// Number of fields whose byte order is inverted on the wire.
    #[must_use]
    pub fn reversed_fields(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.wire.direction == Direction::Reverse)
            .count()
    }

    /// Flattens the descriptor back into the generator's representation.
    #[must_use]
    pub fn to_raw_parts(&self) -> RawLayoutBuf {
        let mut raw = RawLayoutBuf {
            field_count: self.fields.len() as u32,
            wire_length: self.wire_length as u32,
            host_size: self.host_size as u32,
            wire_ranges: Vec::with_capacity(self.fields.len() * 2),
            host_ranges: Vec::with_capacity(self.fields.len() * 2),
        };
        for field in self.fields.iter() {
            let (a, b) = field.wire.to_pair();
            raw.wire_ranges.extend([a, b]);
            raw.host_ranges
                .extend([field.host.start as u32, field.host.end as u32]);
        }
        raw
    }
}

/// Non-empty fields, ordered by where they start.
fn sorted_by_start(
    fields: &[FieldPlan],
    range: impl Fn(&FieldPlan) -> Range<usize>,
) -> Vec<(usize, Range<usize>)> {
    let mut spans: Vec<_> = fields
        .iter()
        .enumerate()
        .map(|(i, f)| (i, range(f)))
        .filter(|(_, r)| !r.is_empty())
        .collect();
    spans.sort_by_key(|(_, r)| r.start);
    spans
}

fn check_wire_coverage(fields: &[FieldPlan], wire_length: usize) -> Result<()> {
    let mut cursor = 0;
    let mut previous = None;
    for (field, span) in sorted_by_start(fields, |f| f.wire.span()) {
        if span.start < cursor {
            return Err(LayoutError::WireOverlap {
                first: previous.unwrap_or(field),
                second: field,
            });
        }
        if span.start > cursor {
            return Err(LayoutError::WireGap {
                offset: cursor,
                wire_length,
            });
        }
        cursor = span.end;
        previous = Some(field);
    }

    if cursor != wire_length {
        return Err(LayoutError::WireGap {
            offset: cursor,
            wire_length,
        });
    }
    Ok(())
}

fn check_host_disjoint(fields: &[FieldPlan]) -> Result<()> {
    let spans = sorted_by_start(fields, |f| f.host.clone());
    for pair in spans.windows(2) {
        let (first, a) = &pair[0];
        let (second, b) = &pair[1];
        if b.start < a.end {
            return Err(LayoutError::HostOverlap {
                first: *first,
                second: *second,
            });
        }
    }
    Ok(())
}
