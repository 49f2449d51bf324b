//! Layout-driven conversion between padded host records and packed wire buffers.
//!
//! A code generator describes, per record type, where each field sits in the
//! host record and where it goes in the padding-free wire form. This crate
//! validates those descriptions, checks them against the record as compiled on
//! the current target, and copies field bytes in either direction, reversing
//! byte order for fields the layout marks as such.

pub mod catalog;
pub mod check;
pub mod de;
pub mod descriptor;
pub mod direction;
pub mod error;
pub mod format;
pub mod ser;

pub use catalog::{CatalogError, LayoutCatalog, LayoutEntry};
pub use check::{HostRecord, RecordLayout, check, check_record};
pub use de::{deserialize, deserialize_bytes, deserialize_new};
pub use descriptor::{FieldPlan, LayoutDescriptor, RawLayout, RawLayoutBuf};
pub use direction::{Direction, WireSpan};
pub use error::{LayoutError, Result};
pub use ser::{serialize, serialize_bytes, serialize_to_vec};
