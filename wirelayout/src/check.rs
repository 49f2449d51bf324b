//! Self-check binding a generated layout to the record type compiled here.
//!
//! A layout is generated for one target's idea of a record. If the compiler
//! on this target lays the record out differently, every offset in the
//! layout is suspect, so the declared host size is compared against
//! `size_of::<T>()` before the layout may touch a `T`.

use core::any::type_name;
use core::marker::PhantomData;
use core::mem::size_of;
use std::sync::Arc;

use crate::descriptor::{LayoutDescriptor, RawLayout};
use crate::error::{LayoutError, Result};

/// Returns `true` iff the layout was generated for a record of `actual_size` bytes.
#[must_use]
pub fn check(descriptor: &LayoutDescriptor, actual_size: usize) -> bool {
    descriptor.host_size() == actual_size
}

/// Runs [`check`] against the compiled size of `T`.
#[must_use]
pub fn check_record<T>(descriptor: &LayoutDescriptor) -> bool {
    check(descriptor, size_of::<T>())
}

/// Record types with a generated layout.
///
/// # Safety
/// Every host range in [`HostRecord::LAYOUT`] must cover only initialized
/// bytes of `Self` (field bytes, never padding), and any byte pattern written
/// into those ranges must leave a valid `Self`. Plain integer and byte-array
/// fields in a `#[repr(C)]` struct satisfy this.
pub unsafe trait HostRecord: Copy + 'static {
    /// Layout emitted by the code generator for this type.
    const LAYOUT: RawLayout<'static>;
}

/// A layout that passed the self-check for `T`.
///
/// Typed serialization only accepts this type, so a layout cannot reach a `T`
/// without its host size having been compared against the compiled one.
pub struct RecordLayout<T> {
    descriptor: Arc<LayoutDescriptor>,
    _record: PhantomData<fn() -> T>,
}

impl<T: HostRecord> RecordLayout<T> {
    /// Validates `T::LAYOUT` and runs the self-check.
    pub fn generated() -> Result<Self> {
        let descriptor = LayoutDescriptor::new(&T::LAYOUT)?;
        // SAFETY: `HostRecord` guarantees the generated ranges cover field bytes of `T`.
        unsafe { Self::bind(descriptor) }
    }

    /// Binds an externally loaded descriptor to `T`.
    ///
    /// # Safety
    /// The descriptor's host ranges must satisfy the same contract as
    /// [`HostRecord::LAYOUT`]. Only the total size is verified here.
    pub unsafe fn bind(descriptor: LayoutDescriptor) -> Result<Self> {
        let actual = size_of::<T>();
        if !check(&descriptor, actual) {
            log::error!(
                "layout for `{}` expects {} bytes but the compiled record is {} bytes",
                type_name::<T>(),
                descriptor.host_size(),
                actual
            );
            return Err(LayoutError::HostSizeMismatch {
                record: type_name::<T>(),
                expected: descriptor.host_size(),
                actual,
            });
        }

        Ok(Self {
            descriptor: Arc::new(descriptor),
            _record: PhantomData,
        })
    }
}

impl<T> RecordLayout<T> {
    #[must_use]
    pub fn descriptor(&self) -> &LayoutDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn wire_length(&self) -> usize {
        self.descriptor.wire_length()
    }
}

impl<T> Clone for RecordLayout<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            _record: PhantomData,
        }
    }
}

impl<T> core::fmt::Debug for RecordLayout<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecordLayout")
            .field("record", &type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
