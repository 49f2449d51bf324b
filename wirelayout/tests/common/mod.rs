#![allow(dead_code)]

use wirelayout::{HostRecord, RawLayout};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `struct foo { uint8_t bar; uint16_t baz; uint16_t gaz; }`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Foo {
    pub bar: u8,
    pub baz: u16,
    pub gaz: u16,
}

unsafe impl HostRecord for Foo {
    const LAYOUT: RawLayout<'static> =
        RawLayout::new(3, 5, 6, &[0, 1, 3, 1, 5, 3], &[0, 1, 2, 4, 4, 6]);
}

/// Padded on both sides of `counter` and at the tail.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Telemetry {
    pub kind: u8,
    pub counter: u32,
    pub level: i16,
    pub flags: [u8; 4],
}

unsafe impl HostRecord for Telemetry {
    const LAYOUT: RawLayout<'static> = RawLayout::new(
        4,
        11,
        16,
        &[0, 1, 5, 1, 7, 5, 7, 11],
        &[0, 1, 4, 8, 8, 10, 10, 14],
    );
}

pub fn sample_foo() -> Foo {
    Foo {
        bar: 0xAA,
        baz: 0xDEAD,
        gaz: 0xBEAF,
    }
}

pub fn sample_telemetry() -> Telemetry {
    Telemetry {
        kind: 7,
        counter: 0x0102_0304,
        level: -2,
        flags: [1, 2, 3, 4],
    }
}
