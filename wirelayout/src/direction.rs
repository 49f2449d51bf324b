//! Resolution of wire range pairs into explicit copy directions.
//!
//! A generated layout encodes each wire field as a pair `(a, b)`. When
//! `a < b` the field occupies `[a, b)` in host byte order. When `a > b` the
//! field occupies `[b, a)` with its bytes reversed, so the first host byte
//! lands on wire byte `a - 1`.

use core::ops::Range;

/// Order in which a field's bytes are laid out on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Host byte order is kept.
    Forward,
    /// Host byte order is inverted.
    Reverse,
}

/// Resolved placement of one field in the wire buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WireSpan {
    pub direction: Direction,
    /// Wire offset receiving the first host byte of the field.
    pub start: usize,
    pub len: usize,
}

/// Maps a wire range pair onto a direction, starting offset and length.
///
/// Equal values describe an empty field and resolve to a no-op forward copy.
#[must_use]
pub const fn resolve(a: u32, b: u32) -> WireSpan {
    if a > b {
        WireSpan {
            direction: Direction::Reverse,
            start: a as usize - 1,
            len: (a - b) as usize,
        }
    } else {
        WireSpan {
            direction: Direction::Forward,
            start: a as usize,
            len: (b - a) as usize,
        }
    }
}

impl WireSpan {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Wire bytes covered by the field, regardless of direction.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        match self.direction {
            Direction::Forward => self.start..self.start + self.len,
            Direction::Reverse => self.start + 1 - self.len..self.start + 1,
        }
    }

    /// Returns the pair this span was resolved from.
    #[must_use]
    pub const fn to_pair(&self) -> (u32, u32) {
        let span = self.span();
        match self.direction {
            Direction::Forward => (span.start as u32, span.end as u32),
            Direction::Reverse => (span.end as u32, span.start as u32),
        }
    }

    /// Copies the field's host bytes into `wire`.
    ///
    /// `src` holds exactly `len` bytes and `wire` must cover `span()`.
    #[inline]
    pub fn scatter(&self, src: &[u8], wire: &mut [u8]) {
        let dst = &mut wire[self.span()];
        match self.direction {
            Direction::Forward => dst.copy_from_slice(src),
            Direction::Reverse => {
                for (dst, src) in dst.iter_mut().rev().zip(src) {
                    *dst = *src;
                }
            }
        }
    }

    /// Copies the field's wire bytes into `dst`, the field's host bytes.
    #[inline]
    pub fn gather(&self, wire: &[u8], dst: &mut [u8]) {
        let src = &wire[self.span()];
        match self.direction {
            Direction::Forward => dst.copy_from_slice(src),
            Direction::Reverse => {
                for (dst, src) in dst.iter_mut().zip(src.iter().rev()) {
                    *dst = *src;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_pair_is_forward() {
        let span = resolve(3, 7);
        assert_eq!(span.direction, Direction::Forward);
        assert_eq!(span.start, 3);
        assert_eq!(span.len, 4);
        assert_eq!(span.span(), 3..7);
    }

    #[test]
    fn descending_pair_is_reverse_with_small_length() {
        let span = resolve(4, 2);
        assert_eq!(span.direction, Direction::Reverse);
        assert_eq!(span.start, 3);
        assert_eq!(span.len, 2);
        assert_eq!(span.span(), 2..4);
    }

    #[test]
    fn reverse_length_does_not_wrap() {
        let span = resolve(u32::MAX, u32::MAX - 8);
        assert_eq!(span.len, 8);
    }

    #[test]
    fn equal_pair_is_empty_forward() {
        let span = resolve(5, 5);
        assert_eq!(span.direction, Direction::Forward);
        assert!(span.is_empty());
        assert_eq!(span.span(), 5..5);
    }

    #[test]
    fn pair_survives_resolution() {
        for pair in [(0, 2), (4, 2), (9, 9), (1, 0)] {
            assert_eq!(resolve(pair.0, pair.1).to_pair(), pair);
        }
    }

    #[test]
    fn reverse_scatter_inverts_bytes() {
        let mut wire = [0u8; 4];
        resolve(4, 2).scatter(&[0x11, 0x22], &mut wire);
        assert_eq!(wire, [0x00, 0x00, 0x22, 0x11]);

        let mut host = [0u8; 2];
        resolve(4, 2).gather(&wire, &mut host);
        assert_eq!(host, [0x11, 0x22]);
    }
}
