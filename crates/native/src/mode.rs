//! Permission-bit codec for the native create call.

use std::fmt;

/// Bits outside this mask have no meaning on the wire.
pub const PERMISSION_MASK: u32 = 0o7777;

/// Wire representation of file-creation permission bits.
///
/// Pure value type: [`Mode::from_bits`] is total over `u32`, masking the
/// request down to the permission range the native layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u32);

impl Mode {
    pub fn from_bits(requested: u32) -> Self {
        Self(requested & PERMISSION_MASK)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_bits_pass_through() {
        assert_eq!(Mode::from_bits(0o644).bits(), 0o644);
        assert_eq!(Mode::from_bits(0o4755).bits(), 0o4755);
    }

    #[test]
    fn bits_above_the_permission_range_are_masked() {
        assert_eq!(Mode::from_bits(0o100644).bits(), 0o644);
        assert_eq!(Mode::from_bits(u32::MAX).bits(), PERMISSION_MASK);
    }

    #[test]
    fn zero_encodes_to_zero() {
        assert_eq!(Mode::from_bits(0).bits(), 0);
    }

    #[test]
    fn displays_as_octal() {
        assert_eq!(Mode::from_bits(0o644).to_string(), "0644");
    }
}
