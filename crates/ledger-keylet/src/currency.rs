//! Currency code encoding, per spec §3.
//!
//! A currency is represented, for hashing purposes, as a 20-byte value:
//! - the native asset is the all-zero 20-byte value;
//! - a 3-ASCII ticker (e.g. "USD") occupies bytes 12..15 of an otherwise
//!   zero-padded 20-byte value;
//! - a 40-hex-character code is decoded directly to the 20 raw bytes.

/// A currency code in its canonical 20-byte keylet-hashing representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency(pub [u8; 20]);

impl Currency {
    pub const NATIVE: Currency = Currency([0u8; 20]);

    /// Encode a 3-letter ASCII ticker (e.g. "USD") into the canonical form.
    pub fn from_ticker(code: &str) -> Option<Currency> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii) {
            return None;
        }
        let mut out = [0u8; 20];
        out[12..15].copy_from_slice(bytes);
        Some(Currency(out))
    }

    /// Decode a 40-hex-character code directly into the 20 raw bytes.
    pub fn from_hex(hex: &str) -> Option<Currency> {
        if hex.len() != 40 {
            return None;
        }
        let mut out = [0u8; 20];
        for i in 0..20 {
            out[i] = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Currency(out))
    }

    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_occupies_bytes_12_to_14() {
        let c = Currency::from_ticker("USD").unwrap();
        assert_eq!(&c.0[12..15], b"USD");
        assert_eq!(&c.0[..12], &[0u8; 12]);
        assert_eq!(&c.0[15..], &[0u8; 5]);
    }

    #[test]
    fn native_is_all_zero() {
        assert!(Currency::NATIVE.is_native());
    }

    #[test]
    fn hex_roundtrip() {
        let hex = "0123456789ABCDEF0123456789ABCDEF01234567";
        let c = Currency::from_hex(hex).unwrap();
        assert_eq!(c.0[0], 0x01);
        assert_eq!(c.0[19], 0x67);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Currency::from_ticker("USDT").is_none());
        assert!(Currency::from_hex("abcd").is_none());
    }
}
