//! Fee settings, carried by every ledger version and persisted as the
//! `FeeSettings` singleton entry (spec §4.5, §4.8).

use ledger_types::Drops;

/// Base fee and reserve schedule in effect for a ledger version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSettings {
    pub base_fee: Drops,
    pub reserve_base: Drops,
    pub reserve_increment: Drops,
}

impl FeeSettings {
    /// Classic fee schedule (pre "fee voting" amendment era).
    pub fn classic() -> Self {
        FeeSettings {
            base_fee: Drops(10),
            reserve_base: Drops(20_000_000),
            reserve_increment: Drops(5_000_000),
        }
    }

    /// Modern, lower reserve schedule.
    pub fn modern() -> Self {
        FeeSettings {
            base_fee: Drops(10),
            reserve_base: Drops(10_000_000),
            reserve_increment: Drops(2_000_000),
        }
    }

    pub fn select(use_modern: bool) -> Self {
        if use_modern {
            Self::modern()
        } else {
            Self::classic()
        }
    }

    /// Canonical byte encoding stored at the `FeeSettings` keylet.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(24);
        out.extend_from_slice(&self.base_fee.0.to_be_bytes());
        out.extend_from_slice(&self.reserve_base.0.to_be_bytes());
        out.extend_from_slice(&self.reserve_increment.0.to_be_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 24 {
            return None;
        }
        let base_fee = Drops(u64::from_be_bytes(bytes[0..8].try_into().ok()?));
        let reserve_base = Drops(u64::from_be_bytes(bytes[8..16].try_into().ok()?));
        let reserve_increment = Drops(u64::from_be_bytes(bytes[16..24].try_into().ok()?));
        Some(FeeSettings {
            base_fee,
            reserve_base,
            reserve_increment,
        })
    }
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self::classic()
    }
}
