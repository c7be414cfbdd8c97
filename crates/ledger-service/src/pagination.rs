//! Marker parsing and limit clamping shared by every paginated read path
//! (spec §4.8: "limit clamped, optional 64-hex marker, invalid marker is
//! `InvalidArgument`, output marker is the last-emitted key").

use ledger_types::{Hash256, LedgerError, LedgerResult};

pub const LEDGER_DATA_DEFAULT_LIMIT: u32 = 256;
pub const ACCOUNT_DEFAULT_LIMIT: u32 = 200;
pub const NFT_MAX_LIMIT: u32 = 400;

/// Clamps a caller-requested limit into `[1, ceiling]`. `None` or an
/// explicit `0` both mean "use the endpoint default" (spec §4.8/§8).
pub fn clamp_limit(requested: Option<u32>, default: u32, ceiling: u32) -> u32 {
    match requested {
        None | Some(0) => default,
        Some(r) => r.min(ceiling),
    }
}

/// Parses a 64-hex-character marker into a `Hash256`. Any other shape is
/// `InvalidArgument`.
pub fn parse_marker(marker: &str) -> LedgerResult<Hash256> {
    if marker.len() != 64 {
        return Err(LedgerError::InvalidArgument(format!(
            "marker must be 64 hex characters, got {}",
            marker.len()
        )));
    }
    let bytes = hex::decode(marker)
        .map_err(|e| LedgerError::InvalidArgument(format!("marker is not valid hex: {e}")))?;
    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes);
    Ok(Hash256::new(array))
}

pub fn format_marker(hash: Hash256) -> String {
    hex::encode(hash.as_bytes())
}
