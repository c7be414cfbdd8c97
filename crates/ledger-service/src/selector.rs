//! String-selector resolution for read paths (spec §4.8: `"current"` /
//! `"closed"` / `"validated"` / a decimal sequence number).

use ledger_types::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerSelector {
    Open,
    Closed,
    Validated,
    Sequence(u32),
}

/// Parses a query-time `ledgerIndex` string. `"current"` is the
/// open-by-default selector every read path falls back to; unknown names
/// are `InvalidArgument`, per spec §4.8.
pub fn parse_selector(selector: &str) -> LedgerResult<LedgerSelector> {
    match selector {
        "current" | "" => Ok(LedgerSelector::Open),
        "closed" => Ok(LedgerSelector::Closed),
        "validated" => Ok(LedgerSelector::Validated),
        other => other
            .parse::<u32>()
            .map(LedgerSelector::Sequence)
            .map_err(|_| LedgerError::InvalidArgument(format!("unknown ledger selector: {other}"))),
    }
}
