//! The closed enumeration of ledger entry type tags (spec §3, §6).

/// A `LedgerEntryType` tag. The wire form is a 3-byte field marker
/// (`0x11 hi lo`); this is the `hi lo` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum LedgerEntryType {
    AccountRoot = 0x0061,
    Check = 0x0063,
    DirectoryNode = 0x0064,
    FeeSettings = 0x0066,
    Escrow = 0x0068,
    NFTokenPage = 0x006E,
    Offer = 0x006F,
    PayChannel = 0x0070,
    RippleState = 0x0072,
    SignerList = 0x0073,
    Ticket = 0x0074,
    NFTokenOffer = 0x0075,
    AMM = 0x0078,
    Amendments = 0x0041,
    LedgerHashes = 0x004C,
    NegativeUNL = 0x004E,
    DID = 0x0044,

    // Not given an explicit tag in spec §6's external-interface table, but
    // named as a keylet category in §3; tags picked here are this
    // implementation's extension (see DESIGN.md) and avoid collision with
    // the tags above.
    DepositPreauth = 0x0071,
    Bridge = 0x0076,
    XChainOwnedClaimId = 0x0077,
    XChainOwnedCreateAccountClaimId = 0x0079,
    Oracle = 0x007A,
    MPTokenIssuance = 0x007B,
    MPToken = 0x007C,
    Credential = 0x0043,
    PermissionedDomain = 0x0045,
    Vault = 0x0056,
}

impl LedgerEntryType {
    pub const fn tag(self) -> u16 {
        self as u16
    }
}
