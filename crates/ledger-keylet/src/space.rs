//! Namespace (space-id) bytes used to domain-separate keylet hashing.
//!
//! These are consensus-relevant constants (spec §3, §6): implementations
//! MUST preserve them verbatim.

pub const SPACE_ACCOUNT: u8 = b'a';
pub const SPACE_OFFER: u8 = b'o';
pub const SPACE_OWNER_DIR: u8 = b'O';
pub const SPACE_BOOK_DIR: u8 = b'B';
pub const SPACE_SKIP_LIST: u8 = b's';
pub const SPACE_ESCROW: u8 = b'u';
pub const SPACE_AMENDMENTS: u8 = b'f';
pub const SPACE_FEES: u8 = b'e';
pub const SPACE_TICKET: u8 = b'T';
pub const SPACE_SIGNER_LIST: u8 = b'S';
pub const SPACE_CHECK: u8 = b'C';
pub const SPACE_DEPOSIT_PREAUTH: u8 = b'p';
pub const SPACE_NFTOKEN_OFFER: u8 = b'q';
pub const SPACE_NFTOKEN_PAGE: u8 = b'P';
pub const SPACE_AMM: u8 = b'A';
pub const SPACE_BRIDGE: u8 = b'i';
pub const SPACE_XCHAIN_CLAIM: u8 = b'Q';
pub const SPACE_XCHAIN_CREATE: u8 = b'K';
pub const SPACE_DID: u8 = b'I';
pub const SPACE_ORACLE: u8 = b'R';
pub const SPACE_MPT_ISSUANCE: u8 = b'~';
pub const SPACE_MPTOKEN: u8 = b't';
pub const SPACE_CREDENTIAL: u8 = b'D';
pub const SPACE_PERMISSIONED_DOMAIN: u8 = b'b';
pub const SPACE_VAULT: u8 = b'V';
pub const SPACE_RIPPLE_STATE: u8 = b'r';
pub const SPACE_DIR_NODE: u8 = b'd';

/// Not assigned a letter in spec §3's space-id table; this implementation's
/// extension (see DESIGN.md), chosen to avoid collision with the above.
pub const SPACE_PAY_CHANNEL: u8 = b'x';
