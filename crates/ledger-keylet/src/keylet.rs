//! `Keylet` — a typed 256-bit identifier for a single ledger state entry.
//!
//! Grounded on the field-tagging conventions of `shared-types::entities`
//! (every domain entity carries an explicit kind) and the RLP/encoding
//! style of `qc-04-state-management`, adapted to spec §4.3's
//! domain-separated-hash construction.

use ledger_crypto::sha512_half_many;
use ledger_types::{AccountId, Hash256};

use crate::entry_type::LedgerEntryType;
use crate::space;

/// `(entry_type_tag, key)` — see spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keylet {
    pub entry_type: LedgerEntryType,
    pub key: Hash256,
}

impl Keylet {
    const fn new(entry_type: LedgerEntryType, key: Hash256) -> Self {
        Keylet { entry_type, key }
    }
}

/// `sha512_half(space_id_be16 || arg_1 || arg_2 || …)`.
fn derive(space_id: u8, parts: &[&[u8]]) -> Hash256 {
    let space_be16 = [0x00u8, space_id];
    let mut all: Vec<&[u8]> = Vec::with_capacity(parts.len() + 1);
    all.push(&space_be16);
    all.extend_from_slice(parts);
    sha512_half_many(&all)
}

/// `AccountRoot` — the account's own ledger entry.
pub fn account_root(account: AccountId) -> Keylet {
    let key = derive(space::SPACE_ACCOUNT, &[account.as_ref()]);
    Keylet::new(LedgerEntryType::AccountRoot, key)
}

/// `Offer(account_id, sequence)`.
pub fn offer(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(space::SPACE_OFFER, &[account.as_ref(), &sequence.to_be_bytes()]);
    Keylet::new(LedgerEntryType::Offer, key)
}

/// Root owner-directory keylet for an account (page 0).
pub fn owner_dir_root(account: AccountId) -> Keylet {
    let key = derive(space::SPACE_OWNER_DIR, &[account.as_ref()]);
    Keylet::new(LedgerEntryType::DirectoryNode, key)
}

/// `OwnerDirPage(account, page)`. Page 0 returns the root verbatim; page > 0
/// hashes the root key together with a big-endian page number under the
/// dir-node space.
pub fn owner_dir_page(account: AccountId, page: u64) -> Keylet {
    let root = owner_dir_root(account);
    if page == 0 {
        return root;
    }
    let key = derive(space::SPACE_DIR_NODE, &[root.key.as_bytes(), &page.to_be_bytes()]);
    Keylet::new(LedgerEntryType::DirectoryNode, key)
}

/// Root order-book directory keylet for a `(taker_pays, taker_gets)` asset pair.
pub fn book_dir_root(taker_pays: Hash256, taker_gets: Hash256) -> Keylet {
    let key = derive(
        space::SPACE_BOOK_DIR,
        &[taker_pays.as_bytes(), taker_gets.as_bytes()],
    );
    Keylet::new(LedgerEntryType::DirectoryNode, key)
}

/// A page within a book directory (same paging scheme as `owner_dir_page`).
pub fn book_dir_page(book_root: Keylet, page: u64) -> Keylet {
    if page == 0 {
        return book_root;
    }
    let key = derive(space::SPACE_DIR_NODE, &[book_root.key.as_bytes(), &page.to_be_bytes()]);
    Keylet::new(LedgerEntryType::DirectoryNode, key)
}

/// Trust line / `RippleState` between two accounts for a currency.
///
/// Canonicalized: the two account IDs are sorted `low < high` before
/// hashing, so the keylet is the same regardless of argument order
/// (spec §3 invariant, tested in §8 property 5).
pub fn ripple_state(account_a: AccountId, account_b: AccountId, currency: [u8; 20]) -> Keylet {
    let (low, high) = if account_a.0 < account_b.0 {
        (account_a, account_b)
    } else {
        (account_b, account_a)
    };
    let key = derive(
        space::SPACE_RIPPLE_STATE,
        &[low.as_ref(), high.as_ref(), &currency],
    );
    Keylet::new(LedgerEntryType::RippleState, key)
}

pub fn escrow(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(space::SPACE_ESCROW, &[account.as_ref(), &sequence.to_be_bytes()]);
    Keylet::new(LedgerEntryType::Escrow, key)
}

pub fn check(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(space::SPACE_CHECK, &[account.as_ref(), &sequence.to_be_bytes()]);
    Keylet::new(LedgerEntryType::Check, key)
}

pub fn ticket(account: AccountId, ticket_sequence: u32) -> Keylet {
    let key = derive(
        space::SPACE_TICKET,
        &[account.as_ref(), &ticket_sequence.to_be_bytes()],
    );
    Keylet::new(LedgerEntryType::Ticket, key)
}

/// `SignerList` — singleton per account.
pub fn signer_list(account: AccountId) -> Keylet {
    let key = derive(space::SPACE_SIGNER_LIST, &[account.as_ref()]);
    Keylet::new(LedgerEntryType::SignerList, key)
}

pub fn pay_channel(account: AccountId, destination: AccountId, sequence: u32) -> Keylet {
    let key = derive(
        space::SPACE_PAY_CHANNEL,
        &[account.as_ref(), destination.as_ref(), &sequence.to_be_bytes()],
    );
    Keylet::new(LedgerEntryType::PayChannel, key)
}

pub fn nftoken_page(account: AccountId, low: Hash256) -> Keylet {
    let key = derive(space::SPACE_NFTOKEN_PAGE, &[account.as_ref(), low.as_bytes()]);
    Keylet::new(LedgerEntryType::NFTokenPage, key)
}

pub fn nftoken_offer(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(
        space::SPACE_NFTOKEN_OFFER,
        &[account.as_ref(), &sequence.to_be_bytes()],
    );
    Keylet::new(LedgerEntryType::NFTokenOffer, key)
}

pub fn deposit_preauth(account: AccountId, authorized: AccountId) -> Keylet {
    let key = derive(
        space::SPACE_DEPOSIT_PREAUTH,
        &[account.as_ref(), authorized.as_ref()],
    );
    Keylet::new(LedgerEntryType::DepositPreauth, key)
}

pub fn did(account: AccountId) -> Keylet {
    let key = derive(space::SPACE_DID, &[account.as_ref()]);
    Keylet::new(LedgerEntryType::DID, key)
}

pub fn oracle(account: AccountId, document_id: u32) -> Keylet {
    let key = derive(space::SPACE_ORACLE, &[account.as_ref(), &document_id.to_be_bytes()]);
    Keylet::new(LedgerEntryType::Oracle, key)
}

pub fn mpt_issuance(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(
        space::SPACE_MPT_ISSUANCE,
        &[account.as_ref(), &sequence.to_be_bytes()],
    );
    Keylet::new(LedgerEntryType::MPTokenIssuance, key)
}

pub fn mptoken(account: AccountId, issuance: Hash256) -> Keylet {
    let key = derive(space::SPACE_MPTOKEN, &[account.as_ref(), issuance.as_bytes()]);
    Keylet::new(LedgerEntryType::MPToken, key)
}

pub fn credential(subject: AccountId, issuer: AccountId, credential_type: &[u8]) -> Keylet {
    let key = derive(
        space::SPACE_CREDENTIAL,
        &[subject.as_ref(), issuer.as_ref(), credential_type],
    );
    Keylet::new(LedgerEntryType::Credential, key)
}

pub fn permissioned_domain(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(
        space::SPACE_PERMISSIONED_DOMAIN,
        &[account.as_ref(), &sequence.to_be_bytes()],
    );
    Keylet::new(LedgerEntryType::PermissionedDomain, key)
}

pub fn vault(account: AccountId, sequence: u32) -> Keylet {
    let key = derive(space::SPACE_VAULT, &[account.as_ref(), &sequence.to_be_bytes()]);
    Keylet::new(LedgerEntryType::Vault, key)
}

pub fn amm(asset1: Hash256, asset2: Hash256) -> Keylet {
    let (a, b) = if asset1.as_bytes() < asset2.as_bytes() {
        (asset1, asset2)
    } else {
        (asset2, asset1)
    };
    let key = derive(space::SPACE_AMM, &[a.as_bytes(), b.as_bytes()]);
    Keylet::new(LedgerEntryType::AMM, key)
}

pub fn bridge(account: AccountId, door: AccountId) -> Keylet {
    let key = derive(space::SPACE_BRIDGE, &[account.as_ref(), door.as_ref()]);
    Keylet::new(LedgerEntryType::Bridge, key)
}

pub fn xchain_owned_claim_id(bridge: Keylet, claim_id: u64) -> Keylet {
    let key = derive(space::SPACE_XCHAIN_CLAIM, &[bridge.key.as_bytes(), &claim_id.to_be_bytes()]);
    Keylet::new(LedgerEntryType::XChainOwnedClaimId, key)
}

pub fn xchain_owned_create_account_claim_id(bridge: Keylet, claim_id: u64) -> Keylet {
    let key = derive(space::SPACE_XCHAIN_CREATE, &[bridge.key.as_bytes(), &claim_id.to_be_bytes()]);
    Keylet::new(LedgerEntryType::XChainOwnedCreateAccountClaimId, key)
}

/// `FeeSettings` — singleton, no argument.
pub fn fee_settings() -> Keylet {
    let key = derive(space::SPACE_FEES, &[]);
    Keylet::new(LedgerEntryType::FeeSettings, key)
}

/// `Amendments` — singleton, no argument.
pub fn amendments() -> Keylet {
    let key = derive(space::SPACE_AMENDMENTS, &[]);
    Keylet::new(LedgerEntryType::Amendments, key)
}

/// The skip list (`LedgerHashes`) — singleton, no argument.
pub fn skip_list() -> Keylet {
    let key = derive(space::SPACE_SKIP_LIST, &[]);
    Keylet::new(LedgerEntryType::LedgerHashes, key)
}
