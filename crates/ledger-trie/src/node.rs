//! Trie node types and their canonical byte encoding.
//!
//! Grounded on `qc-04-state-management::domain::trie::TrieNode`, with the
//! node hash switched from Keccak256 to this workspace's `sha512_half` and
//! values carrying opaque bytes instead of RLP-encoded account state.

use ledger_crypto::sha512_half;
use ledger_types::Hash256;

use crate::nibbles::Nibbles;

/// Hash of the canonically-empty trie.
pub const EMPTY_TRIE_ROOT: Hash256 = Hash256::new([0u8; 32]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    Empty,
    Leaf {
        path: Nibbles,
        value: Vec<u8>,
    },
    Extension {
        path: Nibbles,
        child: Hash256,
    },
    Branch {
        children: Box<[Option<Hash256>; 16]>,
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    /// Canonical byte encoding used for hashing (length-prefixed items,
    /// list framed by total length).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            TrieNode::Empty => vec![0x00],
            TrieNode::Leaf { path, value } => {
                encode_tagged(0x01, &[&path.encode_hex_prefix(true), value])
            }
            TrieNode::Extension { path, child } => {
                encode_tagged(0x02, &[&path.encode_hex_prefix(false), child.as_bytes()])
            }
            TrieNode::Branch { children, value } => {
                let mut items: Vec<Vec<u8>> = Vec::with_capacity(17);
                for child in children.iter() {
                    match child {
                        Some(hash) => items.push(hash.as_bytes().to_vec()),
                        None => items.push(Vec::new()),
                    }
                }
                items.push(value.clone().unwrap_or_default());
                let refs: Vec<&[u8]> = items.iter().map(Vec::as_slice).collect();
                encode_tagged(0x03, &refs)
            }
        }
    }

    pub fn hash(&self) -> Hash256 {
        if matches!(self, TrieNode::Empty) {
            return EMPTY_TRIE_ROOT;
        }
        sha512_half(self.encode())
    }
}

/// Length-prefix each item, then frame the whole list with a tag byte and
/// an item count, so encodings of different node shapes never collide.
fn encode_tagged(tag: u8, items: &[&[u8]]) -> Vec<u8> {
    let mut out = vec![tag, items.len() as u8];
    for item in items {
        out.extend_from_slice(&(item.len() as u32).to_be_bytes());
        out.extend_from_slice(item);
    }
    out
}
