//! Node-store: a content-addressed blob collaborator (spec §4.9, §6).
//!
//! Grounded on `qc-02-block-storage::ports::outbound::KeyValueStore` and
//! its `InMemoryKVStore` adapter — a trait for the host to implement
//! (production backs it with a real store) paired with a `HashMap`-backed
//! reference implementation for tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use ledger_types::{Hash256, LedgerError, LedgerResult};

/// Node kinds, see spec §4.9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Ledger,
    Account,
    Transaction,
    Dummy,
    Unknown,
}

impl NodeType {
    pub fn code(self) -> u8 {
        match self {
            NodeType::Ledger => 0,
            NodeType::Account => 1,
            NodeType::Transaction => 2,
            NodeType::Dummy => 3,
            NodeType::Unknown => 255,
        }
    }

    pub fn from_code(code: u8) -> NodeType {
        match code {
            0 => NodeType::Ledger,
            1 => NodeType::Account,
            2 => NodeType::Transaction,
            3 => NodeType::Dummy,
            _ => NodeType::Unknown,
        }
    }
}

/// A single content-addressed blob: `{type, hash, data, ledger_seq}`.
/// `ledger_seq` is caller-side metadata (used for batching and logging);
/// the on-disk blob layout (`[type byte][raw bytes]`, spec §6) does not
/// carry it, so it does not round-trip through `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,
    pub hash: Hash256,
    pub data: Vec<u8>,
    pub ledger_seq: u32,
}

impl Node {
    /// `[1 byte: type code][raw entry bytes]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.data.len());
        out.push(self.node_type.code());
        out.extend_from_slice(&self.data);
        out
    }

    pub fn decode(hash: Hash256, bytes: &[u8]) -> LedgerResult<Node> {
        if bytes.is_empty() {
            return Err(LedgerError::SerializationError(
                "empty node-store blob".to_string(),
            ));
        }
        Ok(Node {
            node_type: NodeType::from_code(bytes[0]),
            hash,
            data: bytes[1..].to_vec(),
            ledger_seq: 0,
        })
    }
}

/// Content-addressed blob store keyed by 256-bit hash (spec §4.9).
/// Durability is demanded only after `sync()`.
pub trait NodeStore: Send + Sync {
    fn store(&self, node: Node) -> LedgerResult<()>;
    fn store_batch(&self, nodes: Vec<Node>) -> LedgerResult<()>;
    fn fetch(&self, hash: Hash256) -> LedgerResult<Option<Node>>;
    fn exists(&self, hash: Hash256) -> LedgerResult<bool>;
    fn delete(&self, hash: Hash256) -> LedgerResult<()>;
    fn sync(&self) -> LedgerResult<()>;
}

/// In-memory `NodeStore` reference implementation. `sync()` is a no-op:
/// writes are already durable the moment they're applied to the map.
#[derive(Default)]
pub struct InMemoryNodeStore {
    blobs: RwLock<HashMap<Hash256, Vec<u8>>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn store(&self, node: Node) -> LedgerResult<()> {
        self.blobs.write().insert(node.hash, node.encode());
        Ok(())
    }

    fn store_batch(&self, nodes: Vec<Node>) -> LedgerResult<()> {
        let mut blobs = self.blobs.write();
        for node in nodes {
            blobs.insert(node.hash, node.encode());
        }
        Ok(())
    }

    fn fetch(&self, hash: Hash256) -> LedgerResult<Option<Node>> {
        match self.blobs.read().get(&hash) {
            Some(bytes) => Ok(Some(Node::decode(hash, bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, hash: Hash256) -> LedgerResult<bool> {
        Ok(self.blobs.read().contains_key(&hash))
    }

    fn delete(&self, hash: Hash256) -> LedgerResult<()> {
        self.blobs.write().remove(&hash);
        Ok(())
    }

    fn sync(&self) -> LedgerResult<()> {
        Ok(())
    }
}
