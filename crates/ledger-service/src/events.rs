//! Lifecycle event types and asynchronous, bounded dispatch (spec §4.10, §9).
//!
//! Grounded on `qc-02-block-storage::bus::adapter::BlockStorageBusAdapter`'s
//! callback-publishing shape (an adapter holding `Option<Box<dyn Fn(...)>>`
//! subscriber slots), generalized from that adapter's synchronous,
//! stubbed-out publish into genuine dispatch on dedicated worker threads
//! with a bounded, drop-oldest queue per subscriber — spec §9 requires
//! handlers never run under the writer lock and a bounded backlog with an
//! explicit overflow policy, neither of which the teacher's stub shows.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use ledger_types::Hash256;

/// Per-ledger summary delivered on close (spec §4.10).
#[derive(Debug, Clone)]
pub struct LedgerClosedInfo {
    pub sequence: u32,
    pub hash: Hash256,
    pub parent_hash: Hash256,
    pub close_time: u64,
    pub tx_count: usize,
    /// Human-readable validated range, e.g. `"2-6"` or `"empty"`.
    pub validated_ledgers_range: String,
}

/// Per-transaction summary delivered alongside `OnLedgerClosed` (spec §4.10).
#[derive(Debug, Clone)]
pub struct TransactionInfo {
    pub tx_hash: Hash256,
    pub result: String,
    pub ledger_seq: u32,
    pub ledger_hash: Hash256,
    pub close_time: u64,
}

/// The legacy combined callback payload: a whole ledger's close info plus
/// every transaction result it carried, in one delivery.
#[derive(Debug, Clone)]
pub struct LegacyEventPayload {
    pub ledger: LedgerClosedInfo,
    pub transactions: Vec<TransactionInfo>,
}

/// Default queue depth before a subscriber starts dropping its oldest
/// undelivered event (spec §9: "bound the queue and drop oldest with a
/// warning on overflow, policy documented by the implementation").
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

struct BoundedQueue<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
    condvar: Condvar,
    shutdown: AtomicBool,
}

impl<T: Send + 'static> BoundedQueue<T> {
    fn new(capacity: usize) -> Arc<Self> {
        Arc::new(BoundedQueue {
            capacity: capacity.max(1),
            items: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Pushes an item, dropping the oldest queued one if at capacity.
    fn push(&self, item: T) {
        let mut items = self.items.lock();
        if items.len() >= self.capacity {
            items.pop_front();
            tracing::warn!(capacity = self.capacity, "event subscriber queue full, dropping oldest event");
        }
        items.push_back(item);
        self.condvar.notify_one();
    }

    fn pop_blocking(&self) -> Option<T> {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return Some(item);
            }
            if self.shutdown.load(Ordering::Acquire) {
                return None;
            }
            self.condvar.wait(&mut items);
        }
    }

    fn close(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.condvar.notify_all();
    }
}

/// One subscription: a dedicated worker thread draining a bounded,
/// drop-oldest queue and invoking the subscriber's handler. Never runs
/// under the service's writer lock.
struct Subscription<T: Send + 'static> {
    queue: Arc<BoundedQueue<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Subscription<T> {
    fn new(capacity: usize, mut handler: impl FnMut(T) + Send + 'static) -> Self {
        let queue = BoundedQueue::new(capacity);
        let worker_queue = queue.clone();
        let worker = std::thread::spawn(move || {
            while let Some(item) = worker_queue.pop_blocking() {
                handler(item);
            }
        });
        Subscription {
            queue,
            worker: Some(worker),
        }
    }

    fn publish(&self, item: T) {
        self.queue.push(item);
    }
}

impl<T: Send + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.queue.close();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Subscriber registry and dispatcher for the three event surfaces spec
/// §4.10 names: `OnLedgerClosed`, `OnTransaction`, and the legacy combined
/// `EventCallback`. `OnValidation` is reserved for multi-node mode and has
/// no hook here (spec §4.10).
#[derive(Default)]
pub struct EventHub {
    on_ledger_closed: Mutex<Vec<Subscription<LedgerClosedInfo>>>,
    on_transaction: Mutex<Vec<Subscription<TransactionInfo>>>,
    legacy_callback: Mutex<Vec<Subscription<LegacyEventPayload>>>,
    queue_capacity: usize,
}

impl EventHub {
    pub fn new(queue_capacity: usize) -> Self {
        EventHub {
            on_ledger_closed: Mutex::new(Vec::new()),
            on_transaction: Mutex::new(Vec::new()),
            legacy_callback: Mutex::new(Vec::new()),
            queue_capacity,
        }
    }

    pub fn on_ledger_closed(&self, handler: impl FnMut(LedgerClosedInfo) + Send + 'static) {
        self.on_ledger_closed
            .lock()
            .push(Subscription::new(self.queue_capacity, handler));
    }

    pub fn on_transaction(&self, handler: impl FnMut(TransactionInfo) + Send + 'static) {
        self.on_transaction
            .lock()
            .push(Subscription::new(self.queue_capacity, handler));
    }

    pub fn set_event_callback(&self, handler: impl FnMut(LegacyEventPayload) + Send + 'static) {
        self.legacy_callback
            .lock()
            .push(Subscription::new(self.queue_capacity, handler));
    }

    /// Fans a single closed ledger out to every subscription kind. Called
    /// after the writer lock is released (spec §5: "event publication
    /// happens after the state transition completes").
    pub fn publish_ledger_closed(&self, ledger: LedgerClosedInfo, transactions: Vec<TransactionInfo>) {
        for sub in self.on_ledger_closed.lock().iter() {
            sub.publish(ledger.clone());
        }
        for sub in self.on_transaction.lock().iter() {
            for tx in &transactions {
                sub.publish(tx.clone());
            }
        }
        if !self.legacy_callback.lock().is_empty() {
            let payload = LegacyEventPayload {
                ledger,
                transactions,
            };
            for sub in self.legacy_callback.lock().iter() {
                sub.publish(payload.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn ledger_closed_and_transaction_subscribers_both_receive_events() {
        let hub = EventHub::new(DEFAULT_QUEUE_CAPACITY);
        let (ledger_tx, ledger_rx) = mpsc::channel();
        let (txn_tx, txn_rx) = mpsc::channel();

        hub.on_ledger_closed(move |info| ledger_tx.send(info.sequence).unwrap());
        hub.on_transaction(move |tx| txn_tx.send(tx.tx_hash).unwrap());

        let info = LedgerClosedInfo {
            sequence: 3,
            hash: Hash256::new([3; 32]),
            parent_hash: Hash256::new([2; 32]),
            close_time: 10,
            tx_count: 1,
            validated_ledgers_range: "2-3".to_string(),
        };
        let tx_info = TransactionInfo {
            tx_hash: Hash256::new([9; 32]),
            result: "tesSUCCESS".to_string(),
            ledger_seq: 3,
            ledger_hash: Hash256::new([3; 32]),
            close_time: 10,
        };

        hub.publish_ledger_closed(info, vec![tx_info]);

        assert_eq!(ledger_rx.recv_timeout(std::time::Duration::from_secs(2)).unwrap(), 3);
        assert_eq!(
            txn_rx.recv_timeout(std::time::Duration::from_secs(2)).unwrap(),
            Hash256::new([9; 32])
        );
    }

    #[test]
    fn overflowing_queue_drops_oldest_not_newest() {
        let queue = BoundedQueue::<u32>::new(2);
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.pop_blocking(), Some(2));
        assert_eq!(queue.pop_blocking(), Some(3));
    }

    #[test]
    fn legacy_callback_receives_combined_payload() {
        let hub = EventHub::new(DEFAULT_QUEUE_CAPACITY);
        let (tx, rx) = mpsc::channel();
        hub.set_event_callback(move |payload| tx.send(payload.transactions.len()).unwrap());

        let info = LedgerClosedInfo {
            sequence: 1,
            hash: Hash256::ZERO,
            parent_hash: Hash256::ZERO,
            close_time: 0,
            tx_count: 2,
            validated_ledgers_range: "1-1".to_string(),
        };
        hub.publish_ledger_closed(
            info,
            vec![
                TransactionInfo {
                    tx_hash: Hash256::new([1; 32]),
                    result: "tesSUCCESS".to_string(),
                    ledger_seq: 1,
                    ledger_hash: Hash256::ZERO,
                    close_time: 0,
                },
                TransactionInfo {
                    tx_hash: Hash256::new([2; 32]),
                    result: "tesSUCCESS".to_string(),
                    ledger_seq: 1,
                    ledger_hash: Hash256::ZERO,
                    close_time: 0,
                },
            ],
        );

        assert_eq!(rx.recv_timeout(std::time::Duration::from_secs(2)).unwrap(), 2);
    }
}
