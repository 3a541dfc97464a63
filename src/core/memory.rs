//! In-memory ledger store with row-locking transactions
//!
//! This module provides `MemoryLedgerStore`, the in-process backend for the
//! [`LedgerStore`](crate::core::traits::LedgerStore) contract.
//!
//! # Design
//!
//! Account rows live in a `DashMap` keyed by account id; each row is an
//! `Arc<Mutex<Account>>`. An exclusive read clones the `Arc` out of the map
//! (releasing the map shard immediately) and takes an owned `parking_lot`
//! guard on the row, so the row lock is held for the remainder of the
//! transaction without borrowing from the store. Lock acquisition is timed:
//! a transaction that cannot get a row within the configured lock-wait
//! timeout aborts with a retryable `TransactionFailure` instead of waiting
//! forever.
//!
//! Balance updates and payment inserts are buffered inside the transaction
//! and applied at commit while the row guards are still held. Dropping the
//! transaction discards the buffers, so rollback is the default and a
//! half-applied transfer cannot be observed.
//!
//! # Thread Safety
//!
//! All operations are safe to call from multiple threads. Transfers touching
//! disjoint account pairs proceed in parallel; transfers sharing a row
//! serialize on that row's lock. Point-in-time reads take the row lock
//! briefly, so they never observe a transaction's uncommitted state.

use crate::core::traits::{LedgerStore, LedgerTx};
use crate::types::{Account, AccountId, Payment, PaymentDraft, TransferError};
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Owned guard on one account row, valid until the transaction ends
type RowGuard = parking_lot::lock_api::ArcMutexGuard<parking_lot::RawMutex, Account>;

/// How long a transaction waits for a contended row lock by default
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory implementation of the ledger store
///
/// Holds the account table, the append-only payment table, and the payment
/// id counter. Cheap to share behind an `Arc`; all methods take `&self`.
pub struct MemoryLedgerStore {
    /// Account rows; the `Arc` is cloned out of the map before locking so
    /// guards never borrow from a map shard
    rows: DashMap<AccountId, Arc<Mutex<Account>>>,

    /// Append-only payment table in insertion order
    payments: Mutex<Vec<Payment>>,

    /// Source of store-assigned payment ids; ids start at 1
    next_payment_id: AtomicU64,

    /// Lock-wait timeout for exclusive reads
    lock_timeout: Duration,
}

impl MemoryLedgerStore {
    /// Create an empty store with the default lock-wait timeout
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty store with a caller-supplied lock-wait timeout
    ///
    /// A transaction that cannot acquire a row lock within `lock_timeout`
    /// aborts with [`TransferError::TransactionFailure`] and rolls back.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        MemoryLedgerStore {
            rows: DashMap::new(),
            payments: Mutex::new(Vec::new()),
            next_payment_id: AtomicU64::new(0),
            lock_timeout,
        }
    }

    /// Clone the row `Arc` for an id, if the account exists
    fn row(&self, id: &str) -> Option<Arc<Mutex<Account>>> {
        self.rows.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether `arc` is still the live row for `id`
    ///
    /// A row can be deleted while another session waits on its lock; the
    /// waiter then holds a guard on an orphaned row and must treat the
    /// account as gone.
    fn is_live(&self, id: &str, arc: &Arc<Mutex<Account>>) -> bool {
        self.rows
            .get(id)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), arc))
    }
}

impl Default for MemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryLedgerStore {
    type Tx<'a> = MemoryTx<'a>;

    fn begin(&self) -> Result<MemoryTx<'_>, TransferError> {
        Ok(MemoryTx {
            store: self,
            locked: Vec::new(),
            pending_payments: Vec::new(),
        })
    }

    fn create_account(&self, account: Account) -> Result<(), TransferError> {
        if account.balance < Decimal::ZERO {
            return Err(TransferError::invalid_amount(account.balance));
        }

        // The entry call makes the existence check and the insert one atomic
        // step, so two racing opens of the same id cannot both succeed.
        let id = account.id.clone();
        let mut inserted = false;
        self.rows.entry(id.clone()).or_insert_with(|| {
            inserted = true;
            Arc::new(Mutex::new(account))
        });

        if inserted {
            Ok(())
        } else {
            Err(TransferError::duplicate_account(&id))
        }
    }

    fn find_account(&self, id: &str) -> Result<Option<Account>, TransferError> {
        let Some(arc) = self.row(id) else {
            return Ok(None);
        };

        // Blocks until any transaction holding the row commits or rolls
        // back, so uncommitted state is never observed.
        let account = arc.lock().clone();
        if !self.is_live(id, &arc) {
            return Ok(None);
        }
        Ok(Some(account))
    }

    fn list_accounts(&self) -> Result<Vec<Account>, TransferError> {
        // Snapshot the row Arcs first so no map shard is held while locking rows.
        let arcs: Vec<Arc<Mutex<Account>>> = self
            .rows
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts: Vec<Account> = arcs.iter().map(|arc| arc.lock().clone()).collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    fn find_payments(&self, account_id: &str) -> Result<Vec<Payment>, TransferError> {
        let payments = self.payments.lock();
        Ok(payments
            .iter()
            .filter(|payment| payment.account == account_id)
            .cloned()
            .collect())
    }

    fn list_payments(&self) -> Result<Vec<Payment>, TransferError> {
        Ok(self.payments.lock().clone())
    }

    fn delete_account(&self, id: &str) -> Result<(), TransferError> {
        let Some(arc) = self.row(id) else {
            return Err(TransferError::account_not_found(id));
        };

        // Hold the row lock across the removal so an in-flight transfer
        // either finished before us or will see the row as gone.
        let guard = arc
            .try_lock_arc_for(self.lock_timeout)
            .ok_or_else(|| lock_timeout_error(id))?;
        if !self.is_live(id, &arc) {
            return Err(TransferError::account_not_found(id));
        }
        if guard.balance != Decimal::ZERO {
            return Err(TransferError::account_not_empty(id, guard.balance));
        }

        self.rows.remove(id);
        Ok(())
    }
}

/// One locked row inside an open transaction
struct LockedRow {
    id: AccountId,
    guard: RowGuard,
    /// Buffered balance write; applied to the row at commit
    new_balance: Option<Decimal>,
}

/// An open transaction against a [`MemoryLedgerStore`]
///
/// Owns the row guards it has acquired. All writes are buffered; commit
/// applies them while the guards are held, and dropping the transaction
/// rolls everything back.
pub struct MemoryTx<'a> {
    store: &'a MemoryLedgerStore,
    locked: Vec<LockedRow>,
    pending_payments: Vec<PaymentDraft>,
}

impl MemoryTx<'_> {
    /// Current state of a locked row as this transaction sees it
    fn buffered_view(row: &LockedRow) -> Account {
        let mut account = row.guard.clone();
        if let Some(balance) = row.new_balance {
            account.balance = balance;
        }
        account
    }
}

impl LedgerTx for MemoryTx<'_> {
    fn read_for_update(&mut self, id: &str) -> Result<Option<Account>, TransferError> {
        // Re-reading a row this transaction already locked must not block
        // on our own guard; return the buffered state instead.
        if let Some(row) = self.locked.iter().find(|row| row.id == id) {
            return Ok(Some(Self::buffered_view(row)));
        }

        let Some(arc) = self.store.row(id) else {
            return Ok(None);
        };

        let guard = arc
            .try_lock_arc_for(self.store.lock_timeout)
            .ok_or_else(|| lock_timeout_error(id))?;

        // The row may have been deleted while we waited for its lock.
        if !self.store.is_live(id, &arc) {
            return Ok(None);
        }

        let account = guard.clone();
        self.locked.push(LockedRow {
            id: id.to_string(),
            guard,
            new_balance: None,
        });
        Ok(Some(account))
    }

    fn update_balance(&mut self, id: &str, new_balance: Decimal) -> Result<(), TransferError> {
        let Some(row) = self.locked.iter_mut().find(|row| row.id == id) else {
            return Err(TransferError::transaction_failure(format!(
                "account {id} is not locked by this transaction"
            )));
        };
        row.new_balance = Some(new_balance);
        Ok(())
    }

    fn insert_payment(&mut self, draft: PaymentDraft) -> Result<(), TransferError> {
        self.pending_payments.push(draft);
        Ok(())
    }

    fn commit(mut self) -> Result<(), TransferError> {
        // Apply buffered balances while every row guard is still held, then
        // append the ledger entries before any lock is released. Nothing
        // here can fail part-way in a way another session could observe.
        for row in &mut self.locked {
            if let Some(balance) = row.new_balance.take() {
                row.guard.balance = balance;
            }
        }

        if !self.pending_payments.is_empty() {
            let mut payments = self.store.payments.lock();
            for draft in self.pending_payments.drain(..) {
                let id = self.store.next_payment_id.fetch_add(1, Ordering::Relaxed) + 1;
                payments.push(draft.into_payment(id));
            }
        }

        // Guards drop here, releasing the row locks.
        Ok(())
    }

    fn rollback(self) {
        // Buffers are discarded and guards released on drop.
    }
}

fn lock_timeout_error(id: &str) -> TransferError {
    TransferError::transaction_failure(format!("timed out waiting for lock on account {id}"))
}
