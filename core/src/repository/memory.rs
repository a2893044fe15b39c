use std::cell::{Cell, RefCell};

use anyhow::Result;

use crate::model::ledger::Ledger;
use crate::repository::traits::LedgerRepository;

/// Keeps the last saved snapshot in memory. Useful for tests and for
/// sessions that should not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryLedgerRepository {
    snapshot: RefCell<Option<Ledger>>,
    saves: Cell<usize>,
}

impl MemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts as if `ledger` had already been saved once.
    pub fn with_snapshot(ledger: Ledger) -> Self {
        Self {
            snapshot: RefCell::new(Some(ledger)),
            saves: Cell::new(0),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl LedgerRepository for MemoryLedgerRepository {
    fn load(&self) -> Ledger {
        self.snapshot.borrow().clone().unwrap_or_default()
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        *self.snapshot.borrow_mut() = Some(ledger.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
