use crate::model::ledger::Ledger;
use anyhow::Result;

/// Load-at-startup / save-on-mutation contract for ledger snapshots.
pub trait LedgerRepository {
    /// Never fails: a missing or unreadable snapshot yields an empty ledger.
    fn load(&self) -> Ledger;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

impl<T: LedgerRepository + ?Sized> LedgerRepository for &T {
    fn load(&self) -> Ledger {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        (**self).save(ledger)
    }
}
