use std::sync::Mutex;

use crate::{finance::FinanceBook, schedule::Payment};

use super::{Result, StorageBackend};

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payments: Mutex<Vec<Payment>>,
    book: Mutex<FinanceBook>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load_payments(&self) -> Result<Vec<Payment>> {
        let guard = self.payments.lock().unwrap_or_else(|err| err.into_inner());
        Ok(guard.clone())
    }

    fn save_payments(&self, payments: &[Payment]) -> Result<()> {
        let mut guard = self.payments.lock().unwrap_or_else(|err| err.into_inner());
        *guard = payments.to_vec();
        Ok(())
    }

    fn load_book(&self) -> Result<FinanceBook> {
        let guard = self.book.lock().unwrap_or_else(|err| err.into_inner());
        Ok(guard.clone())
    }

    fn save_book(&self, book: &FinanceBook) -> Result<()> {
        let mut guard = self.book.lock().unwrap_or_else(|err| err.into_inner());
        *guard = book.clone();
        Ok(())
    }
}
