pub mod json_store;
pub mod memory;

use crate::{errors::FinanceError, finance::FinanceBook, schedule::Payment};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Abstraction over persistence backends for the tracker's collections.
///
/// Each collection is loaded and saved whole; record order inside a document
/// carries no meaning beyond insertion history.
pub trait StorageBackend: Send + Sync {
    fn load_payments(&self) -> Result<Vec<Payment>>;
    fn save_payments(&self, payments: &[Payment]) -> Result<()>;
    fn load_book(&self) -> Result<FinanceBook>;
    fn save_book(&self, book: &FinanceBook) -> Result<()>;
}

pub use json_store::JsonStorage;
pub use memory::MemoryStorage;
