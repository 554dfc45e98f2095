pub mod outcome;
pub mod read_result;
pub mod task;

pub use outcome::{BatchResult, DocumentOutcome, OcrOutcome};
pub use read_result::ReadOperationResult;
pub use task::{DocumentId, DocumentTask};
