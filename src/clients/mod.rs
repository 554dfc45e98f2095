pub mod ocr_client;

pub use ocr_client::{AzureReadClient, OcrApi, OcrJobHandle, PollPolicy};
