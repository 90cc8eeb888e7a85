//! # FAQ Desk Store
//!
//! Whole-document persistence for the FAQ set plus the admin mutations.
//!
//! Every operation loads the full document, mutates it in memory and writes
//! it back through a [`FaqRepository`]. There is no locking: two admins
//! editing at once race and the last save wins.

pub mod faq_store;
pub mod json_file;
pub mod memory;

pub use faq_store::FaqStore;
pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

pub use faqdesk_core::traits::FaqRepository;
