//! Seams between the FAQ Desk crates.

pub mod oracle;
pub mod repository;

pub use oracle::Oracle;
pub use repository::FaqRepository;
