//! Audit infrastructure - storage-backed repository and read service

mod repository;
mod service;

pub use repository::StorageAuditRepository;
pub use service::AuditService;
