// ==========================================
// EventFab Element Import - Repository Layer
// ==========================================
// Responsibility: data access interfaces, hiding database detail.
// Constraint: all queries parameterized; no business rules here.
// ==========================================

pub mod element_import_repo;
pub mod element_import_repo_impl;
pub mod error;

// Re-export core repositories
pub use element_import_repo::ElementImportRepository;
pub use element_import_repo_impl::ElementImportRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
