pub mod manager;
pub mod memory;
pub mod models;
pub mod query_builder;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryStudentRepository;
pub use models::{NewStudent, Student};
pub use repository::{PgStudentRepository, StudentRepository};
