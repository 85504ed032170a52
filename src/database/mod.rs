pub mod company_store;
pub mod manager;
pub mod memory;
pub mod query_builder;
pub mod user_store;

pub use company_store::{CompanyStore, PgCompanyStore};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryCompanyStore, MemoryUserStore};
pub use user_store::{PgUserStore, UserStore};
