pub mod company_service;

pub use company_service::{CompanyError, CompanyService};
