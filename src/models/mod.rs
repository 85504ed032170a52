pub mod company;

pub use company::{Company, CompanyPatch, CompanyType, NewCompany, Patch};

/// A persisted resource with a statically declared set of JSON field names
pub trait Entity {
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];
}
