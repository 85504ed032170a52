use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Company, CompanyPatch, Entity, Patch};

const COLUMNS: &str = "id, name, description, amount_of_employees, registered, type";

pub fn select_all() -> String {
    format!("SELECT {} FROM {} ORDER BY name, id", COLUMNS, Company::TABLE)
}

pub fn select_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, Company::TABLE)
}

pub fn insert() -> String {
    format!(
        "INSERT INTO {} (name, description, amount_of_employees, registered, type) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        Company::TABLE,
        COLUMNS
    )
}

pub fn delete_by_id() -> String {
    format!("DELETE FROM {} WHERE id = $1", Company::TABLE)
}

/// `UPDATE companies SET ... WHERE id = $n RETURNING id` with one placeholder per
/// supplied field. Returns None for an empty patch.
pub fn update_statement(id: Uuid, patch: &CompanyPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", Company::TABLE));
    {
        let mut set = builder.separated(", ");
        if let Patch::Present(name) = &patch.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Patch::Present(description) = &patch.description {
            set.push("description = ").push_bind_unseparated(description.clone());
        }
        if let Patch::Present(amount) = patch.amount_of_employees {
            set.push("amount_of_employees = ").push_bind_unseparated(amount);
        }
        if let Patch::Present(registered) = patch.registered {
            set.push("registered = ").push_bind_unseparated(registered);
        }
        if let Patch::Present(kind) = patch.company_type {
            set.push("type = ").push_bind_unseparated(kind.as_str());
        }
    }
    builder.push(" WHERE id = ").push_bind(id).push(" RETURNING id");

    Some(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyType;

    #[test]
    fn empty_patch_builds_nothing() {
        assert!(update_statement(Uuid::new_v4(), &CompanyPatch::default()).is_none());
    }

    #[test]
    fn every_supplied_field_gets_a_placeholder() {
        let patch = CompanyPatch {
            name: Patch::Present("Robert'); DROP TABLE companies;--".to_string()),
            company_type: Patch::Present(CompanyType::NonProfit),
            ..Default::default()
        };
        let builder = update_statement(Uuid::new_v4(), &patch).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE companies SET name = $1, type = $2 WHERE id = $3 RETURNING id"
        );
    }

    #[test]
    fn full_patch_orders_columns_consistently() {
        let patch = CompanyPatch {
            name: Patch::Present("Acme".to_string()),
            description: Patch::Present(String::new()),
            amount_of_employees: Patch::Present(None),
            registered: Patch::Present(true),
            company_type: Patch::Present(CompanyType::Cooperative),
        };
        let builder = update_statement(Uuid::new_v4(), &patch).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE companies SET name = $1, description = $2, amount_of_employees = $3, \
             registered = $4, type = $5 WHERE id = $6 RETURNING id"
        );
    }

    #[test]
    fn fixed_statements_use_placeholders() {
        assert!(select_by_id().ends_with("WHERE id = $1"));
        assert!(delete_by_id().ends_with("WHERE id = $1"));
        assert!(insert().contains("VALUES ($1, $2, $3, $4, $5)"));
    }
}
