use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{ping, DatabaseError};
use crate::database::query_builder;
use crate::models::{Company, CompanyPatch, NewCompany};

/// CRUD gateway over the companies table
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// All companies; empty when there are none
    async fn list(&self) -> Result<Vec<Company>, DatabaseError>;

    /// One company or `DatabaseError::NotFound`
    async fn get_by_id(&self, id: Uuid) -> Result<Company, DatabaseError>;

    /// Insert with a store-assigned id and return the stored row
    async fn create(&self, company: NewCompany) -> Result<Company, DatabaseError>;

    /// Apply only the supplied fields; `DatabaseError::NotFound` when no row matched
    async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<Uuid, DatabaseError>;

    /// Number of rows removed
    async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub(crate) fn not_found(id: Uuid) -> DatabaseError {
    DatabaseError::NotFound(format!("No company found for ID {}", id))
}

/// Postgres-backed store; every statement binds its values
#[derive(Clone)]
pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn list(&self) -> Result<Vec<Company>, DatabaseError> {
        let rows = sqlx::query_as::<_, Company>(&query_builder::select_all())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Company, DatabaseError> {
        sqlx::query_as::<_, Company>(&query_builder::select_by_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, company: NewCompany) -> Result<Company, DatabaseError> {
        let row = sqlx::query_as::<_, Company>(&query_builder::insert())
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.amount_of_employees)
            .bind(company.registered)
            .bind(company.company_type.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<Uuid, DatabaseError> {
        let mut builder = query_builder::update_statement(id, patch)
            .ok_or_else(|| DatabaseError::QueryError("update with no fields".to_string()))?;

        builder
            .build_query_scalar::<Uuid>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query(&query_builder::delete_by_id())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        ping(&self.pool).await
    }
}
