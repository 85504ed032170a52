use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{CompanyStore, DatabaseError};
use crate::models::Company;
use crate::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum CompanyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Invariant(String),
}

/// Runs each request through identifier check, schema guard and payload
/// validation before anything reaches the store.
#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }

    /// Every company for an empty id; otherwise a one-element list or NotFound
    pub async fn find(&self, raw_id: &str) -> Result<Vec<Company>, CompanyError> {
        match validation::parse_identifier(raw_id)? {
            None => Ok(self.store.list().await?),
            Some(id) => Ok(vec![self.store.get_by_id(id).await?]),
        }
    }

    pub async fn create(&self, payload: &Map<String, Value>) -> Result<Company, CompanyError> {
        validation::check_fields::<Company>(payload)?;
        let company = validation::validate_create(payload)?;

        let created = self.store.create(company).await?;
        info!(company_id = %created.id, name = %created.name, "Created company");
        Ok(created)
    }

    pub async fn update(
        &self,
        raw_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Uuid, CompanyError> {
        let id = validation::require_identifier(raw_id)?;
        validation::check_fields::<Company>(payload)?;
        let patch = validation::validate_update(payload)?;

        debug!(company_id = %id, ?patch, "Applying company patch");
        let updated = self.store.update(id, &patch).await?;
        info!(company_id = %updated, "Updated company");
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Uuid, CompanyError> {
        let id = validation::require_identifier(raw_id)?;

        match self.store.delete(id).await? {
            0 => Err(DatabaseError::NotFound("Company not found".to_string()).into()),
            1 => {
                info!(company_id = %id, "Deleted company");
                Ok(id)
            }
            n => Err(CompanyError::Invariant(format!(
                "delete of company {} removed {} rows",
                id, n
            ))),
        }
    }
}
