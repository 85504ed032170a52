use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::company_store::{not_found, CompanyStore};
use crate::database::manager::DatabaseError;
use crate::database::user_store::UserStore;
use crate::models::{Company, CompanyPatch, NewCompany};

/// In-process company store for local runs without Postgres and for tests
#[derive(Default)]
pub struct MemoryCompanyStore {
    rows: RwLock<Vec<Company>>,
}

impl MemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn list(&self) -> Result<Vec<Company>, DatabaseError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Company, DatabaseError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, company: NewCompany) -> Result<Company, DatabaseError> {
        let company = company.into_company(Uuid::new_v4());
        self.rows.write().await.push(company.clone());
        Ok(company)
    }

    async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<Uuid, DatabaseError> {
        let mut rows = self.rows.write().await;
        let company = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;
        patch.apply_to(company);
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Fixed username/password pairs
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: HashMap<String, String>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, DatabaseError> {
        Ok(self.users.get(username).is_some_and(|stored| stored == password))
    }
}
