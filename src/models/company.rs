use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use super::Entity;

/// Legal form of a company; the label is what gets stored and serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Corporations,
    NonProfit,
    Cooperative,
    #[serde(rename = "Sole Proprietorship")]
    SoleProprietorship,
}

impl CompanyType {
    pub const ALL: [CompanyType; 4] = [
        CompanyType::Corporations,
        CompanyType::NonProfit,
        CompanyType::Cooperative,
        CompanyType::SoleProprietorship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Corporations => "Corporations",
            CompanyType::NonProfit => "NonProfit",
            CompanyType::Cooperative => "Cooperative",
            CompanyType::SoleProprietorship => "Sole Proprietorship",
        }
    }

    /// "Corporations, NonProfit, Cooperative, Sole Proprietorship"
    pub fn accepted_values() -> String {
        Self::ALL
            .iter()
            .map(CompanyType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown company type: {0}")]
pub struct UnknownCompanyType(pub String);

impl FromStr for CompanyType {
    type Err = UnknownCompanyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownCompanyType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub amount_of_employees: Option<i32>,
    pub registered: Option<bool>,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

impl Entity for Company {
    const TABLE: &'static str = "companies";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "amount_of_employees",
        "registered",
        "type",
    ];
}

impl<'r> FromRow<'r, PgRow> for Company {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("type")?;
        let company_type = kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "type".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row
                .try_get::<Option<String>, _>("description")?
                .unwrap_or_default(),
            amount_of_employees: row.try_get("amount_of_employees")?,
            registered: row.try_get("registered")?,
            company_type,
        })
    }
}

/// A fully validated creation payload; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub description: String,
    pub amount_of_employees: Option<i32>,
    pub registered: bool,
    pub company_type: CompanyType,
}

impl NewCompany {
    pub fn into_company(self, id: Uuid) -> Company {
        Company {
            id,
            name: self.name,
            description: self.description,
            amount_of_employees: self.amount_of_employees,
            registered: Some(self.registered),
            company_type: self.company_type,
        }
    }
}

/// Distinguishes "not in the payload" from any supplied value, including null
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Patch::Present(_))
    }
}

/// Validated partial update. Absent fields are left untouched in storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyPatch {
    pub name: Patch<String>,
    pub description: Patch<String>,
    /// `Present(None)` clears the column
    pub amount_of_employees: Patch<Option<i32>>,
    pub registered: Patch<bool>,
    pub company_type: Patch<CompanyType>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        !(self.name.is_present()
            || self.description.is_present()
            || self.amount_of_employees.is_present()
            || self.registered.is_present()
            || self.company_type.is_present())
    }

    pub fn apply_to(&self, company: &mut Company) {
        if let Patch::Present(name) = &self.name {
            company.name = name.clone();
        }
        if let Patch::Present(description) = &self.description {
            company.description = description.clone();
        }
        if let Patch::Present(amount) = self.amount_of_employees {
            company.amount_of_employees = amount;
        }
        if let Patch::Present(registered) = self.registered {
            company.registered = Some(registered);
        }
        if let Patch::Present(kind) = self.company_type {
            company.company_type = kind;
        }
    }
}
