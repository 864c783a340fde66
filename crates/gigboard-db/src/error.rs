//! Catalog error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i32 },

    #[error("{entity} {id} still has {shows} show(s)")]
    HasDependents {
        entity: &'static str,
        id: i32,
        shows: u64,
    },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn missing_reference(entity: &'static str, id: i32) -> Self {
        Self::MissingReference { entity, id }
    }
}
