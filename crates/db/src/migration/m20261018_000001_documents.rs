//! Documents table for the document-store backend.
//!
//! Every collection shares one table; rows are keyed by the physical
//! collection name and the record id.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS documents CASCADE;")
            .await?;
        Ok(())
    }
}

const DOCUMENTS_SQL: &str = r"
-- One row per stored record, any collection
CREATE TABLE documents (
    collection VARCHAR(255) NOT NULL,
    id VARCHAR(255) NOT NULL,
    body JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id),
    CONSTRAINT chk_documents_body_object CHECK (jsonb_typeof(body) = 'object')
);

-- Listing a collection in insertion order
CREATE INDEX idx_documents_collection_created ON documents(collection, created_at);
";
