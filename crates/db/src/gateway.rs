//! Document-store gateway over the `documents` table.

use chrono::Utc;
use sarraf_core::gateway::{
    CollectionNamer, Document, DocumentGateway, GatewayError, Patch, document_id,
    merge_document, sanitize_patch,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use tracing::debug;

use crate::entities::documents;

/// Gateway storing each record as a JSONB row.
///
/// `insert` is an upsert: a repeated id overwrites the stored body.
#[derive(Debug, Clone)]
pub struct DocumentStoreGateway {
    db: DatabaseConnection,
    namer: CollectionNamer,
}

impl DocumentStoreGateway {
    /// Creates a gateway over an open connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, collection_prefix: Option<&str>) -> Self {
        Self {
            db,
            namer: CollectionNamer::new(collection_prefix),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn find_row(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<documents::Model>, GatewayError> {
        documents::Entity::find_by_id((self.namer.physical(collection), id.to_string()))
            .one(&self.db)
            .await
            .map_err(db_error)
    }
}

fn db_error(err: DbErr) -> GatewayError {
    GatewayError::backend(err.to_string())
}

fn into_document(body: Value) -> Result<Document, GatewayError> {
    match body {
        Value::Object(document) => Ok(document),
        other => Err(GatewayError::Serialization(format!(
            "stored body is not an object: {other}"
        ))),
    }
}

impl DocumentGateway for DocumentStoreGateway {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        let physical = self.namer.physical(collection);
        let rows = documents::Entity::find()
            .filter(documents::Column::Collection.eq(physical.as_str()))
            .order_by_asc(documents::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        debug!(collection = %physical, count = rows.len(), "documents listed");
        rows.into_iter().map(|row| into_document(row.body)).collect()
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, GatewayError> {
        self.find_row(collection, id)
            .await?
            .map(|row| into_document(row.body))
            .transpose()
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), GatewayError> {
        let id = document_id(&document)
            .ok_or(GatewayError::MissingId)?
            .to_string();
        let physical = self.namer.physical(collection);
        let now = Utc::now().fixed_offset();

        let row = documents::ActiveModel {
            collection: Set(physical.clone()),
            id: Set(id.clone()),
            body: Set(Value::Object(document)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        documents::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([documents::Column::Collection, documents::Column::Id])
                    .update_columns([documents::Column::Body, documents::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;

        debug!(collection = %physical, id = %id, "document upserted");
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Patch,
    ) -> Result<Option<Document>, GatewayError> {
        let Some(row) = self.find_row(collection, id).await? else {
            return Ok(None);
        };

        let mut body = into_document(row.body.clone())?;
        merge_document(&mut body, sanitize_patch(patch));

        let mut active = row.into_active_model();
        active.body = Set(Value::Object(body.clone()));
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(&self.db).await.map_err(db_error)?;

        debug!(collection, id, "document updated");
        Ok(Some(body))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        let result =
            documents::Entity::delete_by_id((self.namer.physical(collection), id.to_string()))
                .exec(&self.db)
                .await
                .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(GatewayError::not_found(collection, id));
        }

        debug!(collection, id, "document deleted");
        Ok(())
    }
}
