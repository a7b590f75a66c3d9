//! Supplier business logic - Companies delivering supplier articles.

use crate::{
    entities::{Supplier, supplier},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new active supplier.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_supplier<C>(
    db: &C,
    name: String,
    contact_email: Option<String>,
    tenant_id: Option<i64>,
) -> Result<supplier::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    supplier::ActiveModel {
        name: Set(name.trim().to_string()),
        contact_email: Set(contact_email),
        tenant_id: Set(tenant_id),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a supplier by its unique ID.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists active suppliers ordered alphabetically by name.
pub async fn list_active_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::IsActive.eq(true))
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a supplier inactive; its articles stay in the catalog.
///
/// # Errors
/// Returns an error if the supplier does not exist or the update fails.
pub async fn deactivate_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<supplier::Model> {
    let mut supplier: supplier::ActiveModel = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::SupplierNotFound { id: supplier_id })?
        .into();

    supplier.is_active = Set(false);
    supplier.update(db).await.map_err(Into::into)
}
