use tracing::{info, warn};

use crate::domain::{Category, RecordId};
use crate::errors::LedgerError;
use crate::storage::{Gateway, RecordStore};
use crate::validation::validate_category;

use super::{ServiceError, ServiceResult};

const DUPLICATE_NAME: &str = "Category with this name already exists";

pub struct CategoryService;

impl CategoryService {
    pub fn create(store: &dyn RecordStore, name: &str, color: &str) -> ServiceResult<Category> {
        validate_category(name, color).into_result()?;
        let category = Category::new(name.trim(), normalize_color(color));
        let stored = Gateway::<Category>::create(store, category).map_err(duplicate_name)?;
        info!(id = stored.id, name = %stored.name, "category created");
        Ok(stored)
    }

    pub fn update(
        store: &dyn RecordStore,
        id: RecordId,
        name: &str,
        color: &str,
    ) -> ServiceResult<Category> {
        validate_category(name, color).into_result()?;
        let mut category = Gateway::<Category>::find_by_id(store, id)?;
        category.name = name.trim().to_string();
        category.color = normalize_color(color);
        Gateway::<Category>::replace(store, &category).map_err(duplicate_name)?;
        info!(id, name = %category.name, "category updated");
        Ok(category)
    }

    /// Deletes the category; expenses that used it become uncategorised.
    pub fn delete(store: &dyn RecordStore, id: RecordId) -> ServiceResult<()> {
        Gateway::<Category>::delete_by_id(store, id)?;
        Ok(())
    }

    pub fn get(store: &dyn RecordStore, id: RecordId) -> ServiceResult<Category> {
        Ok(Gateway::<Category>::find_by_id(store, id)?)
    }

    /// All categories sorted by name, ignoring case.
    pub fn list(store: &dyn RecordStore) -> ServiceResult<Vec<Category>> {
        let mut categories = Gateway::<Category>::find_all(store)?;
        categories.sort_by_cached_key(|category| category.name.to_lowercase());
        Ok(categories)
    }
}

fn duplicate_name(err: LedgerError) -> ServiceError {
    match err {
        LedgerError::Duplicate { name, .. } => {
            warn!(%name, "category name already taken");
            ServiceError::Duplicate(DUPLICATE_NAME.into())
        }
        other => ServiceError::Ledger(other),
    }
}

fn normalize_color(color: &str) -> Option<String> {
    let color = color.trim();
    (!color.is_empty()).then(|| color.to_string())
}
