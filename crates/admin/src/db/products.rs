//! Catalog administration over the shared snapshot store.
//!
//! The base catalog ships with the binaries; admin edits are stored as
//! overrides in the snapshot. Editing a base product writes an override
//! with the same ID, deleting one records a removal, and created products
//! take IDs above the base range.

use belle_core::catalog::{Category, Product, SkinType};
use belle_core::store::{SharedStore, StoreError};
use belle_core::types::{Price, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Full set of editable product fields, used for create and replace.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    /// Price amount in euros.
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub brand: String,
    #[serde(default)]
    pub skin_types: Vec<SkinType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub discount: Option<u8>,
}

impl ProductDraft {
    /// Check field constraints before touching the store.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.brand.trim().is_empty() {
            return Err("brand is required".to_string());
        }
        if self.price < Decimal::ZERO {
            return Err("price must not be negative".to_string());
        }
        if let Some(discount) = self.discount
            && discount >= 100
        {
            return Err("discount must be below 100".to_string());
        }
        Ok(())
    }

    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: Price::eur(self.price),
            image: self.image,
            category: self.category,
            brand: self.brand,
            skin_types: self.skin_types,
            description: self.description,
            ingredients: self.ingredients,
            rating: None,
            reviews: None,
            is_new: self.is_new,
            is_best_seller: self.is_best_seller,
            discount: self.discount,
        }
    }
}

/// Repository for admin catalog edits.
pub struct ProductRepository<'a> {
    store: &'a SharedStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self { store }
    }

    /// The effective catalog with overrides applied.
    #[must_use]
    pub fn list(&self, base: &[Product]) -> Vec<Product> {
        self.store.read(|state| state.effective_catalog(base))
    }

    /// Look up one product in the effective catalog.
    #[must_use]
    pub fn get(&self, base: &[Product], id: ProductId) -> Option<Product> {
        self.list(base).into_iter().find(|p| p.id == id)
    }

    /// Create a product with the next free ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be persisted.
    pub fn create(&self, base: &[Product], draft: ProductDraft) -> Result<Product, StoreError> {
        self.store.mutate(|state| {
            let product = draft.into_product(state.next_product_id(base));
            state.product_overrides.push(product.clone());
            product
        })
    }

    /// Replace an existing product's fields, keeping its ID.
    ///
    /// Returns `None` when the product is unknown or was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be persisted.
    pub fn update(
        &self,
        base: &[Product],
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, StoreError> {
        self.store.mutate(|state| {
            if state.removed_products.contains(&id) {
                return None;
            }
            let exists = base.iter().any(|p| p.id == id)
                || state.product_overrides.iter().any(|p| p.id == id);
            if !exists {
                return None;
            }

            let product = draft.into_product(id);
            if let Some(slot) = state.product_overrides.iter_mut().find(|p| p.id == id) {
                *slot = product.clone();
            } else {
                state.product_overrides.push(product.clone());
            }
            Some(product)
        })
    }

    /// Remove a product from the effective catalog.
    ///
    /// Base products are recorded as removed; admin-created products are
    /// dropped outright. Returns `false` when the product is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be persisted.
    pub fn delete(&self, base: &[Product], id: ProductId) -> Result<bool, StoreError> {
        self.store.mutate(|state| {
            if state.removed_products.contains(&id) {
                return false;
            }

            let in_base = base.iter().any(|p| p.id == id);
            let override_idx = state.product_overrides.iter().position(|p| p.id == id);

            if let Some(idx) = override_idx {
                state.product_overrides.remove(idx);
            }
            if in_base {
                state.removed_products.push(id);
            }
            in_base || override_idx.is_some()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use belle_core::catalog::demo_products;
    use belle_core::store::MemorySnapshot;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn test_store() -> SharedStore {
        SharedStore::open(Arc::new(MemorySnapshot::new()))
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: dec!(19.90),
            image: "/images/nouveau.jpg".to_string(),
            category: Category::Skincare,
            brand: "Belle".to_string(),
            skin_types: vec![SkinType::Normal],
            description: Some("Un soin tout neuf".to_string()),
            ingredients: None,
            is_new: true,
            is_best_seller: false,
            discount: None,
        }
    }

    #[test]
    fn test_create_assigns_fresh_id() {
        let store = test_store();
        let repo = ProductRepository::new(&store);
        let base = demo_products();

        let created = repo.create(&base, draft("Sérum Test")).unwrap();
        assert!(created.id.as_i32() > base.last().unwrap().id.as_i32());

        let catalog = repo.list(&base);
        assert_eq!(catalog.len(), base.len() + 1);
    }

    #[test]
    fn test_update_base_product_writes_override() {
        let store = test_store();
        let repo = ProductRepository::new(&store);
        let base = demo_products();
        let id = base[0].id;

        let updated = repo.update(&base, id, draft("Nom révisé")).unwrap().unwrap();
        assert_eq!(updated.name, "Nom révisé");

        let in_catalog = repo.get(&base, id).unwrap();
        assert_eq!(in_catalog.name, "Nom révisé");
    }

    #[test]
    fn test_update_unknown_product() {
        let store = test_store();
        let repo = ProductRepository::new(&store);
        let base = demo_products();

        let result = repo.update(&base, ProductId::new(999), draft("Fantôme")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_base_product_records_removal() {
        let store = test_store();
        let repo = ProductRepository::new(&store);
        let base = demo_products();
        let id = base[0].id;

        assert!(repo.delete(&base, id).unwrap());
        assert!(repo.get(&base, id).is_none());

        // A second delete reports unknown
        assert!(!repo.delete(&base, id).unwrap());
    }

    #[test]
    fn test_delete_created_product_drops_it() {
        let store = test_store();
        let repo = ProductRepository::new(&store);
        let base = demo_products();

        let created = repo.create(&base, draft("Éphémère")).unwrap();
        assert!(repo.delete(&base, created.id).unwrap());
        assert_eq!(repo.list(&base).len(), base.len());
    }

    #[test]
    fn test_draft_validation() {
        let mut bad = draft("");
        assert!(bad.validate().is_err());

        bad = draft("Ok");
        bad.discount = Some(100);
        assert!(bad.validate().is_err());

        assert!(draft("Ok").validate().is_ok());
    }
}
