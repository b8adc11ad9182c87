use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use growstack_core::{DomainError, DomainResult, PrincipalId, ProductId};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 4000;

/// A digital good listed by a creator.
///
/// # Invariants
/// - `creator_id` is immutable after creation; only the owning creator may
///   mutate or delete the product.
/// - `title` is non-empty and trimmed.
/// - `price` is in the smallest currency unit (e.g. kobo/cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub creator_id: PrincipalId,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub image_url: Option<String>,
}

impl NewProduct {
    fn validate(&self) -> DomainResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(DomainError::validation("title too long"));
        }
        if self.description.len() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::validation("description too long"));
        }
        Ok(())
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub image_url: Option<String>,
}

impl Product {
    pub fn create(
        id: ProductId,
        creator_id: PrincipalId,
        input: NewProduct,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        input.validate()?;
        Ok(Self {
            id,
            creator_id,
            title: input.title.trim().to_string(),
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            created_at: now,
        })
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ProductPatch) -> DomainResult<()> {
        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::validation("title cannot be empty"));
            }
            if title.len() > MAX_TITLE_LEN {
                return Err(DomainError::validation("title too long"));
            }
            self.title = title;
        }
        if let Some(description) = patch.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(DomainError::validation("description too long"));
            }
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        Ok(())
    }

    /// Ownership check enforced before any mutation.
    pub fn ensure_owned_by(&self, principal: &PrincipalId) -> DomainResult<()> {
        if self.creator_id != *principal {
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }
}
