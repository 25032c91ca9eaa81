use serde::{Deserialize, Serialize};

pub type RecipeId = i64;
pub type IngredientId = i64;

/// Default number of items in a page when the caller doesn't ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Largest page a caller can request.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Scalar fields of a recipe. Used both for creation and for full-replace updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFields {
    pub name: String,
    pub instructions: String,
    pub contains_meat: bool,
    pub is_vegan: bool,
    pub no_of_servings: i32,
}

/// Recipe row as the store holds it, without its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: RecipeId,
    #[serde(flatten)]
    pub fields: RecipeFields,
}

/// A recipe aggregate: the recipe row plus every ingredient it owns,
/// ordered by ingredient id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(flatten)]
    pub fields: RecipeFields,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn from_parts(stored: StoredRecipe, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: stored.id,
            fields: stored.fields,
            ingredients,
        }
    }

    /// The scalar row, detached from the ingredient collection.
    pub fn stored(&self) -> StoredRecipe {
        StoredRecipe {
            id: self.id,
            fields: self.fields.clone(),
        }
    }
}

/// Name and measurement of an ingredient. Used for creation and updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFields {
    pub name: String,
    pub measurement: String,
}

impl IngredientFields {
    pub fn new(name: impl Into<String>, measurement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measurement: measurement.into(),
        }
    }
}

/// An ingredient owned by exactly one recipe.
///
/// `recipe_id` is a foreign key value, not a reference to the recipe itself.
/// It is set once on insert and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub recipe_id: RecipeId,
    pub name: String,
    pub measurement: String,
}

/// Optional search fields. A missing field (or `vegetarian: false`) puts no
/// constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub vegetarian: bool,
    pub serves: Option<i32>,
    pub ingredient_name: Option<String>,
    pub exclude_ingredients: Option<String>,
    pub include_instructions: Option<String>,
}

/// Limit/offset window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Build a request from optional caller input, clamping the limit to
    /// `1..=MAX_PAGE_LIMIT` and the offset to non-negative values.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// Slice an already ordered collection according to this window.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Page<T> {
        let start = usize::try_from(self.offset)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let len = usize::try_from(self.limit).unwrap_or(0);
        let end = start.saturating_add(len).min(items.len());

        Page {
            items: items[start..end].to_vec(),
            total: items.len() as i64,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items available across all pages
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(Some(5000), Some(-3));
        assert_eq!(page.limit, 1000);
        assert_eq!(page.offset, 0);

        let page = PageRequest::new(Some(0), None);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn test_apply_window() {
        let items: Vec<i32> = (1..=5).collect();
        let page = PageRequest::new(Some(2), Some(3)).apply(&items);
        assert_eq!(page.items, vec![4, 5]);
        assert_eq!(page.total, 5);

        let past_end = PageRequest::new(Some(2), Some(10)).apply(&items);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 5);
    }

    #[test]
    fn test_search_criteria_missing_fields_default() {
        let criteria: SearchCriteria = serde_json::from_str(r#"{"serves": 4}"#).unwrap();
        assert!(!criteria.vegetarian);
        assert_eq!(criteria.serves, Some(4));
        assert!(criteria.ingredient_name.is_none());
    }
}
