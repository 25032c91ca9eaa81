//! Hyperlinks attached to API representations.

use galley_core::{IngredientId, RecipeId};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    fn new(rel: &str, href: String) -> Self {
        Link {
            rel: rel.to_string(),
            href,
        }
    }
}

pub fn recipe_href(id: RecipeId) -> String {
    format!("/api/recipes/{id}")
}

pub fn ingredient_href(id: IngredientId) -> String {
    format!("/api/ingredients/{id}")
}

pub fn recipe_links(id: RecipeId) -> Vec<Link> {
    vec![
        Link::new("self", recipe_href(id)),
        Link::new("ingredients", format!("{}/ingredients", recipe_href(id))),
        Link::new("recipes", "/api/recipes".to_string()),
    ]
}

pub fn ingredient_links(id: IngredientId, recipe_id: RecipeId) -> Vec<Link> {
    vec![
        Link::new("self", ingredient_href(id)),
        Link::new("recipe", recipe_href(recipe_id)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_links() {
        let links = recipe_links(7);
        assert_eq!(links[0], Link::new("self", "/api/recipes/7".to_string()));
        assert_eq!(links[1].href, "/api/recipes/7/ingredients");
    }

    #[test]
    fn test_ingredient_links_point_at_parent() {
        let links = ingredient_links(3, 9);
        assert_eq!(links[0].href, "/api/ingredients/3");
        assert_eq!(links[1], Link::new("recipe", "/api/recipes/9".to_string()));
    }
}
