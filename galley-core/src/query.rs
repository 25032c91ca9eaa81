//! Dynamic search: turns optional search criteria into one conjunctive filter.
//!
//! Each present criteria field contributes exactly one [`Clause`]. The clauses
//! are ANDed together and evaluated over the recipe relation. When any clause
//! targets ingredients, recipes are inner-joined to their ingredients once and
//! every clause is checked against the same joined row. A recipe matches when
//! at least one of its joined rows satisfies all clauses.
//!
//! `IngredientClause::NotNamed` is a per-row inequality. A recipe containing
//! both the excluded ingredient and any other ingredient still matches through
//! the other row.

use crate::types::{Ingredient, SearchCriteria, StoredRecipe};

/// Which side of the recipe/ingredient join a clause reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Recipe,
    Ingredient,
}

/// Condition on the recipe row alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeClause {
    /// `recipe.is_vegan = true`
    Vegan,
    /// `recipe.no_of_servings = n`
    Serves(i32),
    /// `recipe.instructions` contains `s` (case-sensitive)
    InstructionsContain(String),
}

impl RecipeClause {
    pub fn matches(&self, recipe: &StoredRecipe) -> bool {
        match self {
            RecipeClause::Vegan => recipe.fields.is_vegan,
            RecipeClause::Serves(n) => recipe.fields.no_of_servings == *n,
            RecipeClause::InstructionsContain(s) => {
                recipe.fields.instructions.contains(s.as_str())
            }
        }
    }
}

/// Condition on the joined ingredient row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientClause {
    /// `ingredient.name = s`
    Named(String),
    /// `ingredient.name <> s`
    NotNamed(String),
}

impl IngredientClause {
    pub fn matches(&self, ingredient: &Ingredient) -> bool {
        match self {
            IngredientClause::Named(s) => ingredient.name == *s,
            IngredientClause::NotNamed(s) => ingredient.name != *s,
        }
    }
}

/// One filter condition contributed by one search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Recipe(RecipeClause),
    Ingredient(IngredientClause),
}

impl Clause {
    pub fn relation(&self) -> Relation {
        match self {
            Clause::Recipe(_) => Relation::Recipe,
            Clause::Ingredient(_) => Relation::Ingredient,
        }
    }

    /// Evaluate against one row of the (possibly joined) relation.
    ///
    /// Ingredient clauses never hold on a row without an ingredient, matching
    /// inner-join semantics.
    pub fn matches(&self, recipe: &StoredRecipe, ingredient: Option<&Ingredient>) -> bool {
        match self {
            Clause::Recipe(clause) => clause.matches(recipe),
            Clause::Ingredient(clause) => ingredient.is_some_and(|i| clause.matches(i)),
        }
    }
}

impl From<RecipeClause> for Clause {
    fn from(clause: RecipeClause) -> Self {
        Clause::Recipe(clause)
    }
}

impl From<IngredientClause> for Clause {
    fn from(clause: IngredientClause) -> Self {
        Clause::Ingredient(clause)
    }
}

/// Conjunction of clauses, in composition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when at least one clause reads the ingredient side, so the recipe
    /// relation must be joined (once) to ingredients.
    pub fn requires_join(&self) -> bool {
        self.clauses
            .iter()
            .any(|c| c.relation() == Relation::Ingredient)
    }

    /// The clauses as recipe-only conditions, or `None` when any clause needs
    /// the ingredient join.
    pub fn recipe_only(&self) -> Option<Vec<&RecipeClause>> {
        self.clauses
            .iter()
            .map(|c| match c {
                Clause::Recipe(clause) => Some(clause),
                Clause::Ingredient(_) => None,
            })
            .collect()
    }

    /// Evaluate every clause against a single joined row.
    pub fn matches_row(&self, recipe: &StoredRecipe, ingredient: Option<&Ingredient>) -> bool {
        self.clauses.iter().all(|c| c.matches(recipe, ingredient))
    }

    /// Evaluate against a recipe and its children.
    ///
    /// Without a join the recipe row alone is tested. With a join, each
    /// ingredient produces one row and the recipe matches if any row does;
    /// a recipe with no ingredients produces no rows.
    pub fn matches_recipe(&self, recipe: &StoredRecipe, ingredients: &[Ingredient]) -> bool {
        if self.requires_join() {
            ingredients
                .iter()
                .any(|ingredient| self.matches_row(recipe, Some(ingredient)))
        } else {
            self.matches_row(recipe, None)
        }
    }
}

/// Build the filter for a set of search criteria.
///
/// Fields are tested in a fixed order: vegetarian, serves, ingredient name,
/// excluded ingredient, instructions substring.
pub fn compose(criteria: &SearchCriteria) -> Filter {
    let mut clauses = Vec::new();

    if criteria.vegetarian {
        clauses.push(RecipeClause::Vegan.into());
    }

    if let Some(serves) = criteria.serves {
        clauses.push(RecipeClause::Serves(serves).into());
    }

    if let Some(ref name) = criteria.ingredient_name {
        clauses.push(IngredientClause::Named(name.clone()).into());
    }

    if let Some(ref name) = criteria.exclude_ingredients {
        clauses.push(IngredientClause::NotNamed(name.clone()).into());
    }

    if let Some(ref text) = criteria.include_instructions {
        clauses.push(RecipeClause::InstructionsContain(text.clone()).into());
    }

    Filter::new(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecipeFields;

    fn recipe(is_vegan: bool, servings: i32, instructions: &str) -> StoredRecipe {
        StoredRecipe {
            id: 1,
            fields: RecipeFields {
                name: "Test".to_string(),
                instructions: instructions.to_string(),
                contains_meat: false,
                is_vegan,
                no_of_servings: servings,
            },
        }
    }

    fn ingredient(id: i64, name: &str) -> Ingredient {
        Ingredient {
            id,
            recipe_id: 1,
            name: name.to_string(),
            measurement: "1 cup".to_string(),
        }
    }

    #[test]
    fn test_compose_empty_criteria() {
        let filter = compose(&SearchCriteria::default());
        assert!(filter.is_empty());
        assert!(!filter.requires_join());
    }

    #[test]
    fn test_compose_order_is_fixed() {
        let criteria = SearchCriteria {
            vegetarian: true,
            serves: Some(2),
            ingredient_name: Some("Salt".to_string()),
            exclude_ingredients: Some("Milk".to_string()),
            include_instructions: Some("boil".to_string()),
        };
        assert_eq!(
            compose(&criteria).clauses(),
            &[
                Clause::Recipe(RecipeClause::Vegan),
                Clause::Recipe(RecipeClause::Serves(2)),
                Clause::Ingredient(IngredientClause::Named("Salt".to_string())),
                Clause::Ingredient(IngredientClause::NotNamed("Milk".to_string())),
                Clause::Recipe(RecipeClause::InstructionsContain("boil".to_string())),
            ]
        );
    }

    #[test]
    fn test_vegetarian_false_adds_no_clause() {
        let criteria = SearchCriteria {
            vegetarian: false,
            serves: Some(4),
            ..Default::default()
        };
        assert_eq!(
            compose(&criteria).clauses(),
            &[Clause::Recipe(RecipeClause::Serves(4))]
        );
    }

    #[test]
    fn test_requires_join_only_for_ingredient_clauses() {
        let recipe_only = Filter::new(vec![
            Clause::Recipe(RecipeClause::Vegan),
            Clause::Recipe(RecipeClause::Serves(1)),
        ]);
        assert!(!recipe_only.requires_join());
        let joined = Filter::new(vec![IngredientClause::NotNamed("x".to_string()).into()]);
        assert!(joined.requires_join());
    }

    #[test]
    fn test_recipe_only_view() {
        let filter = Filter::new(vec![
            Clause::Recipe(RecipeClause::Vegan),
            Clause::Recipe(RecipeClause::Serves(1)),
        ]);
        assert_eq!(
            filter.recipe_only(),
            Some(vec![&RecipeClause::Vegan, &RecipeClause::Serves(1)])
        );

        let joined = Filter::new(vec![
            Clause::Recipe(RecipeClause::Vegan),
            Clause::Ingredient(IngredientClause::Named("Salt".to_string())),
        ]);
        assert!(joined.recipe_only().is_none());
        assert_eq!(Filter::default().recipe_only(), Some(Vec::new()));
    }

    #[test]
    fn test_instructions_substring_is_case_sensitive() {
        let r = recipe(false, 2, "Boil the water");
        assert!(RecipeClause::InstructionsContain("Boil".to_string()).matches(&r));
        assert!(!RecipeClause::InstructionsContain("boil".to_string()).matches(&r));
    }

    #[test]
    fn test_exclusion_is_per_row() {
        let r = recipe(true, 2, "Stir everything together well");
        let ingredients = vec![ingredient(1, "Salt"), ingredient(2, "Milk")];
        let filter = Filter::new(vec![IngredientClause::NotNamed("Milk".to_string()).into()]);
        assert!(filter.matches_recipe(&r, &ingredients));

        let only_milk = vec![ingredient(2, "Milk")];
        assert!(!filter.matches_recipe(&r, &only_milk));
    }

    #[test]
    fn test_joined_clauses_share_one_row() {
        let r = recipe(true, 2, "Stir everything together well");
        let ingredients = vec![ingredient(1, "Salt"), ingredient(2, "Milk")];

        // Salt row: named Salt and not Milk.
        let filter = Filter::new(vec![
            Clause::Ingredient(IngredientClause::Named("Salt".to_string())),
            Clause::Ingredient(IngredientClause::NotNamed("Milk".to_string())),
        ]);
        assert!(filter.matches_recipe(&r, &ingredients));

        // No single row is both Salt and Milk.
        let filter = Filter::new(vec![
            Clause::Ingredient(IngredientClause::Named("Salt".to_string())),
            Clause::Ingredient(IngredientClause::Named("Milk".to_string())),
        ]);
        assert!(!filter.matches_recipe(&r, &ingredients));

        // No single row is named Milk while also not being Milk.
        let filter = Filter::new(vec![
            Clause::Ingredient(IngredientClause::Named("Milk".to_string())),
            Clause::Ingredient(IngredientClause::NotNamed("Milk".to_string())),
        ]);
        assert!(!filter.matches_recipe(&r, &ingredients));
    }

    #[test]
    fn test_join_excludes_recipes_without_ingredients() {
        let r = recipe(true, 2, "Stir everything together well");
        let filter = Filter::new(vec![IngredientClause::NotNamed("Milk".to_string()).into()]);
        assert!(!filter.matches_recipe(&r, &[]));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let r = recipe(false, 1, "Anything goes in this pot");
        assert!(Filter::default().matches_recipe(&r, &[]));
    }
}
