//! Search behavior over the in-memory store.

mod common;

use common::{ingredients, recipe_fields, services};
use galley_core::{MemoryStore, RecipeFields, SearchCriteria};

fn names(recipes: &[galley_core::Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.fields.name.as_str()).collect()
}

#[test]
fn test_search_conjunction() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("A", true, 4), Vec::new())
        .unwrap();
    s.recipes
        .create_recipe(recipe_fields("B", true, 2), Vec::new())
        .unwrap();
    s.recipes
        .create_recipe(recipe_fields("C", false, 4), Vec::new())
        .unwrap();

    let found = s
        .recipes
        .search_recipes(&SearchCriteria {
            vegetarian: true,
            serves: Some(4),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(names(&found), vec!["A"]);
}

#[test]
fn test_empty_criteria_returns_everything() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("A", true, 4), Vec::new())
        .unwrap();
    s.recipes
        .create_recipe(recipe_fields("B", false, 2), ingredients(&["Egg"]))
        .unwrap();

    let found = s.recipes.search_recipes(&SearchCriteria::default()).unwrap();
    assert_eq!(names(&found), vec!["A", "B"]);
}

#[test]
fn test_exclusion_is_per_joined_row() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("Porridge", true, 1), ingredients(&["Salt", "Milk"]))
        .unwrap();
    s.recipes
        .create_recipe(recipe_fields("Milkshake", true, 1), ingredients(&["Milk"]))
        .unwrap();

    let found = s
        .recipes
        .search_recipes(&SearchCriteria {
            exclude_ingredients: Some("Milk".to_string()),
            ..Default::default()
        })
        .unwrap();

    // Porridge still appears through its Salt row.
    assert_eq!(names(&found), vec!["Porridge"]);
    assert_eq!(found[0].ingredients.len(), 2);
}

#[test]
fn test_ingredient_filters_share_one_join() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("Porridge", true, 1), ingredients(&["Salt", "Milk"]))
        .unwrap();

    let both_on_same_row = s
        .recipes
        .search_recipes(&SearchCriteria {
            ingredient_name: Some("Milk".to_string()),
            exclude_ingredients: Some("Milk".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(both_on_same_row.is_empty());

    let salt_not_milk = s
        .recipes
        .search_recipes(&SearchCriteria {
            ingredient_name: Some("Salt".to_string()),
            exclude_ingredients: Some("Milk".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(names(&salt_not_milk), vec!["Porridge"]);
}

#[test]
fn test_ingredient_name_match_is_distinct() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("Double salt", false, 2), ingredients(&["Salt", "Salt"]))
        .unwrap();
    s.recipes
        .create_recipe(recipe_fields("Sweet", false, 2), ingredients(&["Sugar"]))
        .unwrap();

    let found = s
        .recipes
        .search_recipes(&SearchCriteria {
            ingredient_name: Some("Salt".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(names(&found), vec!["Double salt"]);
}

#[test]
fn test_join_drops_recipes_without_ingredients() {
    let s = services::<MemoryStore>();
    s.recipes
        .create_recipe(recipe_fields("Empty", true, 1), Vec::new())
        .unwrap();

    let found = s
        .recipes
        .search_recipes(&SearchCriteria {
            exclude_ingredients: Some("Milk".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_instructions_substring() {
    let s = services::<MemoryStore>();
    let mut roast = recipe_fields("Roast", false, 4);
    roast.instructions = "Roast at 200C for 50% of the hour".to_string();
    s.recipes.create_recipe(roast, Vec::new()).unwrap();
    s.recipes
        .create_recipe(
            RecipeFields {
                name: "Boiled".to_string(),
                instructions: "Boil until tender, then drain well".to_string(),
                contains_meat: false,
                is_vegan: true,
                no_of_servings: 2,
            },
            Vec::new(),
        )
        .unwrap();

    let search = |text: &str| {
        s.recipes
            .search_recipes(&SearchCriteria {
                include_instructions: Some(text.to_string()),
                ..Default::default()
            })
            .unwrap()
    };

    assert_eq!(names(&search("tender")), vec!["Boiled"]);
    assert!(search("TENDER").is_empty());
    assert_eq!(names(&search("50%")), vec!["Roast"]);
}

#[test]
fn test_search_sees_updates_and_deletes() {
    let s = services::<MemoryStore>();
    let recipe = s
        .recipes
        .create_recipe(recipe_fields("Chili", false, 4), ingredients(&["Beans"]))
        .unwrap();
    let vegetarian = SearchCriteria {
        vegetarian: true,
        ..Default::default()
    };

    assert!(s.recipes.search_recipes(&vegetarian).unwrap().is_empty());

    s.recipes
        .update_recipe(recipe.id, recipe_fields("Chili", true, 4))
        .unwrap();
    assert_eq!(s.recipes.search_recipes(&vegetarian).unwrap().len(), 1);

    s.recipes.delete_recipe(recipe.id).unwrap();
    assert!(s.recipes.search_recipes(&vegetarian).unwrap().is_empty());
}
