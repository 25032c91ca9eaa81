//! Request validation, applied before anything reaches the services.

use galley_core::{IngredientFields, RecipeFields};

const NAME_LEN: std::ops::RangeInclusive<usize> = 3..=255;
const INSTRUCTIONS_LEN: std::ops::RangeInclusive<usize> = 20..=1000;
const INGREDIENT_FIELD_MAX: usize = 255;

pub fn validate_recipe(fields: &RecipeFields) -> Result<(), String> {
    let name_len = fields.name.chars().count();
    if !NAME_LEN.contains(&name_len) {
        return Err(format!(
            "name must be between {} and {} characters",
            NAME_LEN.start(),
            NAME_LEN.end()
        ));
    }

    let instructions_len = fields.instructions.chars().count();
    if !INSTRUCTIONS_LEN.contains(&instructions_len) {
        return Err(format!(
            "instructions must be between {} and {} characters",
            INSTRUCTIONS_LEN.start(),
            INSTRUCTIONS_LEN.end()
        ));
    }

    if fields.no_of_servings < 1 {
        return Err("no_of_servings must be at least 1".to_string());
    }

    Ok(())
}

pub fn validate_ingredient(fields: &IngredientFields) -> Result<(), String> {
    if fields.name.trim().is_empty() {
        return Err("ingredient name is required".to_string());
    }
    if fields.name.chars().count() > INGREDIENT_FIELD_MAX {
        return Err(format!(
            "ingredient name must be at most {INGREDIENT_FIELD_MAX} characters"
        ));
    }
    if fields.measurement.chars().count() > INGREDIENT_FIELD_MAX {
        return Err(format!(
            "measurement must be at most {INGREDIENT_FIELD_MAX} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> RecipeFields {
        RecipeFields {
            name: "Soup".to_string(),
            instructions: "Boil water for twenty seconds exactly".to_string(),
            contains_meat: false,
            is_vegan: true,
            no_of_servings: 4,
        }
    }

    #[test]
    fn test_valid_recipe() {
        assert!(validate_recipe(&soup()).is_ok());
    }

    #[test]
    fn test_name_bounds() {
        let mut fields = soup();
        fields.name = "Pi".to_string();
        assert!(validate_recipe(&fields).is_err());

        fields.name = "Pie".to_string();
        assert!(validate_recipe(&fields).is_ok());

        fields.name = "x".repeat(256);
        assert!(validate_recipe(&fields).is_err());
    }

    #[test]
    fn test_instruction_bounds() {
        let mut fields = soup();
        fields.instructions = "Too short".to_string();
        assert!(validate_recipe(&fields).is_err());

        fields.instructions = "y".repeat(1000);
        assert!(validate_recipe(&fields).is_ok());

        fields.instructions = "y".repeat(1001);
        assert!(validate_recipe(&fields).is_err());
    }

    #[test]
    fn test_servings_must_be_positive() {
        let mut fields = soup();
        fields.no_of_servings = 0;
        assert!(validate_recipe(&fields).is_err());
    }

    #[test]
    fn test_ingredient_limits() {
        assert!(validate_ingredient(&IngredientFields::new("Salt", "1 tsp")).is_ok());
        assert!(validate_ingredient(&IngredientFields::new("Salt", "")).is_ok());
        assert!(validate_ingredient(&IngredientFields::new("  ", "1 tsp")).is_err());
        assert!(validate_ingredient(&IngredientFields::new("s".repeat(256), "1 tsp")).is_err());
        assert!(validate_ingredient(&IngredientFields::new("Salt", "m".repeat(256))).is_err());
    }
}
