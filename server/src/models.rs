use chrono::{DateTime, Utc};
use diesel::prelude::*;
use galley_core::{Ingredient, RecipeFields, StoredRecipe};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub recipe_id: i64,
    pub name: String,
    pub instructions: String,
    pub contains_meat: bool,
    pub is_vegan: bool,
    pub no_of_servings: i32,
}

impl From<RecipeRow> for StoredRecipe {
    fn from(row: RecipeRow) -> Self {
        StoredRecipe {
            id: row.recipe_id,
            fields: RecipeFields {
                name: row.name,
                instructions: row.instructions,
                contains_meat: row.contains_meat,
                is_vegan: row.is_vegan,
                no_of_servings: row.no_of_servings,
            },
        }
    }
}

/// Scalar recipe columns, used for inserts and full-replace updates.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub name: &'a str,
    pub instructions: &'a str,
    pub contains_meat: bool,
    pub is_vegan: bool,
    pub no_of_servings: i32,
}

impl<'a> From<&'a RecipeFields> for RecipeChanges<'a> {
    fn from(fields: &'a RecipeFields) -> Self {
        RecipeChanges {
            name: &fields.name,
            instructions: &fields.instructions,
            contains_meat: fields.contains_meat,
            is_vegan: fields.is_vegan,
            no_of_servings: fields.no_of_servings,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement: String,
    pub recipe_id: i64,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.ingredient_id,
            recipe_id: row.recipe_id,
            name: row.name,
            measurement: row.measurement,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub measurement: &'a str,
    pub recipe_id: i64,
}
