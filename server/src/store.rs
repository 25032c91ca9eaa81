//! PostgreSQL-backed recipe store.
//!
//! Each call checks out one pooled connection and returns it before the call
//! returns. Multi-row writes run inside `conn.transaction`.

use std::sync::Arc;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::QueryFragment;
use diesel::query_dsl::LoadQuery;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::DatabaseErrorKind;
use galley_core::{
    Clause, Filter, Ingredient, IngredientClause, IngredientFields, IngredientId, Page,
    PageRequest, RecipeClause, RecipeFields, RecipeId, RecipeStore, StoreError, StoredRecipe,
};

use crate::db::DbPool;
use crate::models::{IngredientRow, NewIngredient, RecipeChanges, RecipeRow};
use crate::schema::{ingredients, recipes};

pub struct PgStore {
    pool: Arc<DbPool>,
}

impl PgStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

fn query_error(e: diesel::result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

/// Build a LIKE pattern matching `text` anywhere, with `%`, `_` and the
/// escape character taken literally.
pub fn contains_pattern(text: &str) -> String {
    format!(
        "%{}%",
        text.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

/// Search over recipes alone. No join is emitted.
fn recipe_search_query(
    clauses: &[&RecipeClause],
) -> impl RunQueryDsl<PgConnection> + LoadQuery<'static, PgConnection, RecipeRow> + QueryFragment<Pg>
{
    let mut query = recipes::table
        .select(RecipeRow::as_select())
        .order(recipes::recipe_id.asc())
        .into_boxed();

    for clause in clauses {
        query = match clause {
            RecipeClause::Vegan => query.filter(recipes::is_vegan.eq(true)),
            RecipeClause::Serves(n) => query.filter(recipes::no_of_servings.eq(*n)),
            RecipeClause::InstructionsContain(text) => {
                query.filter(recipes::instructions.like(contains_pattern(text)))
            }
        };
    }

    query
}

/// Search over one inner join of recipes to ingredients. Every clause applies
/// to the same joined row; matching recipes are returned once.
fn joined_search_query(
    clauses: &[Clause],
) -> impl RunQueryDsl<PgConnection> + LoadQuery<'static, PgConnection, RecipeRow> + QueryFragment<Pg>
{
    let mut query = recipes::table
        .inner_join(ingredients::table)
        .select(RecipeRow::as_select())
        .distinct()
        .order(recipes::recipe_id.asc())
        .into_boxed();

    for clause in clauses {
        query = match clause {
            Clause::Recipe(RecipeClause::Vegan) => query.filter(recipes::is_vegan.eq(true)),
            Clause::Recipe(RecipeClause::Serves(n)) => {
                query.filter(recipes::no_of_servings.eq(*n))
            }
            Clause::Recipe(RecipeClause::InstructionsContain(text)) => {
                query.filter(recipes::instructions.like(contains_pattern(text)))
            }
            Clause::Ingredient(IngredientClause::Named(name)) => {
                query.filter(ingredients::name.eq(name.clone()))
            }
            Clause::Ingredient(IngredientClause::NotNamed(name)) => {
                query.filter(ingredients::name.ne(name.clone()))
            }
        };
    }

    query
}

impl RecipeStore for PgStore {
    fn find_recipe(&self, id: RecipeId) -> Result<Option<StoredRecipe>, StoreError> {
        let mut conn = self.conn()?;
        let row = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(query_error)?;
        Ok(row.map(StoredRecipe::from))
    }

    fn find_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>, StoreError> {
        let mut conn = self.conn()?;
        let row = ingredients::table
            .find(id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(query_error)?;
        Ok(row.map(Ingredient::from))
    }

    fn find_ingredients_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Ingredient>, StoreError> {
        let mut conn = self.conn()?;
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::recipe_id.eq(recipe_id))
            .order(ingredients::ingredient_id.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;
        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    fn find_ingredients_by_recipes(
        &self,
        recipe_ids: &[RecipeId],
    ) -> Result<Vec<Ingredient>, StoreError> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::recipe_id.eq_any(recipe_ids))
            .order(ingredients::ingredient_id.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;
        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    fn find_ingredients_page(
        &self,
        recipe_id: RecipeId,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, StoreError> {
        let mut conn = self.conn()?;

        let total: i64 = ingredients::table
            .filter(ingredients::recipe_id.eq(recipe_id))
            .count()
            .get_result(&mut conn)
            .map_err(query_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::recipe_id.eq(recipe_id))
            .order(ingredients::ingredient_id.asc())
            .limit(page.limit)
            .offset(page.offset)
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        Ok(Page {
            items: rows.into_iter().map(Ingredient::from).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    fn find_recipes_page(&self, page: PageRequest) -> Result<Page<StoredRecipe>, StoreError> {
        let mut conn = self.conn()?;

        let total: i64 = recipes::table
            .count()
            .get_result(&mut conn)
            .map_err(query_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::recipe_id.asc())
            .limit(page.limit)
            .offset(page.offset)
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        Ok(Page {
            items: rows.into_iter().map(StoredRecipe::from).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    fn insert_recipe(
        &self,
        fields: &RecipeFields,
        ingredients: &[IngredientFields],
    ) -> Result<(StoredRecipe, Vec<Ingredient>), StoreError> {
        let mut conn = self.conn()?;

        let (recipe, mut children) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let recipe: RecipeRow = diesel::insert_into(recipes::table)
                    .values(&RecipeChanges::from(fields))
                    .returning(RecipeRow::as_returning())
                    .get_result(conn)?;

                if ingredients.is_empty() {
                    return Ok((recipe, Vec::new()));
                }

                let new_children: Vec<NewIngredient> = ingredients
                    .iter()
                    .map(|child| NewIngredient {
                        name: &child.name,
                        measurement: &child.measurement,
                        recipe_id: recipe.recipe_id,
                    })
                    .collect();

                let children: Vec<IngredientRow> = diesel::insert_into(ingredients::table)
                    .values(&new_children)
                    .returning(IngredientRow::as_returning())
                    .get_results(conn)?;

                Ok((recipe, children))
            })
            .map_err(query_error)?;

        children.sort_by_key(|c| c.ingredient_id);

        Ok((
            StoredRecipe::from(recipe),
            children.into_iter().map(Ingredient::from).collect(),
        ))
    }

    fn update_recipe(&self, recipe: &StoredRecipe) -> Result<StoredRecipe, StoreError> {
        let mut conn = self.conn()?;
        match diesel::update(recipes::table.find(recipe.id))
            .set(&RecipeChanges::from(&recipe.fields))
            .returning(RecipeRow::as_returning())
            .get_result::<RecipeRow>(&mut conn)
        {
            Ok(row) => Ok(StoredRecipe::from(row)),
            Err(diesel::result::Error::NotFound) => Err(StoreError::MissingRecipe(recipe.id)),
            Err(e) => Err(query_error(e)),
        }
    }

    fn insert_ingredient(
        &self,
        recipe_id: RecipeId,
        fields: &IngredientFields,
    ) -> Result<Ingredient, StoreError> {
        let mut conn = self.conn()?;
        let new_ingredient = NewIngredient {
            name: &fields.name,
            measurement: &fields.measurement,
            recipe_id,
        };

        match diesel::insert_into(ingredients::table)
            .values(&new_ingredient)
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
        {
            Ok(row) => Ok(Ingredient::from(row)),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                Err(StoreError::MissingParent(recipe_id))
            }
            Err(e) => Err(query_error(e)),
        }
    }

    fn update_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, StoreError> {
        let mut conn = self.conn()?;
        match diesel::update(ingredients::table.find(ingredient.id))
            .set((
                ingredients::name.eq(ingredient.name.as_str()),
                ingredients::measurement.eq(ingredient.measurement.as_str()),
            ))
            .returning(IngredientRow::as_returning())
            .get_result::<IngredientRow>(&mut conn)
        {
            Ok(row) => Ok(Ingredient::from(row)),
            Err(diesel::result::Error::NotFound) => {
                Err(StoreError::MissingIngredient(ingredient.id))
            }
            Err(e) => Err(query_error(e)),
        }
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        // The foreign key also cascades; deleting children explicitly keeps the
        // guarantee independent of how the table was created.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(id)))
                .execute(conn)?;
            diesel::delete(recipes::table.find(id)).execute(conn)?;
            Ok(())
        })
        .map_err(query_error)
    }

    fn delete_ingredient(&self, id: IngredientId) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        diesel::delete(ingredients::table.find(id))
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(ingredients::table).execute(conn)?;
            diesel::delete(recipes::table).execute(conn)?;
            Ok(())
        })
        .map_err(query_error)
    }

    fn search(&self, filter: &Filter) -> Result<Vec<StoredRecipe>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipeRow> = match filter.recipe_only() {
            Some(clauses) => recipe_search_query(&clauses).load::<RecipeRow>(&mut conn),
            None => joined_search_query(filter.clauses()).load::<RecipeRow>(&mut conn),
        }
        .map_err(query_error)?;

        tracing::debug!(matches = rows.len(), "Recipe search executed");
        Ok(rows.into_iter().map(StoredRecipe::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("boil"), "%boil%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }

    fn search_sql(filter: &Filter) -> String {
        match filter.recipe_only() {
            Some(clauses) => {
                let query = recipe_search_query(&clauses);
                diesel::debug_query::<Pg, _>(&query).to_string()
            }
            None => {
                let query = joined_search_query(filter.clauses());
                diesel::debug_query::<Pg, _>(&query).to_string()
            }
        }
    }

    #[test]
    fn test_recipe_only_search_has_no_join() {
        let sql = search_sql(&Filter::new(vec![
            RecipeClause::Vegan.into(),
            RecipeClause::Serves(4).into(),
        ]));

        assert!(!sql.contains("JOIN"), "{sql}");
        assert!(!sql.contains("\"ingredients\""), "{sql}");
        assert!(sql.contains("\"recipes\".\"is_vegan\" = $1"), "{sql}");
        assert!(sql.contains("\"recipes\".\"no_of_servings\" = $2"), "{sql}");
        assert!(sql.contains("ORDER BY \"recipes\".\"recipe_id\" ASC"), "{sql}");
        assert!(sql.ends_with("-- binds: [true, 4]"), "{sql}");
    }

    #[test]
    fn test_empty_search_selects_every_recipe() {
        let sql = search_sql(&Filter::default());

        assert!(!sql.contains("JOIN"), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(sql.contains("ORDER BY \"recipes\".\"recipe_id\" ASC"), "{sql}");
    }

    #[test]
    fn test_ingredient_clauses_share_one_join() {
        let filter = galley_core::compose(&galley_core::SearchCriteria {
            vegetarian: true,
            serves: Some(2),
            ingredient_name: Some("Salt".to_string()),
            exclude_ingredients: Some("Milk".to_string()),
            include_instructions: Some("boil".to_string()),
        });
        let sql = search_sql(&filter);

        assert_eq!(sql.matches("JOIN").count(), 1, "{sql}");
        assert!(sql.contains("INNER JOIN \"ingredients\""), "{sql}");
        assert!(sql.starts_with("SELECT DISTINCT"), "{sql}");
        assert!(sql.contains("\"ingredients\".\"name\" = $3"), "{sql}");
        assert!(sql.contains("\"ingredients\".\"name\" != $4"), "{sql}");
        assert!(sql.contains("\"recipes\".\"instructions\" LIKE $5"), "{sql}");
        assert!(sql.contains("ORDER BY \"recipes\".\"recipe_id\" ASC"), "{sql}");
        assert!(
            sql.ends_with(r#"-- binds: [true, 2, "Salt", "Milk", "%boil%"]"#),
            "{sql}"
        );
    }

    #[test]
    fn test_instruction_wildcards_are_bound_escaped() {
        let filter = Filter::new(vec![
            IngredientClause::NotNamed("Salt".to_string()).into(),
            RecipeClause::InstructionsContain("50%_off".to_string()).into(),
        ]);
        let sql = search_sql(&filter);

        assert_eq!(sql.matches("JOIN").count(), 1, "{sql}");
        assert!(sql.contains("LIKE $2"), "{sql}");
        assert!(sql.ends_with(r#"-- binds: ["Salt", "%50\\%\\_off%"]"#), "{sql}");
    }
}
