//! Coffee-shop drink menu.

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::error::{AppError, AppResult};
use crate::models::{Drink, Ingredient, NewDrink, UpdateDrink};
use crate::repositories::DrinkRepository;
use crate::services::workflow::{Rejection, Violation, WorkflowError, WriteOutcome, run_write};

/// Fields of a drink submission; `None` means the field was not sent.
#[derive(Debug, Clone, Default)]
pub struct DrinkDraft {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl DrinkDraft {
    /// The title with blank values treated as absent.
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.trim().is_empty())
    }

    /// A new drink needs a title and a recipe.
    pub fn check_create(&self) -> Rejection {
        let mut rejection = Rejection::new();
        if self.title().is_none() {
            rejection.push(Violation::Required("title"));
        }
        if self.recipe.is_none() {
            rejection.push(Violation::Required("recipe"));
        }
        rejection
    }

    /// An update needs at least one of title or recipe.
    pub fn check_update(&self) -> Rejection {
        if self.title().is_none() && self.recipe.is_none() {
            Rejection::from(Violation::Required("title or recipe"))
        } else {
            Rejection::new()
        }
    }

    fn into_changes(self) -> AppResult<UpdateDrink> {
        let title = self.title().map(str::to_string);
        let recipe = self.recipe.map(|recipe| serde_json::to_value(recipe)).transpose();
        Ok(UpdateDrink {
            title,
            recipe: recipe.map_err(anyhow::Error::from)?,
        })
    }
}

#[derive(Clone)]
pub struct DrinkService {
    repo: DrinkRepository,
}

impl DrinkService {
    pub fn new(repo: DrinkRepository) -> Self {
        Self { repo }
    }

    /// All drinks by id; an empty menu is reported as not found.
    pub async fn menu(&self) -> AppResult<Vec<Drink>> {
        let drinks = self.repo.list_all().await?;
        if drinks.is_empty() {
            return Err(AppError::NotFound {
                entity: "drink".to_string(),
                field: "id".to_string(),
                value: "any".to_string(),
            });
        }
        Ok(drinks)
    }

    pub async fn create(&self, draft: DrinkDraft) -> AppResult<Drink> {
        reject_as_bad_request(draft.check_create())?;
        let changes = draft.into_changes()?;
        let new_drink = NewDrink {
            title: changes.title.unwrap_or_default(),
            recipe: changes.recipe.unwrap_or_default(),
        };

        let outcome = run_write(self.repo.pool(), "create_drink", move |conn| {
            async move { Ok::<_, WorkflowError>(DrinkRepository::insert(conn, &new_drink).await?) }
                .scope_boxed()
        })
        .await;

        settle(outcome, 0)
    }

    /// Changes only the supplied fields of drink `id`.
    pub async fn update(&self, id: i32, draft: DrinkDraft) -> AppResult<Drink> {
        reject_as_bad_request(draft.check_update())?;
        let changes = draft.into_changes()?;

        let outcome = run_write(self.repo.pool(), "update_drink", move |conn| {
            async move {
                DrinkRepository::update(conn, id, &changes)
                    .await?
                    .ok_or(WorkflowError::NotFound)
            }
            .scope_boxed()
        })
        .await;

        settle(outcome, id)
    }

    /// Deletes drink `id` and echoes the id back.
    pub async fn delete(&self, id: i32) -> AppResult<i32> {
        let outcome = run_write(self.repo.pool(), "delete_drink", move |conn| {
            async move {
                match DrinkRepository::delete(conn, id).await? {
                    0 => Err(WorkflowError::NotFound),
                    _ => Ok(id),
                }
            }
            .scope_boxed()
        })
        .await;

        settle(outcome, id)
    }
}

fn reject_as_bad_request(rejection: Rejection) -> AppResult<()> {
    if rejection.is_empty() {
        return Ok(());
    }
    tracing::warn!(violations = ?rejection.violations(), "Drink rejected");
    Err(AppError::bad_request("bad request"))
}

fn settle<T>(outcome: WriteOutcome<T>, id: i32) -> AppResult<T> {
    match outcome {
        WriteOutcome::Committed(value) => Ok(value),
        WriteOutcome::NotFound => Err(AppError::not_found("drink", id)),
        WriteOutcome::Rejected(_) | WriteOutcome::Failed(_) => Err(AppError::unprocessable()),
    }
}
