use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;

use crate::vacancies::dto::{Category, SortOrder, VacancyRequest};

/// Vacancy record in the database. `author_id` is an explicit foreign key;
/// the owning account is looked up separately when needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i64,
    pub title: String,
    pub category: Category,
    pub author_id: i64,
    pub short_description: String,
    pub full_description: String,
    pub company: String,
    pub salary: String,
    pub location: String,
    pub date_created: OffsetDateTime,
}

const VACANCY_COLUMNS: &str = "id, title, category, author_id, short_description, \
                               full_description, company, salary, location, date_created";

impl Vacancy {
    pub async fn find(db: &PgPool, id: i64) -> anyhow::Result<Option<Vacancy>> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(vacancy)
    }

    pub async fn create(
        db: &PgPool,
        author_id: i64,
        input: &VacancyRequest,
    ) -> anyhow::Result<Vacancy> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            INSERT INTO vacancies
                (title, category, author_id, short_description, full_description,
                 company, salary, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VACANCY_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(input.category)
        .bind(author_id)
        .bind(&input.short_description)
        .bind(&input.full_description)
        .bind(&input.company)
        .bind(&input.salary)
        .bind(&input.location)
        .fetch_one(db)
        .await?;
        Ok(vacancy)
    }

    /// Full update of the mutable fields. Author and creation date never change.
    pub async fn update(db: &PgPool, id: i64, input: &VacancyRequest) -> anyhow::Result<Vacancy> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            UPDATE vacancies
            SET title = $2, category = $3, short_description = $4,
                full_description = $5, company = $6, salary = $7, location = $8
            WHERE id = $1
            RETURNING {VACANCY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.title)
        .bind(input.category)
        .bind(&input.short_description)
        .bind(&input.full_description)
        .bind(&input.company)
        .bind(&input.salary)
        .bind(&input.location)
        .fetch_one(db)
        .await?;
        Ok(vacancy)
    }

    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn count(db: &PgPool, category: Option<Category>) -> anyhow::Result<i64> {
        let (total,): (i64,) = match category {
            Some(cat) => {
                sqlx::query_as("SELECT COUNT(*) FROM vacancies WHERE category = $1")
                    .bind(cat)
                    .fetch_one(db)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM vacancies")
                    .fetch_one(db)
                    .await?
            }
        };
        Ok(total)
    }

    /// One page of the filtered, sorted listing collection. Ties on the
    /// timestamp break on id so page boundaries are deterministic.
    pub async fn list_page(
        db: &PgPool,
        category: Option<Category>,
        sort: SortOrder,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Vacancy>> {
        let dir = match sort {
            SortOrder::Newest => "DESC",
            SortOrder::Oldest => "ASC",
        };
        let rows = match category {
            Some(cat) => {
                sqlx::query_as::<_, Vacancy>(&format!(
                    r#"
                    SELECT {VACANCY_COLUMNS} FROM vacancies
                    WHERE category = $1
                    ORDER BY date_created {dir}, id {dir}
                    LIMIT $2 OFFSET $3
                    "#
                ))
                .bind(cat)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vacancy>(&format!(
                    r#"
                    SELECT {VACANCY_COLUMNS} FROM vacancies
                    ORDER BY date_created {dir}, id {dir}
                    LIMIT $1 OFFSET $2
                    "#
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn count_by_author(db: &PgPool, author_id: i64) -> anyhow::Result<i64> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vacancies WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(db)
                .await?;
        Ok(total)
    }

    /// One page of an account's own vacancies, newest first.
    pub async fn list_by_author_page(
        db: &PgPool,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Vacancy>> {
        let rows = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            SELECT {VACANCY_COLUMNS} FROM vacancies
            WHERE author_id = $1
            ORDER BY date_created DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Remove every vacancy owned by the account, inside the caller's
    /// transaction. Runs before the account row itself is deleted so no
    /// vacancy ever dangles.
    pub async fn delete_by_author_tx(
        tx: &mut Transaction<'_, Postgres>,
        author_id: i64,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM vacancies WHERE author_id = $1")
            .bind(author_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
