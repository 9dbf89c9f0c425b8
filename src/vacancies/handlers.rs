use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::{info, instrument, warn};

use crate::auth::CurrentAccount;
use crate::error::ApiError;
use crate::state::AppState;
use crate::vacancies::dto::{ListQuery, VacancyPage, VacancyRequest, VacancyView};
use crate::vacancies::repo::Vacancy;
use crate::vacancies::services::{
    can_modify, resolve_page, PageResolution, LISTING_PAGE_SIZE,
};

pub(crate) fn page_view(
    items: Vec<Vacancy>,
    page: i64,
    total_pages: i64,
    total: i64,
) -> VacancyPage {
    VacancyPage {
        items: items.into_iter().map(VacancyView::from).collect(),
        page,
        total_pages,
        total,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, format!("{field} is required")));
    }
    if value.len() > max {
        return Err(ApiError::validation(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

fn check_vacancy(input: &VacancyRequest) -> Result<(), ApiError> {
    check_field("title", &input.title, 100)?;
    check_field("short_description", &input.short_description, 200)?;
    if input.full_description.trim().is_empty() {
        return Err(ApiError::validation(
            "full_description",
            "full_description is required",
        ));
    }
    check_field("company", &input.company, 50)?;
    check_field("salary", &input.salary, 50)?;
    check_field("location", &input.location, 50)?;
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let total = Vacancy::count(&state.db, query.category).await?;

    match resolve_page(total, query.page, LISTING_PAGE_SIZE) {
        PageResolution::Redirect { last_page } => {
            let category = query.category.map(|c| c.as_str()).unwrap_or("all");
            let to = format!(
                "/api/v1/vacancies?category={category}&sort={}&page={last_page}",
                query.sort.as_str()
            );
            Ok(Redirect::temporary(&to).into_response())
        }
        PageResolution::Page {
            page,
            offset,
            total_pages,
        } => {
            let rows = Vacancy::list_page(
                &state.db,
                query.category,
                query.sort,
                LISTING_PAGE_SIZE,
                offset,
            )
            .await?;
            Ok(Json(page_view(rows, page, total_pages, total)).into_response())
        }
    }
}

#[instrument(skip(state))]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VacancyView>, ApiError> {
    let vacancy = Vacancy::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vacancy not found".into()))?;
    Ok(Json(VacancyView::from(vacancy)))
}

#[instrument(skip(state, current, payload))]
pub async fn create_vacancy(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(payload): Json<VacancyRequest>,
) -> Result<(StatusCode, HeaderMap, Json<VacancyView>), ApiError> {
    check_vacancy(&payload)?;

    let vacancy = Vacancy::create(&state.db, current.0.id, &payload).await?;
    info!(vacancy_id = vacancy.id, author_id = current.0.id, "vacancy posted");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/v1/vacancies/{}", vacancy.id)
            .parse()
            .map_err(anyhow::Error::from)?,
    );
    Ok((StatusCode::CREATED, headers, Json(VacancyView::from(vacancy))))
}

#[instrument(skip(state, current, payload))]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    current: CurrentAccount,
    Json(payload): Json<VacancyRequest>,
) -> Result<Json<VacancyView>, ApiError> {
    let vacancy = Vacancy::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vacancy not found".into()))?;

    if !can_modify(&vacancy, Some(current.0.id)) {
        warn!(
            vacancy_id = id,
            actor = current.0.id,
            owner = vacancy.author_id,
            "edit refused"
        );
        return Err(ApiError::Forbidden(
            "You can only edit your own vacancies".into(),
        ));
    }

    check_vacancy(&payload)?;
    let updated = Vacancy::update(&state.db, id, &payload).await?;
    info!(vacancy_id = id, "vacancy updated");
    Ok(Json(VacancyView::from(updated)))
}

#[instrument(skip(state, current))]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    current: CurrentAccount,
) -> Result<StatusCode, ApiError> {
    let vacancy = Vacancy::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vacancy not found".into()))?;

    if !can_modify(&vacancy, Some(current.0.id)) {
        warn!(
            vacancy_id = id,
            actor = current.0.id,
            owner = vacancy.author_id,
            "delete refused"
        );
        return Err(ApiError::Forbidden(
            "You can only delete your own vacancies".into(),
        ));
    }

    Vacancy::delete(&state.db, id).await?;
    info!(vacancy_id = id, "vacancy deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacancies::dto::Category;

    fn request() -> VacancyRequest {
        VacancyRequest {
            title: "Backend Developer".into(),
            category: Category::It,
            short_description: "Build APIs".into(),
            full_description: "Design and develop scalable services.".into(),
            company: "Tech Corp".into(),
            salary: "$80,000".into(),
            location: "Remote".into(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(check_vacancy(&request()).is_ok());
    }

    #[test]
    fn blank_required_fields_fail() {
        let mut r = request();
        r.title = "   ".into();
        assert!(check_vacancy(&r).is_err());

        let mut r = request();
        r.full_description = String::new();
        assert!(check_vacancy(&r).is_err());
    }

    #[test]
    fn overlong_fields_fail() {
        let mut r = request();
        r.title = "t".repeat(101);
        assert!(check_vacancy(&r).is_err());

        let mut r = request();
        r.short_description = "s".repeat(201);
        assert!(check_vacancy(&r).is_err());

        let mut r = request();
        r.company = "c".repeat(51);
        assert!(check_vacancy(&r).is_err());
    }

    #[test]
    fn page_view_flags_prev_and_next() {
        let page = page_view(Vec::new(), 2, 3, 13);
        assert!(page.has_prev);
        assert!(page.has_next);

        let page = page_view(Vec::new(), 3, 3, 13);
        assert!(page.has_prev);
        assert!(!page.has_next);

        let page = page_view(Vec::new(), 1, 0, 0);
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }
}
