use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use crate::error::ApiError;
use crate::state::AppState;

const CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

#[derive(Debug, Serialize)]
pub struct CatPicResponse {
    pub url: String,
}

/// Ask the cat API for one random image URL. The key is optional; without it
/// the upstream still answers, just rate-limited harder.
pub async fn random_cat_url(
    http: &reqwest::Client,
    api_key: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let mut request = http.get(CAT_API_URL);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }

    let response = request.send().await?.error_for_status()?;
    let images: Vec<CatImage> = response.json().await?;
    Ok(images.into_iter().next().map(|img| img.url))
}

#[instrument(skip(state))]
pub async fn cat_pics(State(state): State<AppState>) -> Result<Json<CatPicResponse>, ApiError> {
    match random_cat_url(&state.http, state.config.cat_api_key.as_deref()).await {
        Ok(Some(url)) => Ok(Json(CatPicResponse { url })),
        Ok(None) => Err(ApiError::Upstream("cat API returned no images".into())),
        Err(e) => {
            error!(error = %e, "cat API request failed");
            Err(ApiError::Upstream("cat API request failed".into()))
        }
    }
}
