use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateUrlRequest {
    #[serde(alias = "original_url")]
    pub url: String,
}

#[derive(Serialize)]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

#[derive(Serialize)]
pub struct GetUrlResponse {
    pub short_code: String,
    pub original_url: String,
}
