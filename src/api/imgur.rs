use std::path::Path;

use log::debug;
use reqwest::{
    header,
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

const UPLOAD_URL: &str = "https://api.imgur.com/3/image";

/// Anonymous Imgur upload. The backend only stores URLs, so images go to an
/// external host first and the hosted link ends up in the post.
#[derive(Debug, Clone)]
pub struct ImgurClient {
    client: Client,
    client_id: String,
    upload_url: String,
}

#[derive(Deserialize, Debug)]
struct UploadResponse {
    success: bool,
    data: Option<UploadData>,
}

#[derive(Deserialize, Debug)]
struct UploadData {
    link: Option<String>,
}

impl ImgurClient {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            client_id: client_id.into(),
            upload_url: UPLOAD_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_upload_url(mut self, url: String) -> Self {
        self.upload_url = url;
        self
    }

    /// Uploads the file and returns its hosted URL.
    pub async fn upload(&self, path: &Path) -> ApiResult<String> {
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        debug!("uploading {} ({} bytes, {})", file_name, bytes.len(), mime);

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.upload_url)
            .header(
                header::AUTHORIZATION,
                format!("Client-ID {}", self.client_id),
            )
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upload(format!("{}: {}", status, body)));
        }

        let body = response.bytes().await?;
        // decode failures here belong to the image host, not the backend
        let body: UploadResponse =
            serde_json::from_slice(&body).map_err(|e| ApiError::Upload(e.to_string()))?;
        match body {
            UploadResponse {
                success: true,
                data: Some(UploadData { link: Some(link) }),
            } => Ok(link),
            _ => Err(ApiError::Upload("response carried no image link".to_string())),
        }
    }
}
