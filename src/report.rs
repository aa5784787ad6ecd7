use std::path::PathBuf;

use log::{info, warn};

use crate::{
    api::{imgur::ImgurClient, WardClient},
    config::Config,
    error::{ApiError, ApiResult},
    feed::Feed,
    post::{PostRequest, MAX_TEXT_LEN},
};

/// A report as collected from the user, before any network work.
#[derive(Debug, Clone)]
pub struct Draft {
    pub text: String,
    pub image: Option<PathBuf>,
}

/// Runs the whole submission flow: upload the image if there is one, create
/// the post, then refetch the list into `feed`.
///
/// If the image upload succeeds but the post creation fails, the hosted image
/// stays orphaned on the external host; it is logged, not deleted.
pub async fn submit_report(
    config: &Config,
    client: &WardClient,
    imgur: Option<&ImgurClient>,
    feed: &mut Feed,
    draft: Draft,
) -> ApiResult<()> {
    // reject oversized text before spending an upload on it
    let len = draft.text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ApiError::TextTooLong(len));
    }

    let image_path = match &draft.image {
        Some(path) => {
            let imgur = imgur.ok_or_else(|| {
                ApiError::Upload("no Imgur client id configured".to_string())
            })?;
            let url = imgur.upload(path).await?;
            info!("image uploaded: {}", url);
            url
        }
        None => String::new(),
    };

    let request = PostRequest::new(config.uid(), draft.text, image_path, config.location())?;

    if let Err(error) = client.create_post(&request).await {
        if !request.image_path.is_empty() {
            warn!("post failed, image left orphaned: {}", request.image_path);
        }
        return Err(error);
    }
    info!("report submitted");

    let posts = client.fetch_posts().await?;
    feed.rebuild(posts);
    Ok(())
}
