use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Longest report text the backend accepts.
pub const MAX_TEXT_LEN: usize = 100;

/// The five disaster tags the backend knows about, with their exact wire
/// spellings. Anything else is ignored by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Crime,
    EarthQuake,
    Flood,
    HeavySnow,
    Tsunami,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Crime,
        Category::EarthQuake,
        Category::Flood,
        Category::HeavySnow,
        Category::Tsunami,
    ];

    /// Exact string match, no normalization. Unknown tags map to `None`.
    pub fn from_tag(tag: &str) -> Option<Category> {
        match tag {
            "Crime" => Some(Category::Crime),
            "EarthQuake" => Some(Category::EarthQuake),
            "Flood" => Some(Category::Flood),
            "HeavySnow" => Some(Category::HeavySnow),
            "Tsunami" => Some(Category::Tsunami),
            _ => None,
        }
    }

    pub const fn tag(&self) -> &'static str {
        match self {
            Category::Crime => "Crime",
            Category::EarthQuake => "EarthQuake",
            Category::Flood => "Flood",
            Category::HeavySnow => "HeavySnow",
            Category::Tsunami => "Tsunami",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A disaster report as returned by `GET /posts/`.
///
/// `category` stays a raw string so posts with tags the client does not know
/// still survive deserialization; bucketing decides what to do with them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub image_path: String,
    pub location: [f64; 2],
    pub category: String,
    pub accuracy: String,
}

impl Post {
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn category(&self) -> Option<Category> {
        Category::from_tag(&self.category)
    }
    pub const fn latitude(&self) -> f64 {
        self.location[0]
    }
    pub const fn longitude(&self) -> f64 {
        self.location[1]
    }
}

/// Body of `POST /posts/`. The backend assigns `id`, `category` and
/// `accuracy` server-side.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PostRequest {
    pub user_id: String,
    pub text: String,
    pub image_path: String,
    pub location: [f64; 2],
}

impl PostRequest {
    /// Builds a request, rejecting text over [`MAX_TEXT_LEN`] characters
    /// before anything touches the network.
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
        image_path: impl Into<String>,
        location: [f64; 2],
    ) -> ApiResult<Self> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(ApiError::TextTooLong(len));
        }
        Ok(Self {
            user_id: user_id.into(),
            text,
            image_path: image_path.into(),
            location,
        })
    }
}
