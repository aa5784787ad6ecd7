use std::collections::HashMap;

use log::warn;

use crate::post::{Category, Post};

/// Client-side view of the post list, partitioned by disaster category.
///
/// The feed owns its buckets and is rebuilt from scratch on every fetch, so
/// repeated fetches never accumulate duplicates. Posts with an unrecognized
/// category stay in the full list but land in no bucket.
#[derive(Debug, Default)]
pub struct Feed {
    all: Vec<Post>,
    buckets: HashMap<Category, Vec<Post>>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every bucket, then partitions `posts` by exact category tag.
    pub fn rebuild(&mut self, posts: Vec<Post>) {
        self.buckets.clear();
        for post in &posts {
            match post.category() {
                Some(category) => self.buckets.entry(category).or_default().push(post.clone()),
                None => warn!(
                    "post {} has unknown category {:?}, not bucketed",
                    post.id(),
                    post.category
                ),
            }
        }
        self.all = posts;
    }

    pub fn all(&self) -> &[Post] {
        &self.all
    }

    pub fn bucket(&self, category: Category) -> &[Post] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
