//! Portfolio content: typed records, sample data, filtering and the
//! store-backed repository that serves them.

pub mod model;
pub mod query;
pub mod sample;
pub mod service;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::AppError;

/// A named group of documents in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Projects,
    BlogPosts,
    Services,
    Testimonials,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Projects,
        Collection::BlogPosts,
        Collection::Services,
        Collection::Testimonials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::BlogPosts => "blogPosts",
            Collection::Services => "services",
            Collection::Testimonials => "testimonials",
        }
    }

    /// Maps the admin URL segment (`/api/admin/{segment}`) to a collection.
    pub fn from_route(segment: &str) -> Option<Self> {
        match segment {
            "projects" => Some(Collection::Projects),
            "blog" => Some(Collection::BlogPosts),
            "services" => Some(Collection::Services),
            "testimonials" => Some(Collection::Testimonials),
            _ => None,
        }
    }

    /// Upload folder used for images attached to records of this collection.
    pub fn upload_folder(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::BlogPosts => "blog",
            Collection::Services => "services",
            Collection::Testimonials => "testimonials",
        }
    }
}

/// A record type that lives in one collection of the document store.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human readable name used in error messages ("Project not found").
    const LABEL: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Trim and de-duplicate user input before validation.
    fn normalize(&mut self);
    fn validate(&self) -> Result<(), AppError>;

    /// The image owned by this record, if any.
    fn image_url(&self) -> Option<&str>;

    fn sample() -> Vec<Self>;
}

/// Where a public listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Store,
    Sample,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Store => "store",
            ContentSource::Sample => "sample",
        }
    }
}

/// Envelope for every list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub source: ContentSource,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>, source: ContentSource) -> Self {
        Self {
            total: items.len(),
            items,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_wire_names() {
        assert_eq!(Collection::BlogPosts.as_str(), "blogPosts");
        assert_eq!(
            serde_json::to_value(Collection::BlogPosts).unwrap(),
            serde_json::json!("blogPosts")
        );
        assert_eq!(Collection::from_route("blog"), Some(Collection::BlogPosts));
        assert_eq!(Collection::from_route("blogPosts"), None);
    }

    #[test]
    fn test_listing_counts_items() {
        let listing = Listing::new(vec![1, 2, 3], ContentSource::Sample);
        assert_eq!(listing.total, 3);
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["source"], "sample");
    }
}
