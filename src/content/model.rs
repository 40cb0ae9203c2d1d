//! Content records as they are stored and served (camelCase JSON).

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Collection, Document};
use crate::error::AppError;

lazy_static::lazy_static! {
    /// Lowercase word characters separated by single hyphens.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9_]+(?:-[a-z0-9_]+)*$").unwrap();
    /// ASCII word characters only, so accented letters are stripped.
    static ref NON_WORD: Regex = Regex::new(r"[^a-zA-Z0-9_\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Categories offered by the project form plus the spellings used by older records.
pub const PROJECT_CATEGORIES: &[&str] = &[
    "Full Stack",
    "Front End",
    "Back End",
    "Mobile",
    "Mobile App",
    "UI/UX",
    "WordPress",
    "Other",
    "Frontend",
    "Backend",
];

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Emoji or icon key understood by the front-end.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub company: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default = "today")]
    pub date: NaiveDate,
}

fn default_rating() -> u8 {
    5
}

/// Derive a URL slug from a title: lowercase, strip punctuation, hyphenate whitespace.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE.replace_all(stripped.trim(), "-").into_owned()
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Trim entries, drop empties and keep the first occurrence of each value.
pub fn normalize_list(items: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        let item = item.trim().to_string();
        if !item.is_empty() && !seen.contains(&item) {
            seen.push(item);
        }
    }
    *items = seen;
}

fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value.take() {
        let v = v.trim().to_string();
        if !v.is_empty() {
            *value = Some(v);
        }
    }
}

fn required(fields: &[&str]) -> Result<(), AppError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::validation("Please fill in all required fields"));
    }
    Ok(())
}

impl Document for Project {
    const COLLECTION: Collection = Collection::Projects;
    const LABEL: &'static str = "Project";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_string();
        normalize_list(&mut self.tags);
        normalize_list(&mut self.tech_stack);
        trim_optional(&mut self.github_url);
        trim_optional(&mut self.demo_url);
    }

    fn validate(&self) -> Result<(), AppError> {
        required(&[&self.title, &self.description, &self.category])?;
        if !PROJECT_CATEGORIES.contains(&self.category.as_str()) {
            return Err(AppError::validation(format!(
                "Unknown category '{}'",
                self.category
            )));
        }
        Ok(())
    }

    fn image_url(&self) -> Option<&str> {
        Some(&self.image_url).filter(|u| !u.is_empty()).map(|u| u.as_str())
    }

    fn sample() -> Vec<Self> {
        super::sample::projects()
    }
}

impl Document for BlogPost {
    const COLLECTION: Collection = Collection::BlogPosts;
    const LABEL: &'static str = "Blog post";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.slug = self.slug.trim().to_string();
        if self.slug.is_empty() {
            self.slug = slugify(&self.title);
        }
        normalize_list(&mut self.tags);
    }

    fn validate(&self) -> Result<(), AppError> {
        required(&[&self.title, &self.excerpt, &self.content, &self.slug])?;
        if !is_valid_slug(&self.slug) {
            return Err(AppError::validation(
                "Slug must contain only lowercase letters, numbers, underscores and hyphens",
            ));
        }
        Ok(())
    }

    fn image_url(&self) -> Option<&str> {
        Some(&self.cover_image).filter(|u| !u.is_empty()).map(|u| u.as_str())
    }

    fn sample() -> Vec<Self> {
        super::sample::blog_posts()
    }
}

impl Document for Service {
    const COLLECTION: Collection = Collection::Services;
    const LABEL: &'static str = "Service";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        normalize_list(&mut self.features);
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.features.is_empty()
        {
            return Err(AppError::validation(
                "Please fill in all required fields and add at least one feature",
            ));
        }
        Ok(())
    }

    fn image_url(&self) -> Option<&str> {
        None
    }

    fn sample() -> Vec<Self> {
        super::sample::services()
    }
}

impl Document for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;
    const LABEL: &'static str = "Testimonial";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.company = self.company.trim().to_string();
        trim_optional(&mut self.avatar_url);
    }

    fn validate(&self) -> Result<(), AppError> {
        required(&[&self.name, &self.content, &self.company])?;
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }
        Ok(())
    }

    fn image_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    fn sample() -> Vec<Self> {
        super::sample::testimonials()
    }
}

// ============================================================================
// Profile content (read-only, not managed through the admin panel)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Mobile,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 1-100
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub availability: String,
    pub profile_image: String,
    pub intro: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub about: About,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social_links: Vec<SocialLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: String::new(),
            title: "Shop".to_string(),
            description: "An online shop".to_string(),
            content: None,
            image_url: String::new(),
            tags: vec![],
            category: "Full Stack".to_string(),
            github_url: None,
            demo_url: None,
            featured: false,
            date: today(),
            tech_stack: vec![],
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Future of Web Development in 2025"), "the-future-of-web-development-in-2025");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("Rust & WebAssembly: a guide"), "rust-webassembly-a-guide");
        assert_eq!(slugify("Café Guide"), "caf-guide");
        assert!(is_valid_slug(&slugify("Über Crème Brûlée")));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("cross-platform-mobile-apps-guide"));
        assert!(is_valid_slug("snake_case-ok"));
        assert!(!is_valid_slug("Upper-Case"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_normalize_list_trims_and_dedupes() {
        let mut tags = vec![
            " React ".to_string(),
            "".to_string(),
            "React".to_string(),
            "Rust".to_string(),
            "   ".to_string(),
        ];
        normalize_list(&mut tags);
        assert_eq!(tags, vec!["React", "Rust"]);
    }

    #[test]
    fn test_project_requires_title_description_category() {
        let mut p = project();
        p.description = "  ".to_string();
        let err = p.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn test_project_rejects_unknown_category() {
        let mut p = project();
        p.category = "wordpress".to_string();
        assert!(p.validate().is_err());
        p.category = "WordPress".to_string();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_blog_post_slug_derived_from_title() {
        let mut post = BlogPost {
            id: String::new(),
            title: "Hello Rust World".to_string(),
            excerpt: "e".to_string(),
            content: "# Hi".to_string(),
            cover_image: String::new(),
            date: today(),
            author: "Jane".to_string(),
            tags: vec![],
            slug: String::new(),
        };
        post.normalize();
        assert_eq!(post.slug, "hello-rust-world");
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_service_needs_a_feature() {
        let service = Service {
            id: String::new(),
            title: "Consulting".to_string(),
            description: "Advice".to_string(),
            icon: "briefcase".to_string(),
            features: vec![],
        };
        assert!(service.validate().is_err());
    }

    #[test]
    fn test_testimonial_rating_bounds() {
        let mut t = Testimonial {
            id: String::new(),
            name: "Ann".to_string(),
            role: "CTO".to_string(),
            company: "Acme".to_string(),
            content: "Great".to_string(),
            avatar_url: Some("  ".to_string()),
            rating: 0,
            date: today(),
        };
        assert!(t.validate().is_err());
        t.rating = 6;
        assert!(t.validate().is_err());
        t.rating = 4;
        t.normalize();
        assert!(t.validate().is_ok());
        assert_eq!(t.avatar_url, None);
    }

    #[test]
    fn test_project_deserializes_camel_case_with_defaults() {
        let json = serde_json::json!({
            "title": "Site",
            "description": "d",
            "category": "WordPress",
            "imageUrl": "/images/projects/wordpress.svg",
            "techStack": ["PHP"],
            "date": "2024-08-05"
        });
        let p: Project = serde_json::from_value(json).unwrap();
        assert_eq!(p.image_url, "/images/projects/wordpress.svg");
        assert_eq!(p.tech_stack, vec!["PHP"]);
        assert!(!p.featured);
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 8, 5).unwrap());
    }
}
