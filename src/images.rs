//! Image URL validation and placeholder fallbacks.
//!
//! Records keep whatever image URL the admin typed in. Before a record is
//! served publicly its image is checked by shape and replaced with a
//! placeholder when it does not look like something a browser can render.

use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".avif"];

const IMAGE_HOSTS: &[&str] = &[
    "unsplash.com",
    "imgur.com",
    "cloudinary.com",
    "githubusercontent.com",
    "pexels.com",
    "pixabay.com",
    "placeholder.com",
    "ui-avatars.com",
];

pub const BLOG_PLACEHOLDER: &str = "/images/blog/default-blog-placeholder.svg";
pub const AVATAR_BACKGROUND: &str = "#22c55e";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Web,
    Mobile,
    Design,
    Backend,
    Other,
}

impl PlaceholderKind {
    /// Guess the kind of project from an image's alt text.
    pub fn from_alt(alt: &str) -> Self {
        let alt = alt.to_lowercase();
        if alt.contains("web") || alt.contains("website") {
            PlaceholderKind::Web
        } else if alt.contains("mobile") || alt.contains("app") {
            PlaceholderKind::Mobile
        } else if alt.contains("design") {
            PlaceholderKind::Design
        } else if alt.contains("backend") || alt.contains("server") {
            PlaceholderKind::Backend
        } else {
            PlaceholderKind::Other
        }
    }
}

/// Whether a URL is likely to point at a renderable image.
pub fn is_valid_image_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    if url.starts_with("/images/") {
        return true;
    }
    if Url::parse(url).is_err() {
        // Relative paths are served by us.
        return url.starts_with('/');
    }

    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        || IMAGE_HOSTS.iter().any(|host| lower.contains(host))
        || url.contains("data:image/")
}

pub fn project_placeholder(kind: PlaceholderKind) -> &'static str {
    match kind {
        PlaceholderKind::Web => "/images/projects/web-project-placeholder.svg",
        PlaceholderKind::Mobile => "/images/projects/mobile-app-placeholder.svg",
        PlaceholderKind::Design => "/images/projects/design-project-placeholder.svg",
        PlaceholderKind::Backend => "/images/projects/backend-project-placeholder.svg",
        PlaceholderKind::Other => "/images/projects/default-project-placeholder.svg",
    }
}

pub fn resolve_project_image(url: Option<&str>, kind: PlaceholderKind) -> String {
    match url {
        Some(u) if is_valid_image_url(u) => u.to_string(),
        _ => project_placeholder(kind).to_string(),
    }
}

pub fn resolve_blog_image(url: Option<&str>) -> String {
    match url {
        Some(u) if is_valid_image_url(u) => u.to_string(),
        _ => BLOG_PLACEHOLDER.to_string(),
    }
}

/// Resolve any image; alt text picks the placeholder when the URL is unusable.
pub fn resolve_image(url: Option<&str>, alt: &str) -> String {
    resolve_project_image(url, PlaceholderKind::from_alt(alt))
}

fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Inline SVG avatar with the person's initials, as a data URI.
pub fn avatar_placeholder(name: &str) -> String {
    let svg = format!(
        r##"<svg width="200" height="200" xmlns="http://www.w3.org/2000/svg"><rect width="200" height="200" fill="{bg}"/><text x="100" y="100" font-family="Arial" font-size="72" fill="#ffffff" text-anchor="middle" dominant-baseline="middle">{text}</text></svg>"##,
        bg = AVATAR_BACKGROUND,
        text = crate::sitemap::escape_xml(&initials(name)),
    );
    let encoded: String = url::form_urlencoded::byte_serialize(svg.as_bytes()).collect();
    format!("data:image/svg+xml,{}", encoded.replace('+', "%20"))
}

pub fn is_placeholder_image(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    url.contains("source.unsplash.com")
        || url.contains("ui-avatars.com")
        || url.contains("placeholder.com")
        || (url.contains("/images/projects/") && url.contains("-placeholder"))
        || url == BLOG_PLACEHOLDER
        || (url.starts_with("data:image/svg+xml,")
            && (url.contains("#22c55e") || url.contains("%2322c55e")))
}

/// Body of a generated 800x600 placeholder SVG file.
pub fn placeholder_svg(text: &str) -> String {
    format!(
        r##"<svg width="800" height="600" xmlns="http://www.w3.org/2000/svg">
  <rect width="800" height="600" fill="#22c55e"/>
  <text x="400" y="300" font-family="Arial" font-size="48" fill="white" text-anchor="middle" dominant-baseline="middle">
    {}
  </text>
</svg>
"##,
        crate::sitemap::escape_xml(text)
    )
}

/// Placeholder files written into `images/projects` by `site-tools placeholders`.
pub const PROJECT_PLACEHOLDER_FILES: &[(&str, &str)] = &[
    ("Web Project", "web-project-placeholder.svg"),
    ("Mobile App", "mobile-app-placeholder.svg"),
    ("Design Project", "design-project-placeholder.svg"),
    ("Backend Project", "backend-project-placeholder.svg"),
    ("Project", "default-project-placeholder.svg"),
    ("E-commerce Platform", "ecommerce.svg"),
    ("Real Estate App", "realestate.svg"),
    ("WordPress Website", "wordpress.svg"),
    ("Task Manager", "taskmanager.svg"),
    ("Fitness App", "fitnessapp.svg"),
    ("WordPress Plugin", "wordpressplugin.svg"),
];
