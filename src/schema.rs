//! schema.org structured data (JSON-LD) for project pages.

use serde_json::{json, Map, Value};

use crate::content::model::Project;

/// schema.org `applicationCategory` for a project category.
pub fn application_category(category: &str) -> &'static str {
    match category {
        "Mobile App" => "MobileApplication",
        // Full Stack, WordPress, Frontend, Backend and anything unmapped
        _ => "WebApplication",
    }
}

fn absolute(url: &str, base_url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{base_url}{url}")
    }
}

pub fn project_schema(project: &Project, base_url: &str, author: &str) -> Value {
    let base_url = base_url.trim_end_matches('/');

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": project.title,
        "description": project.description,
        "applicationCategory": application_category(&project.category),
        "operatingSystem": "Any",
        "datePublished": project.date.format("%Y-%m-%d").to_string(),
        "image": absolute(&project.image_url, base_url),
        "url": format!("{base_url}/projects/{}", project.id),
        "author": {
            "@type": "Person",
            "name": author
        },
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD",
            "availability": "https://schema.org/InStock"
        },
        "softwareRequirements": project.tech_stack.join(", ")
    });

    if let Value::Object(map) = &mut schema {
        insert_present(map, "codeRepository", project.github_url.as_deref());
        insert_present(map, "installUrl", project.demo_url.as_deref());
    }
    schema
}

fn insert_present(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        map.insert(key.to_string(), Value::String(v.to_string()));
    }
}
