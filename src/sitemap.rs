use chrono::NaiveDate;

use crate::content::model::{BlogPost, Project};

/// Top-level pages, in the order they appear in the sitemap.
pub const STATIC_ROUTES: &[&str] = &["", "/about", "/projects", "/blog", "/services", "/contact"];

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn url_entry(loc: &str, lastmod: Option<NaiveDate>, changefreq: &str, priority: &str) -> String {
    let lastmod = lastmod
        .map(|d| format!("\n    <lastmod>{}</lastmod>", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "\n  <url>\n    <loc>{}</loc>{}\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape_xml(loc),
        lastmod,
        changefreq,
        priority
    )
}

/// Sitemap covering the static pages plus one entry per project and post.
pub fn sitemap_xml(base_url: &str, projects: &[Project], posts: &[BlogPost]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );

    for route in STATIC_ROUTES {
        let priority = if route.is_empty() { "1.0" } else { "0.8" };
        xml.push_str(&url_entry(&format!("{base_url}{route}"), None, "weekly", priority));
    }
    for project in projects {
        xml.push_str(&url_entry(
            &format!("{base_url}/projects/{}", project.id),
            Some(project.date),
            "monthly",
            "0.8",
        ));
    }
    for post in posts {
        xml.push_str(&url_entry(
            &format!("{base_url}/blog/{}", post.slug),
            Some(post.date),
            "monthly",
            "0.7",
        ));
    }

    xml.push_str("\n</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<title>"), "&lt;title&gt;");
        assert_eq!(escape_xml("\"quote\""), "&quot;quote&quot;");
    }

    #[test]
    fn test_static_routes_only() {
        let xml = sitemap_xml("https://example.com/", &[], &[]);
        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains(
            "<loc>https://example.com</loc>\n    <changefreq>weekly</changefreq>\n    <priority>1.0</priority>"
        ));
        assert!(xml.contains("<loc>https://example.com/contact</loc>"));
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 5);
    }

    #[test]
    fn test_includes_projects_and_posts() {
        let xml = sitemap_xml("https://example.com", &sample::projects(), &sample::blog_posts());
        assert_eq!(xml.matches("<url>").count(), 6 + 6 + 3);
        assert!(xml.contains("<loc>https://example.com/projects/1</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/future-web-development-2025</loc>"));
        assert!(xml.contains("<lastmod>2024-12-01</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
