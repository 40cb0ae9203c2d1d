//! In-memory filtering and ordering for the public listings.

use super::model::{BlogPost, Project, Testimonial};

/// Sentinel that disables a category or tag filter.
pub const ALL: &str = "All";

fn matches_search(query: &str, fields: &[&str], tags: &[String]) -> bool {
    let query = query.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&query))
        || tags.iter().any(|t| t.to_lowercase().contains(&query))
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty() && *f != ALL)
}

fn active_search(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

/// Category match is exact and case-sensitive.
pub fn filter_projects(
    items: Vec<Project>,
    category: Option<&str>,
    search: Option<&str>,
    featured: Option<bool>,
) -> Vec<Project> {
    let category = active(category);
    let search = active_search(search);

    items
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| featured.is_none_or(|f| p.featured == f))
        .filter(|p| search.is_none_or(|q| matches_search(q, &[p.title.as_str(), p.description.as_str()], &p.tags)))
        .collect()
}

fn distinct_with_all<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

/// `All` followed by each category in first-seen order.
pub fn project_categories(items: &[Project]) -> Vec<String> {
    distinct_with_all(items.iter().map(|p| &p.category))
}

/// `All` followed by each tag in first-seen order.
pub fn blog_tags(items: &[BlogPost]) -> Vec<String> {
    distinct_with_all(items.iter().flat_map(|p| p.tags.iter()))
}

/// Filters by exact tag membership and search text, newest first.
pub fn filter_posts(items: Vec<BlogPost>, tag: Option<&str>, search: Option<&str>) -> Vec<BlogPost> {
    let tag = active(tag);
    let search = active_search(search);

    let mut posts: Vec<BlogPost> = items
        .into_iter()
        .filter(|p| tag.is_none_or(|t| p.tags.iter().any(|pt| pt == t)))
        .filter(|p| search.is_none_or(|q| matches_search(q, &[p.title.as_str(), p.excerpt.as_str()], &p.tags)))
        .collect();
    sort_posts_newest_first(&mut posts);
    posts
}

/// Stable, so posts sharing a date keep their stored order.
pub fn sort_posts_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn sort_testimonials_newest_first(items: &mut [Testimonial]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn find_post_by_slug(posts: Vec<BlogPost>, slug: &str) -> Option<BlogPost> {
    posts.into_iter().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;
    use chrono::NaiveDate;

    #[test]
    fn test_filter_projects_by_category_is_case_sensitive() {
        let all = sample::projects();
        let wp = filter_projects(all.clone(), Some("WordPress"), None, None);
        assert_eq!(wp.len(), 2);
        assert!(wp.iter().all(|p| p.category == "WordPress"));

        let lower = filter_projects(all, Some("wordpress"), None, None);
        assert!(lower.is_empty());
    }

    #[test]
    fn test_filter_projects_all_and_search() {
        let all = sample::projects();
        assert_eq!(filter_projects(all.clone(), Some(ALL), None, None).len(), 6);
        let flutter = filter_projects(all.clone(), None, Some("flutter"), None);
        assert_eq!(flutter.len(), 1);
        assert_eq!(flutter[0].title, "Fitness Tracking App");
        let featured = filter_projects(all, None, Some("  "), Some(true));
        assert_eq!(featured.len(), 2);
    }

    #[test]
    fn test_project_categories_first_seen_order() {
        let cats = project_categories(&sample::projects());
        assert_eq!(cats, vec!["All", "Full Stack", "Mobile App", "WordPress"]);
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let mut posts = sample::blog_posts();
        posts.reverse();
        let sorted = filter_posts(posts, None, None);
        let dates: Vec<NaiveDate> = sorted.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn test_filter_posts_by_tag() {
        let posts = filter_posts(sample::blog_posts(), Some("Performance"), None);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "future-web-development-2025");
    }

    #[test]
    fn test_blog_tags_starts_with_all() {
        let tags = blog_tags(&sample::blog_posts());
        assert_eq!(tags[0], "All");
        assert_eq!(tags.iter().filter(|t| *t == "Performance").count(), 1);
    }

    #[test]
    fn test_find_post_by_slug() {
        let post = find_post_by_slug(sample::blog_posts(), "cross-platform-mobile-apps-guide");
        assert_eq!(post.map(|p| p.id), Some("2".to_string()));
        assert!(find_post_by_slug(sample::blog_posts(), "missing").is_none());
    }
}
