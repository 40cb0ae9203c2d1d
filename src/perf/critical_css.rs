//! Above-the-fold CSS served inline by the static pages.

use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    static ref COMMENTS: Regex = Regex::new(r"/\*[\s\S]*?\*/").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref SEMI_BEFORE_CLOSE: Regex = Regex::new(r";\s*\}").unwrap();
    static ref AROUND_OPEN: Regex = Regex::new(r"\s*\{\s*").unwrap();
    static ref AFTER_SEMI: Regex = Regex::new(r";\s*").unwrap();
    static ref AFTER_COMMA: Regex = Regex::new(r",\s*").unwrap();
}

const BASE_RULES: &str = include_str!("critical.css");

const HOME_RULES: &str = r"
/* Home page hero section specific */
.order-2{order:2}
.lg\:order-1{order:1}
.w-12{width:3rem}
.sm\:w-16{width:4rem}
.h-\[1px\]{height:1px}
.bg-green-500{background-color:rgb(34 197 94)}
.mr-4{margin-right:1rem}
.text-sm{font-size:0.875rem;line-height:1.25rem}
.sm\:text-base{font-size:1rem;line-height:1.5rem}
.font-medium{font-weight:500}
.text-gray-600{color:rgb(75 85 99)}
.dark\:text-gray-300{color:rgb(209 213 219)}
.max-w-lg{max-width:32rem}
";

const PROJECTS_RULES: &str = r"
/* Projects page specific */
.grid-cols-1{grid-template-columns:repeat(1,minmax(0,1fr))}
.md\:grid-cols-2{grid-template-columns:repeat(2,minmax(0,1fr))}
.lg\:grid-cols-3{grid-template-columns:repeat(3,minmax(0,1fr))}
";

const BLOG_RULES: &str = r"
/* Blog page specific */
.prose{color:var(--tw-prose-body);max-width:65ch}
.prose-lg{font-size:1.125rem;line-height:1.7777778}
";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalCssConfig {
    pub width: u32,
    pub height: u32,
    /// Bytes
    pub inline_threshold: usize,
}

impl Default for CriticalCssConfig {
    fn default() -> Self {
        Self {
            width: 1300,
            height: 900,
            inline_threshold: 10_000,
        }
    }
}

/// Base rules plus any additions for the given route.
pub fn critical_css(route: &str) -> String {
    let extra = match route {
        "/" => HOME_RULES,
        "/projects" => PROJECTS_RULES,
        "/blog" => BLOG_RULES,
        _ => "",
    };
    format!("{BASE_RULES}{extra}")
}

pub fn minify_css(css: &str) -> String {
    let css = COMMENTS.replace_all(css, "");
    let css = WHITESPACE.replace_all(&css, " ");
    let css = SEMI_BEFORE_CLOSE.replace_all(&css, "}");
    let css = AROUND_OPEN.replace_all(&css, "{");
    let css = AFTER_SEMI.replace_all(&css, ";");
    let css = AFTER_COMMA.replace_all(&css, ",");
    css.trim().to_string()
}

pub fn should_inline(css: &str, config: &CriticalCssConfig) -> bool {
    css.len() <= config.inline_threshold
}

pub fn preload_tags() -> &'static str {
    r#"<link rel="preload" href="/fonts/GeistVF.woff2" as="font" type="font/woff2" crossorigin>
<link rel="preload" href="/fonts/GeistMonoVF.woff2" as="font" type="font/woff2" crossorigin>
<link rel="dns-prefetch" href="//fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>"#
}
