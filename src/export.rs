//! Helpers for preparing the static export for shared hosting: sitemap,
//! placeholder images, `.htaccess` and a pre-upload check.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::sample;
use crate::images::{placeholder_svg, BLOG_PLACEHOLDER, PROJECT_PLACEHOLDER_FILES};
use crate::sitemap::sitemap_xml;

/// Files larger than this slow down FTP uploads.
pub const LARGE_FILE_BYTES: u64 = 2 * 1024 * 1024;

pub const ESSENTIAL_FILES: &[&str] = &["index.html", "robots.txt", "sitemap.xml", ".htaccess", "images"];

/// Page routes that must be exported as `{route}/index.html`.
pub const EXPECTED_ROUTES: &[&str] = &["", "about", "projects", "blog", "contact", "admin"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("output directory {0} does not exist; run the build first")]
    MissingOutputDir(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn require_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ExportError::MissingOutputDir(dir.to_path_buf()))
    }
}

/// Write `sitemap.xml` for the built-in content.
pub fn write_sitemap(out: &Path, base_url: &str) -> Result<PathBuf, ExportError> {
    require_dir(out)?;
    let xml = sitemap_xml(base_url, &sample::projects(), &sample::blog_posts());
    let path = out.join("sitemap.xml");
    std::fs::write(&path, xml)?;
    Ok(path)
}

/// Write the project placeholders and the blog placeholder under `out/images`.
pub fn write_placeholders(out: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let projects = out.join("images").join("projects");
    std::fs::create_dir_all(&projects)?;

    let mut written = Vec::with_capacity(PROJECT_PLACEHOLDER_FILES.len() + 1);
    for (text, filename) in PROJECT_PLACEHOLDER_FILES {
        let path = projects.join(filename);
        std::fs::write(&path, placeholder_svg(text))?;
        written.push(path);
    }

    let blog = out.join(BLOG_PLACEHOLDER.trim_start_matches('/'));
    if let Some(parent) = blog.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&blog, placeholder_svg("Blog Post"))?;
    written.push(blog);

    Ok(written)
}

pub fn copy_htaccess(from: &Path, out: &Path) -> Result<PathBuf, ExportError> {
    require_dir(out)?;
    let dest = out.join(".htaccess");
    std::fs::copy(from, &dest)?;
    Ok(dest)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LargeFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Problems that should block an upload.
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub large_files: Vec<LargeFile>,
    pub total_size: u64,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

fn walk(dir: &Path, base: &Path, report: &mut VerifyReport) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            walk(&path, base, report)?;
        } else {
            report.total_size += metadata.len();
            if metadata.len() > LARGE_FILE_BYTES {
                report.large_files.push(LargeFile {
                    path: path.strip_prefix(base).unwrap_or(&path).to_path_buf(),
                    size: metadata.len(),
                });
            }
        }
    }
    Ok(())
}

/// Check an export directory before it is uploaded.
pub fn verify(out: &Path) -> Result<VerifyReport, ExportError> {
    require_dir(out)?;
    let mut report = VerifyReport::default();

    for file in ESSENTIAL_FILES {
        if !out.join(file).exists() {
            report.issues.push(format!("Missing essential file: {file}"));
        }
    }

    for route in EXPECTED_ROUTES {
        let dir = out.join(route);
        if !dir.exists() {
            report.issues.push(format!("Missing expected route: /{route}"));
        } else if !dir.join("index.html").exists() {
            report
                .warnings
                .push(format!("Route /{route} exists but is missing index.html"));
        }
    }

    let htaccess = out.join(".htaccess");
    if htaccess.is_file() {
        let content = std::fs::read_to_string(&htaccess)?;
        if !content.contains("RewriteEngine On") {
            report
                .warnings
                .push(".htaccess may not have proper URL rewriting rules".to_string());
        }
        if !content.contains("ExpiresByType") && !content.contains("ExpiresActive On") {
            report
                .warnings
                .push(".htaccess may not have browser caching rules".to_string());
        }
    }

    walk(out, out, &mut report)?;
    if !report.large_files.is_empty() {
        report.warnings.push(format!(
            "{} large files might slow down the upload process",
            report.large_files.len()
        ));
    }

    Ok(report)
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HTACCESS: &str = "RewriteEngine On\nExpiresActive On\n";

    fn complete_export(dir: &Path) {
        for route in EXPECTED_ROUTES {
            fs::create_dir_all(dir.join(route)).unwrap();
            fs::write(dir.join(route).join("index.html"), "<html></html>").unwrap();
        }
        fs::write(dir.join("robots.txt"), "User-agent: *").unwrap();
        fs::write(dir.join(".htaccess"), HTACCESS).unwrap();
        write_sitemap(dir, "https://example.com").unwrap();
        write_placeholders(dir).unwrap();
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3 MB");
    }

    #[test]
    fn test_placeholders_written() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_placeholders(dir.path()).unwrap();
        assert_eq!(written.len(), PROJECT_PLACEHOLDER_FILES.len() + 1);
        let svg = fs::read_to_string(dir.path().join("images/projects/ecommerce.svg")).unwrap();
        assert!(svg.contains("E-commerce Platform"));
        assert!(dir.path().join("images/blog/default-blog-placeholder.svg").is_file());
    }

    #[test]
    fn test_copy_htaccess_requires_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.htaccess");
        fs::write(&source, HTACCESS).unwrap();

        let missing = dir.path().join("out");
        assert!(matches!(
            copy_htaccess(&source, &missing),
            Err(ExportError::MissingOutputDir(_))
        ));

        fs::create_dir(&missing).unwrap();
        let dest = copy_htaccess(&source, &missing).unwrap();
        assert_eq!(fs::read_to_string(dest).unwrap(), HTACCESS);
    }

    #[test]
    fn test_verify_complete_export() {
        let dir = tempfile::tempdir().unwrap();
        complete_export(dir.path());

        let report = verify(dir.path()).unwrap();
        assert!(report.is_ok(), "{:?}", report.issues);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.total_size > 0);
    }

    #[test]
    fn test_verify_reports_problems() {
        let dir = tempfile::tempdir().unwrap();
        complete_export(dir.path());
        fs::remove_file(dir.path().join("robots.txt")).unwrap();
        fs::remove_file(dir.path().join("blog/index.html")).unwrap();
        fs::write(dir.path().join(".htaccess"), "Options -Indexes\n").unwrap();
        fs::write(dir.path().join("video.mp4"), vec![0u8; LARGE_FILE_BYTES as usize + 1]).unwrap();

        let report = verify(dir.path()).unwrap();
        assert!(!report.is_ok());
        assert_eq!(report.issues, vec!["Missing essential file: robots.txt".to_string()]);
        assert!(report.warnings.iter().any(|w| w.contains("/blog")));
        assert!(report.warnings.iter().any(|w| w.contains("rewriting")));
        assert!(report.warnings.iter().any(|w| w.contains("caching")));
        assert_eq!(report.large_files.len(), 1);
        assert_eq!(report.large_files[0].path, PathBuf::from("video.mp4"));
    }

    #[test]
    fn test_verify_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(verify(&dir.path().join("nope")).is_err());
    }
}
