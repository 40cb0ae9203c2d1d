/**
 * Routes Module
 * API route handlers
 */

pub mod admin;
pub mod auth;
pub mod contact;
pub mod content;
pub mod github;
pub mod health;
pub mod images;
pub mod metrics;
pub mod perf;
pub mod sitemap;
pub mod upload;
