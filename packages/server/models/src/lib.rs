#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page and API response types for the bike-share visualization server.
//!
//! [`PageContext`] is everything the page template needs; it is kept
//! separate from the template itself so route logic can be tested without
//! rendering HTML.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of trip records loaded.
    pub record_count: usize,
}

/// Error body for failed API requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A link to one visualization page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Request path.
    pub href: String,
    /// Link text.
    pub label: String,
}

/// Values rendered into the visualization page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Page heading and `<title>`.
    pub title: String,
    /// Serialized chart specification, `None` on the index page.
    pub chart_spec: Option<String>,
    /// Whether to list links to every visualization.
    pub show_nav_links: bool,
    /// Links listed when `show_nav_links` is set.
    pub links: Vec<NavLink>,
}

impl PageContext {
    /// The landing page: no chart, links to every visualization.
    #[must_use]
    pub fn index(title: impl Into<String>, links: Vec<NavLink>) -> Self {
        Self {
            title: title.into(),
            chart_spec: None,
            show_nav_links: true,
            links,
        }
    }

    /// A single visualization page.
    #[must_use]
    pub fn chart(title: impl Into<String>, chart_spec: String) -> Self {
        Self {
            title: title.into(),
            chart_spec: Some(chart_spec),
            show_nav_links: false,
            links: Vec::new(),
        }
    }
}
