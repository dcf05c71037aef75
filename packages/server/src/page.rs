//! HTML rendering of [`PageContext`].

use askama::Template;
use bike_viz_server_models::{NavLink, PageContext};

#[derive(Template)]
#[template(path = "visualization_page.html")]
struct VisualizationPage<'a> {
    title: &'a str,
    chart_spec: Option<&'a str>,
    show_nav_links: bool,
    links: &'a [NavLink],
}

impl VisualizationPage<'_> {
    /// The spec JSON made safe for a `<script>` body.
    ///
    /// `</` becomes `<\/`, which is the same string to a JSON parser but can
    /// no longer close the element.
    fn embedded_spec(&self) -> String {
        self.chart_spec
            .map(|spec| spec.replace("</", "<\\/"))
            .unwrap_or_default()
    }
}

/// Renders the visualization page for `page`.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render(page: &PageContext) -> Result<String, askama::Error> {
    VisualizationPage {
        title: &page.title,
        chart_spec: page.chart_spec.as_deref(),
        show_nav_links: page.show_nav_links,
        links: &page.links,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_links_without_chart() {
        let html = render(&PageContext::index(
            "Home & Away",
            vec![NavLink {
                href: "/viz/scatter-bar".to_string(),
                label: "Scatter".to_string(),
            }],
        ))
        .unwrap();

        assert!(html.contains("<title>Home &amp; Away</title>"));
        assert!(html.contains(r#"scatter-bar">Scatter</a>"#));
        assert!(!html.contains("chart-spec"));
        assert!(!html.contains("vega-embed"));
    }

    #[test]
    fn chart_page_embeds_spec_verbatim() {
        let html = render(&PageContext::chart("Chart", r#"{"mark":"bar"}"#.to_string())).unwrap();
        assert!(html.contains(r#"<script type="application/json" id="chart-spec">{"mark":"bar"}</script>"#));
        assert!(html.contains("vega-embed"));
        assert!(html.contains(r#"<a href="/">"#));
    }

    #[test]
    fn embedded_spec_cannot_close_script() {
        let spec = r#"{"title":"</script><b>"}"#;
        let html = render(&PageContext::chart("Chart", spec.to_string())).unwrap();
        assert!(html.contains(r#"{"title":"<\/script><b>"}"#));
        assert_eq!(html.matches("</script>").count(), 5);
    }
}
