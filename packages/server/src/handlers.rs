//! HTTP handler functions for the visualization pages and API.

use actix_web::{HttpResponse, web};
use bike_viz_chart::{ChartError, ChartKind};
use bike_viz_server_models::{ApiError, ApiHealth, NavLink, PageContext};
use bike_viz_trip_models::TripTable;

use crate::{AppState, ServerError, page};

/// Heading of the landing page.
pub const INDEX_TITLE: &str = "Shared Bicycle Data Visualizations";

/// `GET /`
///
/// Landing page linking to every visualization.
pub async fn index() -> HttpResponse {
    let links = ChartKind::ALL
        .iter()
        .map(|kind| NavLink {
            href: kind.path(),
            label: kind.label().to_string(),
        })
        .collect();

    match page::render(&PageContext::index(INDEX_TITLE, links)) {
        Ok(html) => html_ok(html),
        Err(e) => {
            log::error!("Failed to render index page: {e}");
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}

/// `GET /viz/{chart}`
///
/// Builds the chart over the shared dataset and renders it into the page.
pub async fn chart_page(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Ok(kind) = path.parse::<ChartKind>() else {
        return HttpResponse::NotFound().body(format!("Unknown visualization '{path}'"));
    };

    match render_chart_page(&state.table, kind) {
        Ok(html) => html_ok(html),
        Err(e) => {
            log::error!("Failed to render '{kind}' page: {e}");
            HttpResponse::InternalServerError().body("Failed to build visualization")
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        record_count: state.table.len(),
    })
}

/// `GET /api/charts/{chart}`
///
/// Returns the chart specification as JSON.
pub async fn chart_spec(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Ok(kind) = path.parse::<ChartKind>() else {
        return HttpResponse::NotFound().json(ApiError::new(format!("Unknown chart '{path}'")));
    };

    match kind.build(&state.table) {
        Ok(spec) => HttpResponse::Ok().json(spec),
        Err(e) => {
            log::error!("Failed to build '{kind}' spec: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(chart_error_message(&e)))
        }
    }
}

fn render_chart_page(table: &TripTable, kind: ChartKind) -> Result<String, ServerError> {
    let spec = kind.build(table)?.to_json()?;
    Ok(page::render(&PageContext::chart(kind.title(), spec))?)
}

fn chart_error_message(e: &ChartError) -> String {
    match e {
        ChartError::SchemaMismatch { .. } => e.to_string(),
        ChartError::Json(_) => "Failed to build chart".to_string(),
    }
}

fn html_ok(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use bike_viz_server_models::ApiHealth;

    use crate::{AppState, configure};

    const TRIPS: &str = "\
City,Month,Country,Num_Trips,Avg_Temperature_C,Avg_Duration_Minutes,Latitude,Longitude
Paris,Jan,France,1200,4.5,14.2,48.8566,2.3522
London,Jan,UK,700,5.2,17.1,51.5074,-0.1278
";

    const TRIPS_WITHOUT_COORDINATES: &str = "\
City,Month,Country,Num_Trips,Avg_Temperature_C,Avg_Duration_Minutes
Paris,Jan,France,1200,4.5,14.2
";

    fn state(csv: &str) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            bike_viz_dataset::load_from_reader(csv.as_bytes()).unwrap(),
        ))
    }

    async fn get(csv: &str, uri: &str) -> (StatusCode, String) {
        let app = test::init_service(App::new().app_data(state(csv)).configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn index_links_every_chart_without_spec() {
        let (status, html) = get(TRIPS, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(super::INDEX_TITLE));
        for slug in [
            "scatter-bar",
            "interactive-legend",
            "duration-explorer",
            "map-histogram",
        ] {
            assert!(html.contains(&format!("{slug}\">")), "missing link to {slug}");
        }
        assert!(!html.contains("id=\"chart-spec\""));
    }

    #[actix_web::test]
    async fn scatter_bar_page_embeds_spec() {
        let (status, html) = get(TRIPS, "/viz/scatter-bar").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("id=\"chart-spec\""));
        assert!(html.contains("temperature_brush"));
        assert!(html.contains("Linked Scatter &amp; Bar"));
        assert!(!html.contains("<nav>"));
    }

    #[actix_web::test]
    async fn every_chart_page_renders() {
        for slug in [
            "interactive-legend",
            "duration-explorer",
            "map-histogram",
        ] {
            let (status, html) = get(TRIPS, &format!("/viz/{slug}")).await;
            assert_eq!(status, StatusCode::OK, "{slug}");
            assert!(html.contains("vega-lite/v5.json"), "{slug}");
        }
    }

    #[actix_web::test]
    async fn unknown_chart_is_not_found() {
        let (status, _) = get(TRIPS, "/viz/pie").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn schema_mismatch_fails_the_request() {
        let (status, html) = get(TRIPS_WITHOUT_COORDINATES, "/viz/map-histogram").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!html.contains("chart-spec"));

        let (status, _) = get(TRIPS_WITHOUT_COORDINATES, "/viz/scatter-bar").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn health_reports_record_count() {
        let app = test::init_service(App::new().app_data(state(TRIPS)).configure(configure)).await;
        let health: ApiHealth = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;
        assert!(health.healthy);
        assert_eq!(health.record_count, 2);
    }

    #[actix_web::test]
    async fn api_returns_raw_spec() {
        let (status, body) = get(TRIPS, "/api/charts/interactive-legend").await;
        assert_eq!(status, StatusCode::OK);
        let spec: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(spec["hconcat"].as_array().unwrap().len(), 2);
        assert_eq!(spec["datasets"]["trips"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn api_reports_schema_mismatch() {
        let (status, body) = get(TRIPS_WITHOUT_COORDINATES, "/api/charts/map-histogram").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("Latitude"));
    }
}
