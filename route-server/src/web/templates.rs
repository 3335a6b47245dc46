//! Askama templates for the web frontend.

use askama::Template;

use crate::routing::RouteResult;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// City names offered in the form
    pub cities: Vec<String>,
    pub default_speed: u32,
    pub min_speed: u32,
    pub max_speed: u32,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub city_count: usize,
    pub edge_count: usize,
    pub surcharge_km: f64,
    pub longitude_band: i64,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route result fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub origin: String,
    pub destination: String,
    /// Cities passed through, endpoints excluded
    pub stops: Vec<String>,
    pub stop_count: usize,
    /// Distance formatted with 2 decimals
    pub distance: String,
    pub time: String,
    pub speed: u32,
}

impl RouteView {
    /// Create from a route result.
    pub fn from_result(result: &RouteResult) -> Self {
        let path = &result.path;
        let origin = path.first().cloned().unwrap_or_default();
        let stops = if path.len() > 2 {
            path[1..path.len() - 1].to_vec()
        } else {
            Vec::new()
        };

        Self {
            origin,
            destination: result.destination.clone(),
            stops,
            stop_count: result.stopovers(),
            distance: format!("{:.2}", result.distance_km),
            time: result.travel_time.to_string(),
            speed: result.avg_speed.kmh(),
        }
    }

    /// Whether the route needs no intermediate city.
    pub fn is_direct(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether origin and destination are the same city.
    pub fn is_trivial(&self) -> bool {
        self.origin == self.destination
    }
}
