//! Landing page listing the available routes.

use axum::response::Html;

/// Routes with a fixed path, shown as links
const LINKED_ROUTES: &[(&str, &str)] = &[
    ("/api/v1.0/precipitation", "Precipitation"),
    ("/api/v1.0/stations", "Stations"),
    ("/api/v1.0/tobs", "Temperatures"),
];

/// Handle GET / requests
pub async fn home_handler() -> Html<String> {
    Html(render_home())
}

fn render_home() -> String {
    let mut page = String::from("Available Routes:<br/>\n");

    for (path, label) in LINKED_ROUTES {
        page.push_str(&format!("<a href='{path}'>{label}</a><br/>\n"));
    }

    page.push_str(
        "/api/v1.0/[start] replace start with the start date, for example 2012-01-01<br/>\n",
    );
    page.push_str(
        "/api/v1.0/[start]/[end] replace start &amp; end with the start date &amp; end date, \
         for example 2012-01-01/2016-01-01<br/>\n",
    );

    page
}
