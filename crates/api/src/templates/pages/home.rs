use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

pub struct RouteInfo {
    pub path: &'static str,
    pub description: &'static str,
}

/// Routes advertised on the index page
pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        path: "/api/v1.0/precipitation",
        description: "Precipitation for the last year of data, one entry per station report",
    },
    RouteInfo {
        path: "/api/v1.0/stations",
        description: "Every weather station id",
    },
    RouteInfo {
        path: "/api/v1.0/tobs",
        description: "Observed temperatures for the most active station over the last year of data",
    },
    RouteInfo {
        path: "/api/v1.0/<start>",
        description: "TMIN, TMAX and TAVG from start (YYYY-MM-DD) to the most recent date",
    },
    RouteInfo {
        path: "/api/v1.0/<start>/<end>",
        description: "TMIN, TMAX and TAVG from start to end inclusive",
    },
];

pub struct HomeData {
    pub most_recent_date: String,
    pub one_year_prior_date: String,
    pub most_active_station: String,
}

pub fn home_page(api_base: &str, data: &HomeData) -> Markup {
    let config = PageConfig {
        title: "SurfsUp - Hawaii Climate API",
        api_base,
    };

    base(&config, content(data))
}

fn content(data: &HomeData) -> Markup {
    html! {
        h2 class="subtitle" { "Simple climate app of Hawaii data" }

        div class="box" {
            h3 class="title is-5" { "Available routes:" }
            table class="table is-fullwidth is-striped" {
                tbody {
                    @for route in ROUTES {
                        tr {
                            td { code { (route.path) } }
                            td { (route.description) }
                        }
                    }
                }
            }
        }

        div class="box" {
            h3 class="title is-5" { "Dataset" }
            p { "Most recent measurement: " strong { (data.most_recent_date) } }
            p { "Last year of data starts: " strong { (data.one_year_prior_date) } }
            p { "Most active station: " strong { (data.most_active_station) } }
        }
    }
}
