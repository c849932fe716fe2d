use maud::{html, Markup, DOCTYPE};

use crate::ReportingWindow;

pub fn home_page(api_base: &str, most_active_station: &str, window: &ReportingWindow) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Climate API for Honolulu, HI" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@1.0.4/css/bulma.min.css";
            }
            body {
                section class="section" {
                    div class="container" {
                        nav class="level" {
                            div class="level-left" {
                                h1 class="title level-item" { "Climate API for Honolulu, HI" }
                            }
                            div class="level-right" {
                                p class="level-item" {
                                    a href={ (api_base) "/docs" } class="button is-link is-light is-small" {
                                        "API Docs"
                                    }
                                }
                            }
                        }

                        h3 class="subtitle" {
                            "Using this API you can retrieve the following information:"
                        }
                        p class="block" {
                            "Reporting window: " (window.date_start) " to " (window.date_end)
                            " (pinned to the most recent date in the dataset at startup)"
                        }

                        div class="content" {
                            ul {
                                li {
                                    "Last 12 months of precipitation observations from all stations" br;
                                    a href={ (api_base) "/api/v1.0/precipitation" } { "/api/v1.0/precipitation" }
                                }
                                li {
                                    "Station information for all stations" br;
                                    a href={ (api_base) "/api/v1.0/stations" } { "/api/v1.0/stations" }
                                }
                                li {
                                    "Last 12 months of temperature observations for the most active station ("
                                    (most_active_station) ")" br;
                                    a href={ (api_base) "/api/v1.0/tobs" } { "/api/v1.0/tobs" }
                                }
                                li {
                                    "Minimum, average, and maximum temperature beginning from a start date" br;
                                    code { "/api/v1.0/{start}" }
                                }
                                li {
                                    "Minimum, average, and maximum temperature between a start date and an end date" br;
                                    code { "/api/v1.0/{start}/{end}" }
                                }
                            }
                            p {
                                b { "Note: " }
                                "start and end dates use the format YYYY-MM-DD. "
                                "Dated links must be edited manually to retrieve data."
                            }
                        }
                    }
                }
            }
        }
    }
}
