pub mod config;
pub mod db;
pub mod routes;
pub mod startup;
pub mod templates;
pub mod utils;
pub mod window;

pub use config::{find_config_file, load_config, ConfigSource, APP_NAME, DEFAULT_PORT};
pub use db::{
    climate_data, ClimateAccess, ClimateData, Database, Observation, ObservationField,
    TemperatureStats,
};
pub use routes::*;
pub use startup::{app, build_app_state, AppState};
pub use utils::{get_config_info, get_log_level, setup_logger, Cli};
pub use window::{parse_date, ReportingWindow};
