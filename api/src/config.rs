use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Pack/document retention window in years (EUDR audit requirement)
    pub retention_years: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            retention_years: env::var("RETENTION_YEARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}
