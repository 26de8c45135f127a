use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Composes the shared config components for the toy server
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", None::<&str>),
                ("MONGODB_COLLECTION", None::<&str>),
                ("PORT", None::<&str>),
                ("APP_ENV", None::<&str>),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.mongodb.database(), "toyLand");
                assert_eq!(config.mongodb.collection(), "toys");
                assert_eq!(config.app.name, "toy_api");
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [("MONGODB_URL", None::<&str>), ("MONGO_URL", None::<&str>)],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
