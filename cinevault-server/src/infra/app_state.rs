use std::{fmt, sync::Arc};

use cinevault_config::Config;
use cinevault_core::application::unit_of_work::AppUnitOfWork;
use cinevault_core::crypto::PasswordCrypto;
use cinevault_core::database::PostgresDatabase;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub postgres: Arc<PostgresDatabase>,
    pub config: Arc<Config>,
    pub password_crypto: Arc<PasswordCrypto>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("unit_of_work", &self.unit_of_work)
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        unit_of_work: Arc<AppUnitOfWork>,
        postgres: Arc<PostgresDatabase>,
        config: Arc<Config>,
        password_crypto: Arc<PasswordCrypto>,
    ) -> Self {
        Self {
            unit_of_work,
            postgres,
            config,
            password_crypto,
        }
    }

    /// Repositories backed by `postgres`.
    pub fn from_postgres(
        postgres: Arc<PostgresDatabase>,
        config: Arc<Config>,
        password_crypto: Arc<PasswordCrypto>,
    ) -> Self {
        let unit_of_work = Arc::new(AppUnitOfWork::from_postgres(&postgres));
        Self::new(unit_of_work, postgres, config, password_crypto)
    }

    pub fn unit_of_work(&self) -> &AppUnitOfWork {
        &self.unit_of_work
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
