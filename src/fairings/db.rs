use crate::store::{MySqlStore, PostStore};
use rocket::fairing::AdHoc;
use std::sync::Arc;
use tracing::{error, info};

/// Managed state giving routes their persistence port.
pub struct DBConnection {
    pub store: Arc<dyn PostStore>,
}

impl DBConnection {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        DBConnection { store }
    }

    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    /// Connects a MySQL pool from `DATABASE_URL` on ignition and manages it.
    pub fn mysql() -> AdHoc {
        AdHoc::try_on_ignite("MySQL pool", |rocket| async move {
            let mysql_url = match std::env::var("DATABASE_URL") {
                Ok(url) => url,
                Err(_) => {
                    error!("DATABASE_URL environment variable not set");
                    return Err(rocket);
                }
            };

            match MySqlStore::from_url(&mysql_url) {
                Ok(store) => {
                    info!("MySQL pool configured");
                    Ok(rocket.manage(DBConnection::new(Arc::new(store))))
                }
                Err(e) => {
                    error!(error = %e, "could not parse DATABASE_URL as a valid MySQL URL");
                    Err(rocket)
                }
            }
        })
    }
}
