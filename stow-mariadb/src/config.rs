/// Connection parameters for a MariaDB/MySQL server.
#[derive(Debug, Clone)]
pub struct MariaDbConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: Option<String>,
    pub port: u16,
}

impl MariaDbConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            database: None,
            port: 3306,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
