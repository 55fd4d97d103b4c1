use crate::ServerConfig;
use crate::interfaces::web::server::create_server;

pub struct RunServerUseCase {
    config: ServerConfig,
}

impl RunServerUseCase {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        // Delegate to the web server module
        create_server(self.config.clone()).await
    }
}
