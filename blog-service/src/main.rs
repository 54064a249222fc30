use blog_service::config::BlogConfig;
use blog_service::startup::Application;
use service_core::observability::init_tracing;

const SERVICE_NAME: &str = "blog-service";

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = match BlogConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(SERVICE_NAME, "info");
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    init_tracing(SERVICE_NAME, &config.common.log_level);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to initialize blog service: {}", e);
        e
    })?;

    app.run_until_stopped().await
}
