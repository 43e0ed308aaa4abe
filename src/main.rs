use weather_web::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("weather_web".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;

    let app = Application::build(config).await?;
    tracing::info!(port = app.get_port(), "Weather web application started");

    if let Err(e) = app.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Weather web application failed"
        );
        return Err(e.into());
    }

    tracing::info!("Weather web application has exited");
    Ok(())
}
