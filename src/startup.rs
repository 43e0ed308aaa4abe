use crate::api_client::ApiClient;
use crate::configuration::Settings;
use crate::domain::City;
use crate::routes::{confirm, health_check, home, not_found, subscribe, unsubscribe};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use std::net::TcpListener;
use tera::Tera;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

/// City whose weather the main page shows before anything is searched.
pub struct DefaultCity(pub City);

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let default_city = config
            .app
            .default_city()
            .map_err(anyhow::Error::msg)
            .context("Invalid default city.")?;
        let templates = Tera::new(&config.app.templates)
            .with_context(|| format!("Failed to load templates from {}", config.app.templates))?;
        let api_client = config.api.client()?;

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, api_client, templates, default_city)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    api_client: ApiClient,
    templates: Tera,
    default_city: City,
) -> Result<Server, anyhow::Error> {
    let api_client = web::Data::new(api_client);
    let templates = web::Data::new(templates);
    let default_city = web::Data::new(DefaultCity(default_city));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/", web::get().to(home))
            .route("/subscribe", web::post().to(subscribe))
            .route("/confirm/{token}", web::get().to(confirm))
            .route("/unsubscribe/{token}", web::get().to(unsubscribe))
            .default_service(web::to(not_found))
            .app_data(api_client.clone())
            .app_data(templates.clone())
            .app_data(default_city.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
