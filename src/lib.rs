pub mod api_client;
pub mod configuration;
pub mod domain;
pub mod e2e;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod test_ids;
