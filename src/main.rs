use actix_web::web;
use dotenvy::dotenv;
use salon_pos::config::Config;
use salon_pos::{build_server, build_state};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let state = build_state(&config).map_err(std::io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(web::Data::new(state), &config.host, config.port)?.await
}
