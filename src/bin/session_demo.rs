//! Walks one session through its lifecycle against the stores named in the
//! settings file, printing what each step observes.
//!
//! $ cargo run --bin session_demo -- --settings=settings/dev.toml

use files_manager::application_port::*;
use files_manager::domain_model::*;
use files_manager::logger::*;
use files_manager::server::Server;
use files_manager::settings::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = Logger::new_bootstrap();
    let settings = parse_settings(cli.settings.as_deref())?;
    logger.reload_from_config(&LogConfig::from(&settings.log))?;

    println!("cache -> {}", settings.cache.url());
    println!("document -> {}", settings.document.dsn());

    let server = Server::try_new(&settings).await?;

    // Give the probes one round before reading liveness.
    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("status -> {:?}", server.status_service.status());
    match server.status_service.stats().await {
        Ok(stats) => println!("stats -> {:?}", stats),
        Err(e) => println!("stats failed -> {}", e),
    }

    let user_id = server
        .auth_gate
        .authenticate(&Credentials {
            email: "bob@dylan.com".to_owned(),
            password: "toto1234!".to_owned(),
        })
        .await?;
    println!("authenticated -> {}", user_id);

    let token = server.session_service.issue_token(&user_id).await?;
    println!("issued -> {}", token);

    let resolved = server.session_service.resolve_token(&token).await?;
    println!("resolved -> {:?}", resolved);

    server.session_service.revoke_token(&token).await?;
    let resolved = server.session_service.resolve_token(&token).await?;
    println!("after revoke -> {:?}", resolved);

    let unknown = SessionToken::from("not-a-session");
    server.session_service.revoke_token(&unknown).await?;
    println!("revoking an unknown token -> ok");

    server.shutdown().await;
    Ok(())
}
