//! `persona serve`: Start the web chat gateway.

use std::path::Path;

pub async fn run(config_path: &Path, port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    config.require_api_key()?;

    println!("Persona Gateway");
    println!("   Persona:   {}", config.identity.name);
    println!("   Model:     {} via {}", config.model, config.provider_name());
    println!("   Listening: http://{}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Pushover:  {}",
        if config.notify.is_configured() { "enabled" } else { "disabled" }
    );

    persona_gateway::start(config).await?;

    Ok(())
}
