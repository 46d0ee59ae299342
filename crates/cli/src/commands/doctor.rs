//! `persona doctor`: Check configuration, credentials and loaded context.

use std::path::Path;

use persona_config::AppConfig;
use persona_core::identity::Identity;

pub async fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Persona Doctor");
    println!("==============\n");

    let mut issues = 0;

    if config_path.exists() {
        println!("  [ok]   Config file found: {}", config_path.display());
    } else {
        println!("  [info] No config file at {}, using defaults", config_path.display());
    }

    let config = match AppConfig::load(config_path) {
        Ok(config) => {
            println!("  [ok]   Configuration valid");
            config
        }
        Err(e) => {
            println!("  [fail] Configuration invalid: {e}");
            println!("\n  1 issue found. See above for details.");
            return Ok(());
        }
    };

    match config.require_api_key() {
        Ok(_) => println!("  [ok]   API key configured"),
        Err(e) => {
            println!("  [fail] {e}");
            issues += 1;
        }
    }

    println!("  [info] Provider: {} ({})", config.provider_name(), config.base_url());
    println!("  [info] Model: {}", config.model);

    if config.has_api_key() {
        match persona_providers::build_from_config(&config) {
            Ok(provider) => match provider.health_check().await {
                Ok(true) => println!("  [ok]   Completion API reachable"),
                Ok(false) => {
                    println!("  [fail] Completion API rejected the key or is unavailable");
                    issues += 1;
                }
                Err(e) => {
                    println!("  [fail] Completion API unreachable: {e}");
                    issues += 1;
                }
            },
            Err(e) => {
                println!("  [fail] {e}");
                issues += 1;
            }
        }
    }

    if config.notify.is_configured() {
        println!("  [ok]   Pushover notifications enabled");
    } else {
        println!("  [warn] Pushover credentials missing, notifications disabled");
        issues += 1;
    }

    let identity = Identity::load(&config.identity_source());
    if !identity.resume_loaded {
        println!("  [warn] Resume not loaded from {}", config.identity.resume_path.display());
        issues += 1;
    }
    if !identity.summary_loaded {
        println!("  [warn] Summary not loaded from {}", config.identity.summary_path.display());
        issues += 1;
    }

    println!();
    for line in identity.diagnostic_summary().lines() {
        println!("  {line}");
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
