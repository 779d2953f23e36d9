//! `stratus doctor` — Diagnose configuration.

use stratus_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Stratus Doctor — Configuration Check");
    println!("=======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — using defaults (run `stratus onboard` to create one)");
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            println!("     Provider: {}", config.default_provider);
            println!("     Model:    {}", config.default_model);
            println!("     Weather:  {}", config.weather.base_url);

            match config.require_api_key() {
                Ok(_) => println!("  ✅ API key configured"),
                Err(e) => {
                    println!("  ❌ {e} — set GEMINI_API_KEY or add api_key to config.toml");
                    issues += 1;
                }
            }

            if let Err(e) = stratus_providers::build_from_config(&config) {
                println!("  ❌ Provider setup failed: {e}");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
