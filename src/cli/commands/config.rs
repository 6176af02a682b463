use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *check {
        let creds = cfg.credentials()?;
        creds.require_for(cfg.storage_backend, cfg.source)?;
        println!(
            "✅ Credentials complete for backend '{:?}' and source '{:?}'",
            cfg.storage_backend, cfg.source
        );
    }

    Ok(())
}
