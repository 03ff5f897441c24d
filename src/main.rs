use clap::Parser;
use form_draft::cli::commands::{cmd_clear, cmd_list, cmd_restore, cmd_save, cmd_show};
use form_draft::cli::config::{Cli, Commands, load_config, log_level, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(cli.verbose)))
        .init();

    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match &cli.command {
        Commands::Save { path, form } => {
            cmd_save(&settings, path, form)?;
        }
        Commands::Restore { path, form, output } => {
            cmd_restore(&settings, path, form, output.as_deref())?;
        }
        Commands::Clear { path, form_id } => {
            cmd_clear(&settings, path, form_id)?;
        }
        Commands::Show { path, form_id } => {
            if !cmd_show(&settings, path, form_id)? {
                std::process::exit(1);
            }
        }
        Commands::List => {
            cmd_list(&settings)?;
        }
    }

    Ok(())
}
