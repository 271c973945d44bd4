use clap::Parser;
use shoppies::core::ConfigProvider;
use shoppies::utils::logger;
use shoppies::{
    AppConfig, CliConfig, Command, LocalStorage, NominationApp, OmdbClient, ShoppiesError,
    SystemClipboard,
};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Command: {:?}", cli.command);

    if let Err(e) = run(cli.command.unwrap_or(Command::List), &config).await {
        exit_with(e);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> shoppies::Result<()> {
    let catalog = OmdbClient::from_config(config);
    let storage = LocalStorage::new(config.storage_path().to_string());
    let page_url = match &command {
        Command::Open { url } => Some(url.as_str()),
        _ => None,
    };
    let mut app = NominationApp::start(catalog, storage, config.share_origin(), page_url).await;

    match command {
        Command::Search { query } => {
            // A transport failure still renders the cleared results panel.
            if let Err(e) = app.handle_search_change(&query).await {
                print!("{}", app.view(Instant::now()));
                return Err(e);
            }
        }
        Command::Nominate { id } => {
            let list = app.nominate_by_lookup(&id).await?;
            println!("✅ Nominated {} ({} left)", id, list.remaining());
        }
        Command::Remove { id } => {
            app.remove(&id).await;
        }
        Command::List => {}
        Command::Share { copy } => {
            if !app.open_share_modal() {
                eprintln!(
                    "Nominate {} more movie(s) before sharing",
                    app.nominations().remaining()
                );
            } else if copy {
                app.copy_share_url(&mut SystemClipboard, Instant::now())?;
            }
        }
        Command::Open { .. } => {
            if app.shared_movies().is_empty() {
                eprintln!("The link did not contain any movies we could find");
            }
        }
    }

    print!("{}", app.view(Instant::now()));
    Ok(())
}

fn exit_with(e: ShoppiesError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
