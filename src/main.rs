use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use storyset::application::init::init;
use storyset::application::{Collector, ConfigService, ExportService, Notifier};
use storyset::cli::{
    format_entry_list, format_live_header, format_notification, prompt, Cli, Commands,
};
use storyset::domain::{EntryId, ExportFormat, Grade};
use storyset::error::{Result, StoryError};
use storyset::infrastructure::Workspace;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_collector() -> Result<Collector> {
    let workspace = Workspace::discover()?;
    Collector::open(workspace).await
}

fn print_notification(notifier: &Notifier) {
    if let Some(notification) = notifier.current() {
        if notification.is_error() {
            eprintln!("{}", format_notification(&notification));
        } else {
            println!("{}", format_notification(&notification));
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path, app_id } => {
            let (workspace, config) = init(&path, app_id)?;
            println!(
                "Initialized storyset workspace at {}",
                workspace.root().display()
            );
            println!("Collection: {}", config.collection);
            Ok(())
        }
        Commands::Add {
            image,
            sentence,
            grade,
        } => {
            let collector = open_collector().await?;
            let mut form = collector.new_form();
            if let Some(grade) = grade {
                form.set_grade(Grade::from_str(&grade).map_err(StoryError::Config)?);
            }
            form.set_sentence(sentence);

            let service = collector.submit_service();
            let result = match service.attach_image(&mut form, &image).await {
                Ok(()) => service.execute(&mut form).await,
                Err(e) => Err(e),
            };

            print_notification(collector.notifier());
            collector.close().await?;

            let id = result?;
            println!("{}", id);
            Ok(())
        }
        Commands::List { limit } => {
            let collector = open_collector().await?;
            let mut list = collector.follow();
            let state = list.ready().await;
            list.unsubscribe();
            collector.close().await?;

            if let Some(error) = &state.error {
                eprintln!("{}", format_live_header(&state));
                return Err(StoryError::Store(error.clone()));
            }
            print!("{}", format_entry_list(&state.entries, limit));
            if state.entries.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let collector = open_collector().await?;
            let confirmed = yes || prompt::confirm("Delete this entry?").await?;

            let result = collector
                .delete_service()
                .execute(&EntryId::new(id), confirmed)
                .await;

            print_notification(collector.notifier());
            collector.close().await?;

            if !result? {
                println!("Cancelled.");
            }
            Ok(())
        }
        Commands::Export { format, out } => {
            let format = ExportFormat::from_str(&format)?;
            let collector = open_collector().await?;

            let mut list = collector.follow();
            let state = list.ready().await;
            list.unsubscribe();

            let out_dir: PathBuf = out.unwrap_or_else(|| collector.workspace().root().to_path_buf());
            collector.close().await?;

            if let Some(error) = state.error {
                return Err(StoryError::Store(error));
            }

            let path = ExportService::execute(&state.entries, format, &out_dir).await?;
            println!(
                "Exported {} entries to {} ({})",
                state.entries.len(),
                path.display(),
                format.mime_type()
            );
            Ok(())
        }
        Commands::Watch { count } => {
            let collector = open_collector().await?;
            let mut list = collector.follow();
            let mut seen = 0usize;

            loop {
                if count.is_some_and(|limit| seen >= limit) {
                    break;
                }
                tokio::select! {
                    update = list.changed() => match update {
                        Some(state) => {
                            println!("{}", format_live_header(&state));
                            print!("{}", format_entry_list(&state.entries, None));
                            if state.entries.is_empty() {
                                println!();
                            }
                            seen += 1;
                        }
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }

            list.unsubscribe();
            collector.close().await
        }
        Commands::Config { key, value, list } => {
            let workspace = Workspace::discover()?;
            let service = ConfigService::new(workspace);

            if list {
                for (key, value) in service.list()? {
                    println!("{} = {}", key, value);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", service.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: storyset config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: collection, app_id, auth_token, backend, default_grade, \
                    max_image_bytes, notification_secs, poll_interval_ms, created"
                );
                Ok(())
            }
        }
    }
}
