//! Command dispatch

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::CatalogStore;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::SAMPLE_CATALOG;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => execute_config(command),
        Some(command) => {
            let container = ServiceContainer::new(load_settings()?);
            execute_catalog(&container, cli.file.as_deref(), command)
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e)),
    }
}

fn load_settings() -> CliResult<Settings> {
    let cwd = std::env::current_dir().ok();
    Ok(Settings::load(cwd.as_deref())?)
}

fn execute_catalog(
    container: &ServiceContainer,
    file: Option<&Path>,
    command: &Commands,
) -> CliResult<()> {
    if let Commands::Demo { seed } = command {
        return demo(container, file, *seed);
    }

    let mut store = container.open_catalog(file)?;
    match command {
        Commands::Show => output::info(&store.read()?),
        Commands::List => list(&store),
        Commands::Add {
            id,
            title,
            author,
            year,
        } => {
            store.append_book(id, title, author, year)?;
            output::success(&format!("added book {id} to {}", store.path().display()));
        }
        Commands::Delete { id } => {
            if store.delete_book(id)? {
                output::success(&format!("deleted book {id} from {}", store.path().display()));
            } else {
                output::warning(&format!("no book with id {id}"));
            }
        }
        Commands::ByYear => print_groups(&store.books_by_year()),
        Commands::Demo { .. } | Commands::Config { .. } | Commands::Completion { .. } => {
            unreachable!("handled before opening the catalog")
        }
    }
    Ok(())
}

fn list(store: &CatalogStore) {
    let books = store.books();
    if books.is_empty() {
        output::warning("catalog has no books");
        return;
    }
    for book in &books {
        output::info(&format!(
            "{}: {} by {} ({})",
            book.id, book.title, book.author, book.year
        ));
    }
    debug!("list: ids {}", books.iter().map(|b| b.id.as_str()).join(", "));
}

fn print_groups(groups: &BTreeMap<String, Vec<String>>) {
    for (year, titles) in groups {
        output::info(&format!("\nYear {year}:"));
        for title in titles {
            output::item(title);
        }
    }
}

/// Show, add book 4, delete book 3, then group by year.
#[instrument(skip(container))]
fn demo(container: &ServiceContainer, file: Option<&Path>, seed: bool) -> CliResult<()> {
    let path: PathBuf = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.catalog_path.clone());

    if seed && !container.fs.exists(&path) {
        container
            .fs
            .write(&path, SAMPLE_CATALOG)
            .map_err(|e| CliError::io(format!("seed {}", path.display()), e))?;
        output::action("Seeded", &path.display());
    }

    let mut store = container.open_catalog(Some(&path))?;

    output::header("\n----INITIAL CONTENT");
    output::info(&store.read()?);

    output::header("\n----ADDING NEW BOOK");
    store.append_book(4, "title_4", "name_4", 2025)?;
    output::info(&store.read()?);

    output::header("\n----DELETING BOOK ID = 3");
    store.delete_book(3)?;
    output::info(&store.read()?);

    output::header("\n----Grouped books by year");
    print_groups(&store.books_by_year());
    Ok(())
}

fn execute_config(command: &ConfigCommands) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| CliError::io("current directory", e))?;
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(&cwd))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}{}", path.display(), exists_marker(&path))),
                None => output::info("global: (no config directory)"),
            }
            let local = local_config_path(&cwd);
            output::info(&format!("local:  {}{}", local.display(), exists_marker(&local)));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("no global config directory on this system".into()))?
            } else {
                local_config_path(&cwd)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

fn exists_marker(path: &Path) -> &'static str {
    if path.exists() {
        " (exists)"
    } else {
        ""
    }
}
