//! Command-line entry point.
//!
//! A thin shim over the library: parse arguments, load configuration, install
//! tracing, run one store operation, print the resulting state.
//!
//! # Commands
//!
//! - `register --email --name --password --confirm-password`
//! - `login --email --password` (prints the token)
//! - `list` (refetches the catalog and leaves search mode)
//! - `show ID`
//! - `add --title --year --format --actors "A, B"`
//! - `delete ID`
//! - `import FILE` (refetches the catalog on success)
//! - `search --title QUERY` or `search --actor QUERY`
//!
//! Catalog commands need a token from `--token` or `MOVIESHELF_TOKEN`.

#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use movieshelf::ui::{render_catalog, render_detail, CatalogView, MovieDetailView};
use movieshelf::{
    initialize, observability, Client, Config, Credentials, ImportFile, MovieDraft, MovieId, Registration,
    SearchField, ShelfError,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// movieshelf: manage a movie catalog from the terminal.
#[derive(Parser)]
#[command(name = "movieshelf", version)]
struct Cli {
    /// Configuration file. Default: ~/.config/movieshelf/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root, e.g. http://localhost:8000/api/v1
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session token returned by `login`.
    #[arg(long, global = true, env = "MOVIESHELF_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log to stderr as well as to the trace file.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Open a session and print its token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// List the whole catalog.
    List,

    /// Show one movie.
    Show { id: MovieId },

    /// Add a movie.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        /// VHS, DVD or Blu-ray
        #[arg(long)]
        format: String,
        /// Comma-separated actor names
        #[arg(long)]
        actors: String,
    },

    /// Delete a movie.
    Delete { id: MovieId },

    /// Import movies from a text file.
    Import { file: PathBuf },

    /// Search by title or actor.
    Search(SearchArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SearchArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    actor: Option<String>,
}

impl SearchArgs {
    fn into_query(self) -> (SearchField, String) {
        match (self.title, self.actor) {
            (Some(title), _) => (SearchField::Title, title),
            (None, actor) => (SearchField::Actor, actor.unwrap_or_default()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ShelfError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    config.log_to_stderr |= cli.verbose;

    observability::init_tracing(&config);

    let client = initialize(&config)?;
    if let Some(token) = cli.token {
        client.auth.restore(token);
    }

    execute(&client, cli.command).await
}

async fn execute(client: &Client, command: Command) -> Result<(), ShelfError> {
    let token = client.token();

    match command {
        Command::Register {
            email,
            name,
            password,
            confirm_password,
        } => {
            let registration = Registration {
                email,
                name,
                password,
                confirm_password,
            };
            if !registration.passwords_match() {
                return Err(ShelfError::Input("Passwords do not match".to_string()));
            }
            client.auth.register(registration).await.map_err(ShelfError::Remote)?;
            println!("Account created. You can now log in.");
        }
        Command::Login { email, password } => {
            let token = client
                .auth
                .login(Credentials::new(email, password))
                .await
                .map_err(ShelfError::Remote)?;
            println!("{token}");
        }
        Command::List => {
            client.catalog.refresh(&token).await.map_err(ShelfError::Remote)?;
            print!("{}", render_catalog(&CatalogView::from_state(&client.catalog.snapshot())));
        }
        Command::Show { id } => {
            let movie = client.catalog.fetch_by_id(&token, id).await.map_err(ShelfError::Remote)?;
            match movie {
                Some(movie) => print!("{}", render_detail(&MovieDetailView::from_movie(&movie))),
                None => println!("Movie {id} could not be read."),
            }
        }
        Command::Add {
            title,
            year,
            format,
            actors,
        } => {
            let draft = MovieDraft::from_form(&title, &year, &format, &actors)?;
            match client.catalog.create(&token, draft).await.map_err(ShelfError::Remote)? {
                Some(movie) => println!("Added {} ({}) as #{}", movie.title, movie.year, movie.id),
                None => println!("Movie submitted; the server response was incomplete."),
            }
        }
        Command::Delete { id } => {
            client.catalog.remove(&token, id).await.map_err(ShelfError::Remote)?;
            println!("Deleted movie {id}");
        }
        Command::Import { file } => {
            let bytes = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .map_or_else(|| "movies.txt".to_string(), |name| name.to_string_lossy().into_owned());

            let imported = client
                .catalog
                .bulk_import(&token, ImportFile::new(file_name, bytes))
                .await
                .map_err(ShelfError::Remote)?;
            println!("Imported {} movies.", imported.len());

            client.catalog.fetch_all(&token).await.map_err(ShelfError::Remote)?;
            print!("{}", render_catalog(&CatalogView::from_state(&client.catalog.snapshot())));
        }
        Command::Search(args) => {
            let (field, query) = args.into_query();
            client.catalog.search(&token, field, &query).await.map_err(ShelfError::Remote)?;
            print!("{}", render_catalog(&CatalogView::from_state(&client.catalog.snapshot())));
        }
    }
    Ok(())
}
