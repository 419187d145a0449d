//! CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;
use ontoapp_frontend_common::{
    ApiService, AuthContext, FileStorage, MemoryRouter, Navigator, Route, SessionStorage,
};
use ontoapp_http::types::{Taxonomy, TaxonomyDocument};
use ontoapp_http::{ClientBuilder, ClientError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{CliConfig, SESSION_FILE_NAME};

#[derive(Subcommand)]
pub enum Commands {
    /// Create or delete an account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Log in and keep the session for later commands
    Login {
        username: String,

        #[arg(long, env = "ONTOAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Taxonomy operations
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommands,
    },

    /// Inspect or clear the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        username: String,

        #[arg(long, env = "ONTOAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Delete the logged-in account
    Delete {
        /// Current password, required by the server as confirmation
        #[arg(long, env = "ONTOAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum TaxonomyCommands {
    /// Create a taxonomy
    Add {
        domain: String,
        description: String,
    },

    /// Show one taxonomy
    Get { id: i64 },

    /// List the user's taxonomies
    List,

    /// Delete a taxonomy
    Delete {
        id: String,

        #[arg(long, env = "ONTOAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Save an edited taxonomy document read from a JSON file
    Save { file: PathBuf },

    /// Ask the server to generate a taxonomy from a JSON document
    Generate {
        file: PathBuf,

        /// Overrides the document's api_key
        #[arg(long, env = "ONTOAPP_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Write the generated document here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show whether a session is stored
    Show,

    /// Remove the stored tokens without contacting the server
    Clear,
}

/// Everything a command needs: the API service and where navigation ended up
pub struct App {
    api: ApiService,
    router: Arc<MemoryRouter>,
    session_file: PathBuf,
}

impl App {
    pub fn new(config: &CliConfig, data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let session_file = data_dir.join(SESSION_FILE_NAME);
        let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(&session_file));
        let router = Arc::new(MemoryRouter::starting_at(Route::HomeUser));
        let auth = Arc::new(AuthContext::new(storage, router.clone()));

        let mut builder = ClientBuilder::new().base_url(config.base_url.as_str());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let client = builder.build()?;

        debug!(base_url = %config.base_url, session = %session_file.display(), "CLI context ready");

        Ok(Self {
            api: ApiService::new(client, auth),
            router,
            session_file,
        })
    }

    pub fn api(&self) -> &ApiService {
        &self.api
    }

    /// Path the client was last sent to
    pub fn current_route(&self) -> String {
        self.router.current()
    }

    fn navigate(&self, route: Route) {
        self.router.push(&route.path());
    }
}

impl Commands {
    pub async fn execute(self, app: &App) -> Result<()> {
        let result = match self {
            Commands::Account { command } => command.execute(app).await,
            Commands::Login { username, password } => {
                app.api.login_user(&username, &password).await?;
                app.navigate(Route::HomeUser);
                println!("Logged in as {username}");
                Ok(())
            }
            Commands::Logout => {
                app.api.logout_user().await?;
                app.navigate(Route::Login);
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => {
                let user = app.api.get_user().await?;
                println!("Username:   {}", user.username);
                println!("Created:    {}", user.created_at);
                println!("Last login: {}", user.last_login);
                Ok(())
            }
            Commands::Taxonomy { command } => command.execute(app).await,
            Commands::Session { command } => command.execute(app),
        };

        debug!(route = %app.current_route(), "Command finished");
        result
    }
}

impl AccountCommands {
    pub async fn execute(self, app: &App) -> Result<()> {
        match self {
            AccountCommands::Create { username, password } => {
                let message = app.api.add_user(&username, &password).await?;
                app.navigate(Route::Login);
                println!("{message}");
            }
            AccountCommands::Delete { password } => {
                let message = app.api.delete_user(&password).await?;
                app.navigate(Route::Login);
                println!("{message}");
            }
        }
        Ok(())
    }
}

impl TaxonomyCommands {
    pub async fn execute(self, app: &App) -> Result<()> {
        match self {
            TaxonomyCommands::Add {
                domain,
                description,
            } => {
                let message = app.api.add_taxonomy(&domain, &description).await?;
                app.navigate(Route::HomeUser);
                println!("{message}");
            }
            TaxonomyCommands::Get { id } => {
                let taxonomy = app.api.get_taxonomy(id).await?;
                app.navigate(Route::EditTaxonomy(id.to_string()));
                println!("{}", serde_json::to_string_pretty(&taxonomy)?);
            }
            TaxonomyCommands::List => {
                let taxonomies = app.api.list_taxonomies().await?;
                if taxonomies.is_empty() {
                    println!("No taxonomies");
                }
                for taxonomy in taxonomies.values() {
                    println!("{}", summary_line(taxonomy));
                }
            }
            TaxonomyCommands::Delete { id, password } => {
                app.navigate(Route::DeleteTaxonomy(id.clone()));
                let message = app.api.delete_taxonomy(&id, &password).await?;
                app.navigate(Route::HomeUser);
                println!("{message}");
            }
            TaxonomyCommands::Save { file } => {
                let document = load_document(&file)?;
                let message = app.api.save_taxonomy(&document).await?;
                println!("{message}");
            }
            TaxonomyCommands::Generate {
                file,
                api_key,
                output,
            } => {
                let mut document = load_document(&file)?;
                if let Some(api_key) = api_key {
                    document.api_key = api_key;
                }
                let generated = app.api.generate_taxonomy(&document).await?;
                let rendered = serde_json::to_string_pretty(&generated)?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, rendered)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Generated taxonomy written to {}", path.display());
                    }
                    None => println!("{rendered}"),
                }
            }
        }
        Ok(())
    }
}

impl SessionCommands {
    pub fn execute(self, app: &App) -> Result<()> {
        let auth = app.api.auth();
        match self {
            SessionCommands::Show => {
                auth.reload_tokens();
                println!("Session file: {}", app.session_file.display());
                if auth.tokens().is_authenticated() {
                    println!("Logged in: yes");
                } else {
                    println!("Logged in: no");
                }
            }
            SessionCommands::Clear => {
                auth.drop_tokens();
                info!("Stored session cleared");
                println!("Session cleared");
            }
        }
        Ok(())
    }
}

/// Tell the user what happened when the session could not be renewed
pub fn report_failure(app: &App, error: &anyhow::Error) {
    let expired = matches!(
        error.downcast_ref::<ClientError>(),
        Some(ClientError::SessionExpired)
    );
    let alert = app.api().auth().alerts().snapshot();

    if expired && !alert.is_empty() {
        eprintln!("[{}] {}", alert.status_type, alert.status_message);
        eprintln!("Redirected to {}; run `ontoapp login` to continue", app.current_route());
    }
}

fn load_document(path: &Path) -> Result<TaxonomyDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a taxonomy document", path.display()))
}

fn summary_line(taxonomy: &Taxonomy) -> String {
    let updated = taxonomy.last_update.as_deref().unwrap_or("-");
    format!(
        "{:>5}  {}  {}  (updated {updated})",
        taxonomy.id, taxonomy.domain, taxonomy.description
    )
}
