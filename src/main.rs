use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use askdoc::api::{ApiClient, RegisterRequest, UploadFile};
use askdoc::config::Config;
use askdoc::documents::DocumentStore;
use askdoc::qa;
use askdoc::session::SessionManager;
use askdoc::storage::{FileTokenStore, TokenStore};

#[derive(Parser)]
#[command(name = "askdoc", about = "Manage documents and ask questions about them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the access token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (does not sign in)
    Register {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List your documents
    List,
    /// Upload a file as a new document
    Upload {
        file: PathBuf,
        #[arg(long)]
        title: String,
    },
    /// Delete a document
    Rm { id: i64 },
    /// Change a document's title
    Rename { id: i64, title: String },
    /// Ask a question about a document
    Ask { id: i64, question: String },
}

/// Initialize tracing to stderr.
///
/// Quiet by default; `RUST_LOG` opens it up (e.g. `RUST_LOG=askdoc=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load()?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new());
    let client = ApiClient::new(&config.api, tokens);

    // The transport's one outward effect: when a call comes back 401 the
    // stored token is gone and the user has to sign in again.
    client.on_forced_logout(Arc::new(|| {
        eprintln!("Session expired. Run `askdoc login` to sign in again.");
    }));

    match cli.command {
        Command::Login { email, password } => {
            let session = SessionManager::new(client.clone());
            session.login(&email, &password).await?;
            match session.state().user() {
                Some(user) => println!("Signed in as {}", user.email),
                None => println!("Signed in"),
            }
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let session = SessionManager::new(client.clone());
            session
                .register(&RegisterRequest {
                    email: email.clone(),
                    password,
                    first_name,
                    last_name,
                })
                .await?;
            println!("Account created for {}. Sign in with `askdoc login`.", email);
        }
        Command::Logout => {
            let session = SessionManager::new(client.clone());
            session.logout();
            println!("Signed out.");
        }
        Command::Whoami => {
            let user = client.current_user().await?;
            if user.first_name.is_empty() {
                println!("{}", user.email);
            } else {
                println!("{} {} <{}>", user.first_name, user.last_name, user.email);
            }
        }
        Command::List => {
            let store = DocumentStore::new(client.clone());
            store.fetch_all().await?;
            let state = store.state();
            if state.documents.is_empty() {
                println!("No documents uploaded yet.");
            } else {
                for doc in &state.documents {
                    println!("{:>6}  {}  {}", doc.id, doc.created_at.to_rfc3339(), doc.title);
                }
            }
        }
        Command::Upload { file, title } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());

            let store = DocumentStore::new(client.clone());
            let doc = store
                .upload(Some(&UploadFile { file_name, bytes }), &title)
                .await?;
            println!("Uploaded \"{}\" as document {}", doc.title, doc.id);
        }
        Command::Rm { id } => {
            let store = DocumentStore::new(client.clone());
            store.remove(id).await?;
            println!("Deleted document {}", id);
        }
        Command::Rename { id, title } => {
            let store = DocumentStore::new(client.clone());
            let doc = store.update_title(id, &title).await?;
            println!("Document {} is now \"{}\"", doc.id, doc.title);
        }
        Command::Ask { id, question } => {
            let answer = qa::ask(&client, id, &question)
                .await
                .map_err(anyhow::Error::msg)?;
            println!("{}", answer);
        }
    }

    Ok(())
}
