//! Projects CLI
//!
//! Command-line interface for the Projects API.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use projects_client::ProjectsClient;
use projects_types::{Money, Project, TimeUnit};

#[derive(Parser)]
#[command(name = "projects")]
#[command(author, version, about = "Projects API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Projects API
    #[arg(
        long,
        env = "PROJECTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project operations
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Check API health
    Health,
}

/// Fields of a project as given on the command line.
#[derive(Args)]
struct ProjectArgs {
    /// Project name
    name: String,
    /// Unit price in minor units (cents for USD)
    #[arg(long)]
    price: i64,
    /// ISO 4217 currency code
    #[arg(long, default_value = "USD")]
    currency: String,
    /// Billing unit: Hour, Day, Week or Month
    #[arg(long, default_value = "Hour")]
    unit: String,
}

impl ProjectArgs {
    fn into_project(self) -> Result<Project> {
        let unit: TimeUnit = self.unit.parse()?;
        Ok(Project::new(self.name, Money::new(self.price, self.currency), unit))
    }
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a new project
    Create(ProjectArgs),
    /// Get project details
    Get {
        /// Project ID (24 hex characters)
        id: String,
    },
    /// List one page of projects
    List {
        /// Last project ID of the previous page
        #[arg(long)]
        after: Option<String>,
        /// Page size (server default 20)
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Replace a project
    Update {
        /// Project ID (24 hex characters)
        id: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Delete a project
    Delete {
        /// Project ID (24 hex characters)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ProjectsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Project { action } => match action {
            ProjectCommands::Create(args) => {
                let project = client.create_project(&args.into_project()?).await?;
                println!("{}", serde_json::to_string_pretty(&project)?);
            }
            ProjectCommands::Get { id } => {
                let project = client.get_project(&id).await?;
                println!("{}", serde_json::to_string_pretty(&project)?);
            }
            ProjectCommands::List { after, page_size } => {
                let projects = client.list_projects(after.as_deref(), page_size).await?;
                println!("{}", serde_json::to_string_pretty(&projects)?);
            }
            ProjectCommands::Update { id, project } => {
                let updated = client.update_project(&id, &project.into_project()?).await?;
                println!("{}", serde_json::to_string_pretty(&updated)?);
            }
            ProjectCommands::Delete { id } => {
                client.delete_project(&id).await?;
                println!("✓ Project deleted");
            }
        },
    }

    Ok(())
}
