use anyhow::Context;
use clap::{Parser, Subcommand};
use courselib_db::InMemoryStore;
use courselib_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "courselib", version, about = "Course Library service tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Boot every module and serve the HTTP API
    Serve,
    /// Print the merged OpenAPI document
    Openapi {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load course library settings")?;

    match cli.command {
        Command::Serve => {
            courselib_telemetry::init(&settings.telemetry)?;
            course_library::app::run(settings).await
        }
        Command::Openapi { pretty } => {
            // Stdout carries the document, so no subscriber is installed here.
            let registry = course_library::app::build_registry(&settings, InMemoryStore::new());
            let document = courselib_http::router::openapi_document(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)
            } else {
                serde_json::to_string(&document)
            }
            .context("failed to render OpenAPI document")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
