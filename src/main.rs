mod api;
mod reader;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runtu_comic_storage::Storage;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding data-info.md and one <comic-id>.md per comic
    #[arg(short, long, default_value = "./database", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the catalog over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3001)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Static client files served for any non-API path
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },
    /// Page through a chapter from the terminal
    Read(reader::ReadArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "runtu_comic=debug,runtu_comic_storage=debug,runtu_comic_reader=debug,tower_http=debug"
                    .into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let storage = Storage::new(&args.data_dir);

    match args.command {
        Command::Serve {
            port,
            host,
            static_dir,
        } => {
            tracing::info!(
                "Starting comic server on {}:{} (data: {})",
                host,
                port,
                args.data_dir.display()
            );
            api::server::serve(SocketAddr::new(host, port), storage, static_dir).await?;
        }
        Command::Read(read_args) => {
            let view = reader::run(&storage, &read_args).await?;
            print!("{view}");
        }
    }

    Ok(())
}
