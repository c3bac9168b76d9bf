use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use litmap::MapApp;
use litmap::config::MapConfig;
use litmap::domain::AdminLevel;
use litmap::geocode::{NominatimClient, clean_place_name};

#[derive(Parser)]
#[command(name = "litmap", version, about = "Annotated map of Lithuania")]
struct Cli {
    /// Config file to use instead of the one in the user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Geocode a spreadsheet and add its rows as data points
    Import {
        /// .xlsx, .xls, .ods or .csv file
        file: PathBuf,
        /// Write all points to this JSON file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the data points inside a region
    Members {
        region: String,
        /// Look the name up among municipalities instead of counties
        #[arg(long)]
        municipality: bool,
    },
    /// Search for a location
    Search { query: String },
    /// Show the names tried when geocoding a place
    Names { name: String },
    /// Set the marker dot size and store it in the config
    DotSize { size: u32 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => MapConfig::read(path)?,
        None => MapConfig::load(),
    };

    match cli.cmd {
        Commands::Import { file, out } => {
            let geocoder = NominatimClient::from_config(&config)?;
            let mut app = MapApp::new(config);
            app.startup();
            let summary = app
                .import(&file, &geocoder, |progress| eprintln!("{progress}"))
                .await?;
            println!("{summary}");
            if let Some(out) = out {
                app.points.save_file(&out)?;
                println!("Wrote {} points to {}", app.points.len(), out.display());
            }
        }
        Commands::Members {
            region,
            municipality,
        } => {
            let level = if municipality {
                AdminLevel::Municipality
            } else {
                AdminLevel::County
            };
            let mut app = MapApp::new(config);
            app.startup();
            let info = app
                .region_clicked(level, &region)
                .with_context(|| format!("No {} named {region}", level.label().to_lowercase()))?;
            println!("{}\n{}", info.title, info.details);
            for member in &info.members {
                println!("  {}\t{}", member.name, member.date);
            }
            if let Some(footer) = info.footer {
                println!("{footer}");
            }
        }
        Commands::Search { query } => {
            let geocoder = NominatimClient::from_config(&config)?;
            let app = MapApp::new(config);
            let hits = app.search(&geocoder, &query).await?;
            if hits.is_empty() {
                println!("No results found");
            }
            for hit in hits {
                println!("{}\t{}\t{:.5},{:.5}", hit.name, hit.short_name(), hit.position.lat, hit.position.lon);
            }
        }
        Commands::Names { name } => {
            for candidate in clean_place_name(&name) {
                println!("{candidate}");
            }
        }
        Commands::DotSize { size } => {
            let mut app = MapApp::new(config);
            app.set_dot_size(size);
            match &cli.config {
                Some(path) => app.config.write(path)?,
                None => app.config.save(),
            }
        }
    }

    Ok(())
}
