use clap::{Parser, Subcommand, ValueEnum, builder::styling};
use dataprov::cli;
use dataprov::provenance::{DataflowSerializer, GraphSerializer, ProvJsonSerializer};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::Path;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Data Provenance Pipeline: clean the purchases dataset and capture the run as a provenance graph
#[derive(Parser)]
#[command(name = "dataprov", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Provenance vocabulary for the serialized graph
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// W3C-PROV-style agent/activity/entity document
    Prov,
    /// Dataflow-style task/dataset document
    Dataflow,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the purchases file and record provenance
    Run {
        /// Delimited input file to clean
        #[arg(default_value = "clientes_compras_grupo_1.csv")]
        input: String,

        /// Where to write the cleaned file
        #[arg(default_value = "cliente_compras_grupo_1_tratado.csv")]
        output: String,

        /// Where to write the provenance graph
        #[arg(short, long, default_value = "provenance.json")]
        provenance: String,

        /// Provenance vocabulary
        #[arg(short, long, value_enum, default_value = "prov")]
        format: Format,

        /// Skip provenance capture entirely
        #[arg(long)]
        no_provenance: bool,
    },

    /// Instrument a script with provenance capture via the Gemini API
    Instrument {
        /// Script to instrument
        input_file: String,

        /// Where to save the instrumented script
        output_file: String,
    },

    /// List Gemini models that support content generation
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Run {
            input,
            output,
            provenance,
            format,
            no_provenance,
        } => {
            log::info!(
                "Cleaning {} into {}",
                input.bright_black(),
                output.bright_black()
            );
            if no_provenance {
                cli::run_pipeline_plain(&input, &output)?;
            } else {
                let serializer: Box<dyn GraphSerializer> = match format {
                    Format::Prov => Box::new(ProvJsonSerializer::new()),
                    Format::Dataflow => Box::new(DataflowSerializer::new()),
                };
                cli::run_pipeline(&input, &output, &provenance, serializer.as_ref())?;
            }
        }
        Commands::Instrument {
            input_file,
            output_file,
        } => {
            log::info!("Instrumenting {}", input_file.bright_black());
            cli::instrument_file(&input_file, &output_file).await?;
        }
        Commands::Models => {
            cli::list_models().await?;
        }
    }

    Ok(())
}
