//! # Ticketera CLI
//!
//! Command-line interface for printing sale tickets.
//!
//! ## Usage
//!
//! ```bash
//! # Print a sale exported by the backend
//! ticketera print --sale venta.json --device /dev/rfcomm0
//!
//! # Print the sample ticket without a printer
//! ticketera print --demo --dry-run --hex
//!
//! # Show what a ticket will look like
//! ticketera preview --sale venta.json
//!
//! # Run the HTTP print service
//! ticketera serve --listen 0.0.0.0:8080
//!
//! # List printer profiles
//! ticketera printers
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use ticketera::{
    PrinterConfig, TicketeraError,
    error::Result,
    logging,
    preview::render_text,
    server::{self, ServerConfig},
    settings::Settings,
    ticket::{SaleRecord, TicketLayout, demo_sale, ticket_program},
    transport::{ConnectionHandle, MemoryConnector, send_ticket},
};

/// Ticketera - sale tickets for Bluetooth thermal printers
#[derive(Parser, Debug)]
#[command(name = "ticketera")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a sale ticket
    Print {
        #[command(flatten)]
        sale: SaleArgs,

        #[command(flatten)]
        printer: PrinterArgs,

        /// Record the chunks in memory instead of opening the printer
        #[arg(long)]
        dry_run: bool,

        /// Dump the command stream as hex
        #[arg(long)]
        hex: bool,
    },

    /// Render a sale ticket as text
    Preview {
        #[command(flatten)]
        sale: SaleArgs,

        #[command(flatten)]
        printer: PrinterArgs,

        /// Dump the command stream as hex too
        #[arg(long)]
        hex: bool,
    },

    /// Run the HTTP print service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// List printer profiles
    Printers,
}

#[derive(Args, Debug)]
struct SaleArgs {
    /// Sale record JSON file ("-" for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "demo")]
    sale: Option<PathBuf>,

    /// Use the built-in sample sale
    #[arg(long)]
    demo: bool,
}

#[derive(Args, Debug)]
struct PrinterArgs {
    /// RFCOMM device path or Bluetooth MAC address
    #[arg(long)]
    device: Option<String>,

    /// Printer profile (see `ticketera printers`)
    #[arg(long)]
    printer: Option<String>,

    /// Bytes per write
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Pause between writes in milliseconds
    #[arg(long)]
    chunk_delay_ms: Option<u64>,

    /// Connection timeout in milliseconds
    #[arg(long)]
    connect_timeout_ms: Option<u64>,

    /// Ticket layout file (JSON)
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let base = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Print {
            sale,
            printer,
            dry_run,
            hex,
        } => {
            let settings = printer.apply(base)?;
            let sale = sale.load()?;
            sale.validate()?;

            let ticket = ticket_program(&sale, &settings.ticket_layout()?).to_bytes();
            if hex {
                println!("{}", ticket.to_hex());
            }

            let recorder = MemoryConnector::new();
            let mut connection = if dry_run {
                ConnectionHandle::new(recorder.clone())
            } else {
                settings.connection()
            };

            println!(
                "Printing ticket {} ({} bytes) to {}...",
                sale.id,
                ticket.len(),
                connection.describe()
            );
            connection.connect().await?;
            let report = send_ticket(&mut connection, &ticket, &settings.write_options()?).await;
            if let Err(e) = connection.disconnect().await {
                tracing::warn!(error = %e, "disconnect failed");
            }
            let report = report?;

            if dry_run {
                println!(
                    "Dry run: {} bytes recorded in {} writes",
                    recorder.written_bytes().len(),
                    recorder.writes().len()
                );
            } else {
                println!(
                    "Printed successfully! ({} bytes, {} chunks)",
                    report.bytes, report.chunks
                );
            }
        }

        Commands::Preview { sale, printer, hex } => {
            let settings = printer.apply(base)?;
            let layout = settings.ticket_layout()?;
            let sale = sale.load()?;

            let program = ticket_program(&sale, &layout);
            print!("{}", render_text(&program, layout.columns));
            if hex {
                println!();
                println!("{}", program.to_bytes().to_hex());
            }
        }

        Commands::Serve { listen, printer } => {
            let settings = printer.apply(base)?;
            server::serve(ServerConfig {
                listen_addr: listen,
                settings,
            })
            .await?;
        }

        Commands::Printers => {
            println!("Available printers:");
            for config in PrinterConfig::list() {
                println!(
                    "  {:<14} {} ({} columns, {}-byte writes, {} ms delay)",
                    config.key,
                    config.name,
                    config.columns,
                    config.max_write_len,
                    config.chunk_delay_ms
                );
            }
        }
    }

    Ok(())
}

impl SaleArgs {
    fn load(&self) -> Result<SaleRecord> {
        if self.demo {
            return Ok(demo_sale());
        }
        let Some(path) = &self.sale else {
            return Err(TicketeraError::Config(
                "No sale given. Use --sale FILE or --demo".to_string(),
            ));
        };
        SaleRecord::from_json(&read_input(path)?)
    }
}

impl PrinterArgs {
    /// Overlay the command-line flags on the file settings.
    fn apply(self, mut settings: Settings) -> Result<Settings> {
        if let Some(device) = self.device {
            settings.device = device;
        }
        if let Some(printer) = self.printer {
            settings.printer = printer;
        }
        if self.chunk_size.is_some() {
            settings.chunk_size = self.chunk_size;
        }
        if self.chunk_delay_ms.is_some() {
            settings.chunk_delay_ms = self.chunk_delay_ms;
        }
        if let Some(ms) = self.connect_timeout_ms {
            settings.connect_timeout_ms = ms;
        }
        if let Some(path) = &self.layout {
            let layout: TicketLayout = serde_json::from_str(&read_input(path)?)?;
            settings.layout = layout;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| {
        TicketeraError::Config(format!("Failed to read {}: {}", path.display(), e))
    })
}
