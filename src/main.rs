use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tuckshop::application::checkout::CheckoutSession;
use tuckshop::config::{CheckoutConfig, PricingConfig};
use tuckshop::domain::cart::Cart;
use tuckshop::domain::customer::CustomerInfo;
use tuckshop::domain::money::Money;
use tuckshop::domain::ports::{CatalogRef, OrderStoreRef};
use tuckshop::error::OrderError;
use tuckshop::infrastructure::in_memory::{InMemoryCatalog, InMemoryOrderStore};
use tuckshop::infrastructure::json_file::JsonFileOrderStore;
use tuckshop::infrastructure::seed::{default_menu, demo_orders};
use tuckshop::infrastructure::simulated_payment::SimulatedPaymentGateway;
use tuckshop::interfaces::csv::cart_reader::CartLineReader;
use tuckshop::interfaces::csv::manifest_writer::ManifestWriter;
use tuckshop::interfaces::query::{Envelope, QueryService};
use tuckshop::telemetry::init_tracing;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON order log (optional). Without it the built-in demo orders are used.
    #[arg(long, global = true)]
    orders: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List menu items
    Menu,
    /// List submitted orders
    Orders,
    /// Show how many of each item the kitchen must make
    Production {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Pay for a cart and record the order
    Checkout(CheckoutArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Args)]
struct CheckoutArgs {
    /// Cart lines CSV file
    #[arg(long)]
    cart: PathBuf,

    /// Parent or guardian full name
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    school: Option<String>,

    #[arg(long, default_value = "50.00")]
    free_delivery_threshold: Money,

    #[arg(long, default_value = "5.00")]
    delivery_fee: Money,

    #[arg(long, default_value_t = 30)]
    gateway_timeout_secs: u64,

    /// Make the simulated gateway refuse the authorization
    #[arg(long)]
    decline_authorization: bool,

    /// Make the simulated gateway refuse the confirmation
    #[arg(long)]
    decline_confirmation: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog: CatalogRef = Arc::new(InMemoryCatalog::new(default_menu()));
    let orders: OrderStoreRef = if let Some(path) = &cli.orders {
        Arc::new(JsonFileOrderStore::open(path).await.into_diagnostic()?)
    } else {
        Arc::new(InMemoryOrderStore::with_orders(
            demo_orders().into_diagnostic()?,
        ))
    };
    let queries = QueryService::new(catalog.clone(), orders.clone());

    match cli.command {
        Command::Menu => print_json(&queries.list_menu_items().await),
        Command::Orders => print_json(&queries.list_orders().await),
        Command::Production {
            format: Format::Json,
        } => print_json(&queries.production_manifest().await),
        Command::Production {
            format: Format::Csv,
        } => {
            let manifest = queries.production_manifest().await;
            let entries = manifest
                .data
                .ok_or_else(|| miette!("{}", manifest.message.unwrap_or_default()))?;
            let stdout = io::stdout();
            let mut writer = ManifestWriter::new(stdout.lock());
            writer.write_entries(entries).into_diagnostic()
        }
        Command::Checkout(args) => checkout(args, catalog, orders).await,
    }
}

async fn checkout(args: CheckoutArgs, catalog: CatalogRef, orders: OrderStoreRef) -> Result<()> {
    let mut cart = Cart::new(PricingConfig {
        free_delivery_threshold: args.free_delivery_threshold,
        delivery_fee: args.delivery_fee,
    });

    let file = File::open(&args.cart).into_diagnostic()?;
    for line in CartLineReader::new(file).lines() {
        let record = match line {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Error reading cart line: {}", e);
                continue;
            }
        };
        let Some(item) = catalog.find(record.menu_id).await.into_diagnostic()? else {
            eprintln!("Skipping cart line: {}", OrderError::UnknownMenuItem(record.menu_id));
            continue;
        };
        if let Err(e) = cart.add(&item, record.quantity, record.details()) {
            eprintln!("Skipping cart line: {}", e);
        }
    }

    let gateway = SimulatedPaymentGateway::new();
    gateway.decline_authorizations(args.decline_authorization);
    gateway.decline_confirmations(args.decline_confirmation);

    let config = CheckoutConfig {
        gateway_timeout: Duration::from_secs(args.gateway_timeout_secs),
    };
    let mut session =
        CheckoutSession::new(cart, Arc::new(gateway), orders, config).into_diagnostic()?;
    if let Some(school) = args.school {
        session = session.with_school(school);
    }

    session.start().await.into_diagnostic()?;
    session
        .set_customer(CustomerInfo::new(args.name, args.email, args.phone))
        .into_diagnostic()?;
    if session.payment_step().is_none() {
        return Err(OrderError::ValidationIncomplete).into_diagnostic();
    }

    let order = session.submit().await.into_diagnostic()?;
    print_json(&Envelope::ok(vec![order]))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()
}
