use anyhow::Context;
use clap::Parser;
use invoice_gen::config::Settings;
use invoice_gen::invoice::InvoiceRequest;
use invoice_gen::{Asset, FsArtifactStore, InvoiceGenerator};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate an invoice PDF from a JSON request
#[derive(Parser, Debug)]
#[command(name = "invoice-gen", version, about)]
struct Args {
    /// Invoice request as a JSON document
    #[arg(short, long)]
    request: PathBuf,

    /// Treat the request as upload form fields: a JSON object of strings where the
    /// party, order, invoice and item groups are themselves JSON encoded
    #[arg(long)]
    form: bool,

    /// Logo image drawn in the top left corner
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Signature image drawn below the items
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Directory to store the invoice in, overriding the configured one
    #[arg(short, long, env = "INVOICE_GEN_OUT_DIR")]
    out_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct Response<'a> {
    message: &'a str,
    path: &'a str,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = Settings::load().context("failed to load settings")?;
    if let Some(out_dir) = args.out_dir {
        settings.artifacts_dir = out_dir;
    }
    tracing::debug!(?settings, "settings loaded");

    let body = std::fs::read(&args.request)
        .with_context(|| format!("failed to read request {}", args.request.display()))?;
    let request = if args.form {
        let fields: BTreeMap<String, String> =
            serde_json::from_slice(&body).context("form fields must be a JSON object of strings")?;
        InvoiceRequest::from_form_fields(fields)?
    } else {
        InvoiceRequest::from_json(&body)?
    };

    let logo = read_asset(args.logo)?;
    let signature = read_asset(args.signature)?;

    let store = FsArtifactStore::new(&settings.artifacts_dir, settings.retrieval_prefix.as_str());
    let generator = InvoiceGenerator::new(&settings, store);
    let artifact = match generator.generate(&request, logo, signature) {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::error!(error = %e, "failed to generate invoice");
            return Err(e.into());
        }
    };

    let response = Response {
        message: "Invoice generated successfully",
        path: &artifact.retrieval_path,
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn read_asset(path: Option<PathBuf>) -> anyhow::Result<Option<Asset>> {
    path.map(|path| {
        Asset::from_path(&path).with_context(|| format!("failed to read {}", path.display()))
    })
    .transpose()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,invoice_gen=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
