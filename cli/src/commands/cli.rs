use clap::Parser;

/// Dumps the datahub into a folder tree of XML and JSON files.
#[derive(Parser, Debug, Clone)]
#[command(name = "dhubdump", version, about)]
pub struct Args {
    /// Client secret.
    #[arg(short = 's', long)]
    pub secret: String,

    /// Existing folder the dump is written to.
    #[arg(short = 'o', long)]
    pub output: String,

    /// Id of the client, requires a matching secret.
    #[arg(short = 'i', long = "clientid")]
    pub client_id: Option<String>,

    /// Log a lot more.
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Wait this many millis between two dispatches.
    #[arg(short = 't', long = "timebetween")]
    pub time_between: Option<u64>,

    /// Show a progress bar.
    #[arg(short = 'p', long, default_value_t = false)]
    pub progress: bool,

    /// What to dump: products, claims, vocs, samples, token or a product id.
    /// Defaults to `products vocs samples`.
    ///
    /// `samples` only dumps the product ids listed under `dump.samples` in the
    /// config file; with none configured it is skipped.
    #[arg(value_name = "DUMP")]
    pub specs: Vec<String>,
}
