use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hh_reco::load_dataset;

use super::load_config;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Jet dataset to inspect.
    #[arg(long)]
    pub input: PathBuf,
    /// Number of leading events to print.
    #[arg(long, default_value_t = 3)]
    pub events: usize,
    /// YAML config supplying branch names.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let columns = load_dataset(&args.input, &config.branches)?;

    println!("events: {}", columns.n_events());
    println!("branches: {}", config.branches.as_array().join(", "));
    for event in columns.events().take(args.events) {
        println!("event {}:", event.index);
        println!("  jets: {}", event.len());
        if let Some(first) = event.jets.first() {
            println!("  first jet pt: {}", first.pt);
            println!("  first jet btag: {}", first.btag_score);
        }
    }
    Ok(())
}
