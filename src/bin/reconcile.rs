use anyhow::{anyhow, Result};
use clap::Parser;
use plotcalc::core::units::{blank_or, AreaUnit};
use plotcalc::utils::logger;
use plotcalc::{FieldEdit, FormState, PlotIdentity, PlotPayload};

/// Applies form edits in order and prints the reconciled state.
#[derive(Parser)]
#[command(name = "reconcile")]
#[command(about = "Apply plot form edits (field=value) and print the reconciled form")]
struct Args {
    /// Edits such as front=30 back=30 left=36 right=36 price_per_gaj=50000
    #[arg(required = true)]
    edits: Vec<String>,

    /// Print the submission payload instead of the form state
    #[arg(long)]
    payload: bool,

    /// Plot number used in the payload
    #[arg(long, default_value = "draft")]
    plot_number: String,

    /// Unit for the human-readable area and rate lines
    #[arg(long, default_value = "gaj")]
    unit: AreaUnit,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let edits = args
        .edits
        .iter()
        .map(|spec| FieldEdit::parse(spec).map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;

    let mut state = FormState::new();
    for edit in edits {
        tracing::debug!("Applying {:?}", edit);
        state = state.reduce(edit);
    }

    if args.payload {
        let identity = PlotIdentity {
            plot_number: args.plot_number.clone(),
            ..PlotIdentity::default()
        };
        let payload = PlotPayload::from_form(identity, &state);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&state)?);
        eprintln!(
            "area: {} {} | rate: {} per {}",
            blank_or(state.area_in(args.unit)),
            args.unit,
            blank_or(state.price_per_unit_in(args.unit)),
            args.unit
        );
    }

    Ok(())
}
