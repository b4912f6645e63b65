use clap::Parser;
use colored::Colorize;
use std::time::Instant;
use uuid::Uuid;

mod cli;
mod config;
mod errors;
mod extract;
mod log;
mod prompt;
mod provider;
mod server;
mod ux;
mod wire;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let mut cfg = config::Config::load(args.config.as_deref())?;
    cfg.root = args.root.clone();
    cfg.save_request = args.save_request;
    cfg.save_response = args.save_response;
    if let Some(b) = &args.bind {
        cfg.bind = b.clone();
    }
    if let Some(p) = args.provider {
        cfg.provider = p;
    }
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }

    let prov = provider::make_provider(&cfg)?;

    if args.serve {
        return server::serve(cfg, prov, args.debug).await;
    }

    // One-shot mode: the trip form comes from flags.
    let trip = wire::TripRequest {
        destination: args.destination.clone().unwrap_or_default(),
        days: args.days.unwrap_or_default(),
        budget: args.budget.clone().unwrap_or_default(),
        interests: args.interests.clone(),
        transport: args.transport.clone(),
    };
    trip.validate()?;

    let ins = prompt::build(&trip, prompt::itinerary_schema());
    let tx = Uuid::new_v4();
    if args.debug {
        eprintln!("debug: tx {}", tx);
        eprintln!("debug: prompt:\n{}\n", ins.user);
    }

    let sp = ux::spinner("Asking the model for a short student itinerary…");
    let started = Instant::now();
    let sent = prov.generate(&ins, args.debug).await;
    sp.finish_and_clear();
    let raw = sent?;
    let elapsed_ms = started.elapsed().as_millis();

    let outcome = extract::extract(&raw);

    if cfg.save_request || cfg.save_response {
        let itinerary = match &outcome {
            extract::ExtractionResult::Parsed(v) => Some(v),
            extract::ExtractionResult::Failed(_) => None,
        };
        let saved = log::save_exchange(
            &trip,
            &ins,
            &raw,
            itinerary,
            tx,
            &cfg,
            cfg.save_request,
            cfg.save_response,
        )?;
        if args.debug {
            log::print_saved_paths(&saved);
        }
    }

    match outcome {
        extract::ExtractionResult::Parsed(v) => {
            ux::render_itinerary(&v);
            ux::print_summary(&v, &cfg.model, elapsed_ms);
            Ok(())
        }
        extract::ExtractionResult::Failed(reason) => {
            eprintln!("\n{} {}", "Extraction failed:".red().bold(), reason.code());
            eprintln!("Raw model output:\n{}", raw);
            std::process::exit(1);
        }
    }
}
