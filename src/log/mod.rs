use chrono::Utc;
use fs_err as fs;
use serde_json::{json, to_string_pretty, Value};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::wire::{Instruction, TripRequest};

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
    pub itinerary: Option<PathBuf>,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".tripsmith").join("tx").join(tx.to_string())
}

/// Persist one generation exchange under the transaction directory: the trip
/// plus built instruction, the raw model text, and the parsed itinerary when
/// extraction succeeded. The raw text is kept verbatim so failed extractions
/// stay diagnosable.
pub fn save_exchange(
    trip: &TripRequest,
    ins: &Instruction,
    raw: &str,
    itinerary: Option<&Value>,
    tx: Uuid,
    cfg: &Config,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(Path::new(&cfg.root), tx);
    fs::create_dir_all(&dir)?;

    let mut request_path = None;
    let mut response_path = None;
    let mut itinerary_path = None;

    if save_request {
        let p = dir.join("generate.request.json");
        let record = json!({
            "tx": tx,
            "timestamp": Utc::now(),
            "trip": trip,
            "instruction": ins,
        });
        fs::write(&p, to_string_pretty(&record)?)?;
        request_path = Some(p);
    }

    if save_response {
        let p = dir.join("generate.response.txt");
        fs::write(&p, raw)?;
        response_path = Some(p);

        if let Some(v) = itinerary {
            let p = dir.join("generate.itinerary.json");
            fs::write(&p, to_string_pretty(v)?)?;
            itinerary_path = Some(p);
        }
    }

    Ok(SavedPaths { dir, request: request_path, response: response_path, itinerary: itinerary_path })
}

pub fn print_saved_paths(saved: &SavedPaths) {
    println!("debug: artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        println!("debug: request saved at: {}", p.display());
    } else {
        println!("debug: request not saved (flag off)");
    }
    if let Some(p) = &saved.response {
        println!("debug: response saved at: {}", p.display());
    } else {
        println!("debug: response not saved (flag off)");
    }
    if let Some(p) = &saved.itinerary {
        println!("debug: itinerary saved at: {}", p.display());
    }
}
