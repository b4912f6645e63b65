use colored::Colorize;
use indicatif::ProgressBar;
use serde_json::Value;
use std::time::Duration;

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Read a scalar field as display text. Models asked for "<number and
/// currency>" strings sometimes return bare numbers instead.
fn field_text(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Render an itinerary value as terminal cards. Every field is optional;
/// whatever is present gets printed.
pub fn render_itinerary(it: &Value) {
    let title = field_text(it, "title").unwrap_or_else(|| "Itinerary".into());
    println!("\n=== {} ===", title.bold());
    if let Some(dest) = field_text(it, "destination") {
        println!("{} {}", "Destination:".bold(), dest);
    }

    match it.get("days").and_then(Value::as_array) {
        Some(days) if !days.is_empty() => {
            for d in days {
                render_day(d);
            }
        }
        _ => println!("{}", "(no day-by-day breakdown returned)".dimmed()),
    }

    if let Some(total) = field_text(it, "total_estimated_cost") {
        println!("\n{} {}", "Total estimated cost:".bold(), total.green());
    }

    if let Some(hostels) = it.get("recommended_hostels").and_then(Value::as_array) {
        if !hostels.is_empty() {
            println!("\n{}", "Recommended hostels".bold());
            for h in hostels {
                let name = field_text(h, "name").unwrap_or_else(|| "-".into());
                let price = field_text(h, "approx_price").unwrap_or_default();
                match field_text(h, "note") {
                    Some(note) if !note.is_empty() => {
                        println!("  - {} {}  {}", name, price, note.dimmed())
                    }
                    _ => println!("  - {} {}", name, price),
                }
            }
        }
    }

    render_tips(it, "transport_tips", "Transport tips");
    render_tips(it, "money_saving_tips", "Money saving tips");
}

fn render_day(d: &Value) {
    let header = match d.get("day").and_then(Value::as_u64) {
        Some(n) => format!("Day {}", n),
        None => "Day".to_string(),
    };
    println!("\n{}", header.cyan().bold());
    if let Some(summary) = field_text(d, "summary") {
        println!("  {}", summary);
    }
    if let Some(acts) = d.get("activities").and_then(Value::as_array) {
        for a in acts {
            let time = field_text(a, "time").unwrap_or_else(|| "-".into());
            let what = field_text(a, "activity").unwrap_or_else(|| "-".into());
            match field_text(a, "est_cost") {
                Some(cost) => println!("  - [{}] {} ({})", time, what, cost),
                None => println!("  - [{}] {}", time, what),
            }
        }
    }
    if let Some(cost) = field_text(d, "daily_cost") {
        println!("  {} {}", "Daily cost:".bold(), cost);
    }
}

fn render_tips(it: &Value, key: &str, label: &str) {
    if let Some(tips) = it.get(key).and_then(Value::as_array) {
        if tips.is_empty() {
            return;
        }
        println!("\n{}", label.bold());
        for t in tips {
            if let Some(s) = t.as_str() {
                println!("  - {}", s);
            }
        }
    }
}

pub fn print_summary(it: &Value, model: &str, elapsed_ms: u128) {
    let days = it.get("days").and_then(Value::as_array).map(|d| d.len()).unwrap_or(0);
    let total = field_text(it, "total_estimated_cost").unwrap_or_else(|| "n/a".into());
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━ Summary ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {}   {}: {}   {}: {}   {}: {}ms",
        "Days".cyan().bold(), days,
        "Total".green().bold(), total,
        "Model".bold(), model,
        "Time".bold(), elapsed_ms
    );
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}
