use catch_core::{hit_test, predict_position, Click, Motion, SessionRecord};
use catch_host::SessionStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::str::FromStr;

const DEFAULT_TRACE_STEP: f64 = 0.1;
const DEFAULT_TRACE_DURATION: f64 = 2.0;
const MAX_TRACE_SAMPLES: u64 = 100_000;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("🎯 Catch Session Simulator");
    println!("{}", "=".repeat(70));
    println!();

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            let mut seed = None;
            let mut output_file_idx = 2;

            if args.len() > 2 && (args[2] == "--seed" || args[2] == "-s") {
                if args.len() < 4 {
                    eprintln!("❌ Error: --seed requires a value");
                    std::process::exit(1);
                }
                seed = Some(parse_arg::<u64>("seed", &args[3]));
                output_file_idx = 4;
            }

            let output_file = args.get(output_file_idx).map(|s| s.as_str());

            generate_command(seed, output_file);
        }

        "check" => {
            if args.len() < 6 {
                eprintln!("Usage: {} check <record_file> <x> <y> <t>", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            let click = Click {
                x: parse_arg("x", &args[3]),
                y: parse_arg("y", &args[4]),
                elapsed: parse_arg("t", &args[5]),
            };

            check_command(&args[2], click);
        }

        "trace" => {
            if args.len() < 3 {
                eprintln!("Usage: {} trace <record_file> [--step <s>] [--duration <d>]", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            let mut step = DEFAULT_TRACE_STEP;
            let mut duration = DEFAULT_TRACE_DURATION;

            let mut rest = args[3..].iter();
            while let Some(flag) = rest.next() {
                let value = rest.next().unwrap_or_else(|| {
                    eprintln!("❌ Error: {} requires a value", flag);
                    std::process::exit(1);
                });
                match flag.as_str() {
                    "--step" => step = parse_arg("step", value),
                    "--duration" => duration = parse_arg("duration", value),
                    _ => {
                        eprintln!("❌ Unknown option: {}", flag);
                        std::process::exit(1);
                    }
                }
            }

            let samples = trace_samples(step, duration).unwrap_or_else(|e| {
                eprintln!("❌ Error: {}", e);
                std::process::exit(1);
            });

            trace_command(&args[2], step, duration, samples);
        }

        "--help" | "-h" => {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate [--seed <n>] [output_file]");
    eprintln!("      Create a session with randomized parameters");
    eprintln!("      - --seed: Optional seed for reproducible parameters");
    eprintln!("      - output_file: Optional file to save the record (JSON)");
    eprintln!("                     Defaults to: catch-session_<id>.json");
    eprintln!();
    eprintln!("  check <record_file> <x> <y> <t>");
    eprintln!("      Validate a click against a saved session record");
    eprintln!("      - x, y: Click position in game units");
    eprintln!("      - t: Seconds elapsed since launch");
    eprintln!();
    eprintln!("  trace <record_file> [--step <s>] [--duration <d>]");
    eprintln!("      Print the ball trajectory of a saved session record");
    eprintln!("      Defaults: step {}s, duration {}s", DEFAULT_TRACE_STEP, DEFAULT_TRACE_DURATION);
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Create a round:  {} generate --seed 7 round.json", program);
    eprintln!("  2. Inspect it:      {} trace round.json", program);
    eprintln!("  3. Try a click:     {} check round.json 118.9 60.4 1.0", program);
}

fn parse_arg<T: FromStr>(name: &str, raw: &str) -> T
where
    T::Err: std::fmt::Display,
{
    raw.parse().unwrap_or_else(|e| {
        eprintln!("❌ Error: invalid {} '{}': {}", name, raw, e);
        std::process::exit(1);
    })
}

fn generate_command(seed: Option<u64>, output_file: Option<&str>) {
    println!("📋 Generating session");
    match seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: (system entropy)"),
    }
    println!();

    let record = match seed {
        Some(seed) => SessionStore::with_rng(StdRng::seed_from_u64(seed)).create_session(),
        None => SessionStore::new().create_session(),
    };

    let default_filename = format!("catch-session_{}.json", record.id);
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_record(&record, file_to_save) {
        Ok(_) => {
            println!("✅ Session created!");
            print_record(&record);
            println!();
            println!("💾 Record saved to: {}", file_to_save);
            println!("   Use 'check {} <x> <y> <t>' to validate a click", file_to_save);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving record: {}", e);
            std::process::exit(1);
        }
    }
}

fn check_command(record_file: &str, click: Click) {
    println!("📋 Checking click");
    println!("  Record file: {}", record_file);
    println!("  Click: ({:.2}, {:.2}) at t={:.3}s", click.x, click.y, click.elapsed);
    println!();

    let (record, motion) = load_motion(record_file);
    print_record(&record);
    println!();

    // Replay the saved parameters in a fresh store
    let store = SessionStore::new();
    let replay = store.open_session(motion);
    let hit = hit_test(&motion, &click);

    let validation = store.validate_click(&replay.id, &click).unwrap_or_else(|e| {
        eprintln!("❌ Validation failed: {}", e);
        std::process::exit(1);
    });

    println!("  Ball position: ({:.2}, {:.2})", hit.position.x, hit.position.y);
    println!("  Distance: {:.2}", hit.distance);
    println!();
    if validation.valid {
        println!("✅ CAUGHT (catch count: {})", validation.catch_count);
    } else {
        println!("❌ MISSED (catch count: {})", validation.catch_count);
    }
    println!("{}", "=".repeat(70));
}

/// Number of points a trace prints, including t = 0.
fn trace_samples(step: f64, duration: f64) -> Result<u64, String> {
    if !(step.is_finite() && step > 0.0) {
        return Err(format!("step must be a positive number, got {}", step));
    }
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(format!("duration must be non-negative, got {}", duration));
    }

    let intervals = (duration / step).floor();
    if intervals >= MAX_TRACE_SAMPLES as f64 {
        return Err(format!(
            "{}s at {}s steps exceeds {} samples",
            duration, step, MAX_TRACE_SAMPLES
        ));
    }
    Ok(intervals as u64 + 1)
}

fn trace_command(record_file: &str, step: f64, duration: f64, samples: u64) {
    println!("📋 Tracing trajectory");
    println!("  Record file: {}", record_file);
    println!("  Step: {}s, duration: {}s", step, duration);
    println!();

    let (record, motion) = load_motion(record_file);
    print_record(&record);
    println!();

    println!("  {:>8}  {:>10}  {:>10}", "t (s)", "x", "y");
    for i in 0..samples {
        let t = i as f64 * step;
        let p = predict_position(&motion, t);
        println!("  {:>8.3}  {:>10.2}  {:>10.2}", t, p.x, p.y);
    }
    println!("{}", "=".repeat(70));
}

fn print_record(record: &SessionRecord) {
    println!("  Session ID: {}", record.id);
    println!("  Mode: {}", record.mode);
    println!("  Gravity: {:.3}", record.gravity);
    println!("  Velocity: {:.3}", record.initial_speed);
    println!("  Angle: {:.4} rad", record.launch_angle);
    println!("  Friction: {:.4}", record.drag_coefficient);
    println!("  Created: {}", record.created_at.to_rfc3339());
}

fn load_motion(path: &str) -> (SessionRecord, Motion) {
    let record = load_record(path).unwrap_or_else(|e| {
        eprintln!("❌ Error loading record: {}", e);
        std::process::exit(1);
    });
    let motion = record.motion().unwrap_or_else(|e| {
        eprintln!("❌ Invalid record: {}", e);
        std::process::exit(1);
    });
    (record, motion)
}

fn save_record(record: &SessionRecord, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}

fn load_record(path: &str) -> Result<SessionRecord, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let record: SessionRecord = serde_json::from_str(&json)?;
    Ok(record)
}
