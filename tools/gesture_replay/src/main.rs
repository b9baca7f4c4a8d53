use std::{env, path::PathBuf, process};

mod trace;

use trace::{event_lines, first_mismatch, load_trace, parse_expected, replay};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let records = load_trace(&trace_path)?;
    let output = replay(&records);
    for line in &output {
        println!("{line}");
    }
    let lines = event_lines(&output);

    let Some(expect_path) = expect_path else {
        return Ok(());
    };
    let expected_text = std::fs::read_to_string(&expect_path)
        .map_err(|err| format!("failed to read {}: {err}", expect_path.display()))?;
    let expected = parse_expected(&expected_text);
    match first_mismatch(&expected, &lines) {
        None => {
            println!("replay: ok records={} events={}", records.len(), lines.len());
            Ok(())
        }
        Some((idx, want, got)) => Err(format!(
            "event {} mismatch: expected {:?}, got {:?}",
            idx + 1,
            want.as_deref().unwrap_or("<none>"),
            got.as_deref().unwrap_or("<none>")
        )),
    }
}

fn usage() -> String {
    "usage: gesture_replay <trace.csv> [--expect <events.txt>]".into()
}
