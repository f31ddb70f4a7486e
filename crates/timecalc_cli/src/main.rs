//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `timecalc_core` linkage.
//! - Drive the keypad and duration sums from the shell for quick checks.
//!
//! Usage:
//! - `timecalc_cli` prints ping/version.
//! - `timecalc_cli calc 2 d + 1 h =` presses keypad labels in order.
//! - `timecalc_cli sum 1h30m 2d 45m` adds durations.

use std::process::ExitCode;
use timecalc_core::{CalculatorService, Duration, Key, Timed};

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let result = match args.split_first() {
        None => {
            println!("timecalc_core ping={}", timecalc_core::ping());
            println!("timecalc_core version={}", timecalc_core::core_version());
            Ok(())
        }
        Some((command, rest)) if command == "calc" => run_calc(rest),
        Some((command, rest)) if command == "sum" => run_sum(rest),
        Some((command, _)) => Err(format!(
            "unknown command `{command}`; expected `calc` or `sum`"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_calc(labels: &[String]) -> Result<(), String> {
    let mut calculator = CalculatorService::new();
    for label in labels {
        let key = Key::from_label(label).ok_or_else(|| format!("unknown key `{label}`"))?;
        calculator.press(key);
    }
    let view = calculator.view();
    println!("display={}", view.display);
    println!("secondary={}", view.secondary);
    Ok(())
}

fn run_sum(inputs: &[String]) -> Result<(), String> {
    let timed = inputs
        .iter()
        .map(|input| {
            Duration::parse(input)
                .map(|duration| Timed::new(duration, input.as_str()))
                .map_err(|err| format!("`{input}`: {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let combined = Timed::combine(timed);
    println!("items={}", combined.value.join(", "));
    println!("total={}", combined.duration);
    Ok(())
}
