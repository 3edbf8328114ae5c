use polstep::{display, signals, Calculator, Config, StepRecord};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// How calculated steps are printed
#[derive(Debug, Clone)]
pub(crate) struct OutputOptions {
    pub(crate) json: bool,
    pub(crate) play: bool,
    pub(crate) color: bool,
    pub(crate) delay: Duration,
}

impl OutputOptions {
    pub(crate) fn from_config(config: &Config, json: bool, play: bool) -> Self {
        OutputOptions {
            json,
            play,
            color: config.color && io::stdout().is_terminal(),
            delay: config.playback_delay(),
        }
    }
}

/// Type one line into a fresh key list, calculate and print the steps
///
/// Returns `Ok(false)` when the calculation ended in an error record.
pub(crate) fn execute_line(
    calc: &mut Calculator,
    input: &str,
    opts: &OutputOptions,
) -> Result<bool, String> {
    calc.clear();
    calc.add_keys(input);

    // Nothing typed that the key list accepts
    let steps = match calc.calculate() {
        Some(steps) => steps,
        None => {
            eprintln!("Nothing to calculate");
            return Ok(true);
        }
    };

    print_steps(steps, opts)?;
    Ok(!steps.last().is_some_and(StepRecord::is_error))
}

/// Print a step list in the configured output mode
pub(crate) fn print_steps(steps: &[StepRecord], opts: &OutputOptions) -> Result<(), String> {
    if opts.json {
        let json = serde_json::to_string_pretty(steps).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else if opts.play {
        play_steps(steps, 0, opts);
    } else {
        println!("{}", display::format_steps(steps, opts.color));
    }
    Ok(())
}

/// Reveal the steps from `from` on, one at a time; Ctrl-C prints the rest
/// immediately
pub(crate) fn play_steps(steps: &[StepRecord], from: usize, opts: &OutputOptions) {
    signals::reset_interrupt();
    let total = steps.len();
    let mut skipping = false;

    for (i, step) in steps.iter().enumerate().skip(from) {
        if i > from {
            println!();
            if !skipping {
                skipping = wait_or_interrupt(opts.delay);
            }
        }
        println!("{}", display::format_step(step, i, total, opts.color));
        let _ = io::stdout().flush();
    }
}

/// Sleep for `delay`, returning early with `true` if Ctrl-C is pressed
fn wait_or_interrupt(delay: Duration) -> bool {
    const SLICE: Duration = Duration::from_millis(20);
    let mut waited = Duration::ZERO;
    while waited < delay {
        if signals::take_interrupt() {
            return true;
        }
        let slice = SLICE.min(delay - waited);
        thread::sleep(slice);
        waited += slice;
    }
    signals::take_interrupt()
}

/// Calculate every line of a file, skipping blanks and `#` comments
pub(crate) fn execute_script(path: &str, calc: &mut Calculator, opts: &OutputOptions) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    let mut first = true;
    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !first && !opts.json {
            println!("{}", display::rule(terminal_width(), opts.color));
        }
        first = false;

        match execute_line(calc, trimmed, opts) {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("Error at line {}: calculation failed", line_num + 1);
                failed = true;
            }
            Err(e) => {
                eprintln!("Error at line {}: {}", line_num + 1, e);
                return ExitCode::FAILURE;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Get terminal width, defaulting to 80
pub(crate) fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}
