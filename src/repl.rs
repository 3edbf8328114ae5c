use polstep::clipboard::{copy_to_clipboard, read_clipboard};
use polstep::{display, signals, Calculator, Config, KeyList, Notation, PasteFeeder, Playback};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::terminal::{play_steps, print_steps, OutputOptions};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const COMMANDS: &[&str] = &[
    ".help", ".prefix", ".postfix", ".toggle", ".keys", ".clear", ".next", ".prev", ".finish",
    ".cancel", ".play", ".copy", ".paste", "exit",
];

// ============================================
// PolstepHelper: command completion and a normalized preview
// ============================================

struct PolstepHelper;

impl Helper for PolstepHelper {}

impl Completer for PolstepHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];

        // Only whole-line commands complete; calculator keys never do
        if prefix.is_empty() || prefix.contains(char::is_whitespace) {
            return Ok((0, Vec::new()));
        }

        let pairs = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, pairs))
    }
}

impl Hinter for PolstepHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        normalized_preview(line).map(|keys| format!("  → {}", keys))
    }
}

impl Highlighter for PolstepHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        // Dim the preview
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for PolstepHelper {}

/// What the key list will contain once `line` is entered, if that differs
/// from what was typed
fn normalized_preview(line: &str) -> Option<String> {
    if line.is_empty() || is_command(line) {
        return None;
    }
    let mut keys = KeyList::new();
    keys.push_str(line);
    let normalized = keys.to_string();
    (!normalized.is_empty() && normalized != line).then_some(normalized)
}

fn is_command(line: &str) -> bool {
    let word = line.trim();
    (word.starts_with('.') && word.len() > 1) || word == "exit" || word == "quit"
}

// ============================================
// REPL session state
// ============================================

/// Everything a REPL session owns between lines
struct Session {
    calc: Calculator,
    playback: Playback,
    opts: OutputOptions,
    config: Config,
}

enum Action {
    Continue,
    Exit,
}

impl Session {
    fn new(notation: Notation, config: Config, opts: OutputOptions) -> Self {
        Session {
            calc: Calculator::new(notation),
            playback: Playback::default(),
            opts,
            config,
        }
    }

    fn prompt(&self) -> String {
        let marker = match self.calc.notation() {
            Notation::Prefix => "pn",
            Notation::Postfix => "rpn",
        };
        format!("polstep {}> ", marker)
    }

    /// Calculate the key list and start a new playback
    fn calculate(&mut self) {
        let steps = match self.calc.calculate() {
            Some(steps) => steps.to_vec(),
            None => {
                println!("Nothing to calculate");
                return;
            }
        };

        if self.opts.json || self.opts.play {
            if let Err(e) = print_steps(&steps, &self.opts) {
                eprintln!("Error: {}", e);
            }
            self.playback = Playback::new(steps);
            self.playback.finish();
            return;
        }

        self.playback = Playback::new(steps);
        self.show_current();
        if !self.playback.is_finished() {
            println!("{}", self.dim("(Enter or .next to continue, .finish to skip)"));
        }
    }

    fn show_current(&self) {
        match self.playback.current() {
            Some(step) => println!(
                "{}",
                display::format_step(
                    step,
                    self.playback.position(),
                    self.playback.len(),
                    self.opts.color
                )
            ),
            None => println!("No calculation"),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.opts.color {
            format!("\x1b[90m{}\x1b[0m", text)
        } else {
            text.to_string()
        }
    }

    fn set_notation(&mut self, notation: Notation) {
        self.calc.set_notation(notation);
        println!("Notation: {}", notation);
        if !self.calc.keys().is_empty() {
            self.calculate();
        }
    }

    fn next(&mut self) {
        if self.playback.is_empty() {
            println!("No calculation");
        } else if self.playback.next().is_some() {
            self.show_current();
        } else {
            println!("Already at the last step");
        }
    }

    fn previous(&mut self) {
        if self.playback.is_empty() {
            println!("No calculation");
        } else if self.playback.previous().is_some() {
            self.show_current();
        } else {
            println!("Already at the first step");
        }
    }

    fn finish(&mut self) {
        if self.playback.finish().is_some() {
            self.show_current();
        } else {
            println!("No calculation");
        }
    }

    fn play(&mut self) {
        if self.playback.is_empty() {
            println!("No calculation");
            return;
        }
        let from = if self.playback.is_finished() {
            0
        } else {
            self.playback.position() + 1
        };
        play_steps(self.playback.steps(), from, &self.opts);
        self.playback.finish();
    }

    fn cancel(&mut self) {
        self.playback.cancel();
        self.calc.reset_calculation();
    }

    fn copy(&self) {
        if self.calc.keys().is_empty() {
            println!("Nothing to copy");
            return;
        }
        match copy_to_clipboard(&self.calc.copy()) {
            Ok(()) => println!("Copied: {}", self.calc.keys()),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    /// Type the clipboard into a fresh key list, one paced key at a time
    fn paste(&mut self) {
        let text = match read_clipboard() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        self.cancel();
        self.calc.clear();
        signals::reset_interrupt();
        let feeder =
            PasteFeeder::with_cancel(self.config.paste_interval(), signals::interrupt_flag());

        let calc = &mut self.calc;
        let outcome = feeder.feed_with(&text, |key| {
            if calc.add_key(key) {
                print!("\r\x1b[K{}", calc.keys());
                let _ = io::stdout().flush();
            }
        });
        println!();
        signals::reset_interrupt();
        debug!(fed = outcome.fed, cancelled = outcome.cancelled, "paste finished");

        if outcome.cancelled {
            println!("Paste cancelled after {} keys", outcome.fed);
        } else {
            self.calculate();
        }
    }

    /// Run one REPL line
    fn handle_line(&mut self, line: &str) -> Action {
        let trimmed = line.trim();

        match trimmed {
            "exit" | "quit" => return Action::Exit,
            "" => {
                // Enter steps through a running playback
                if !self.playback.is_finished() {
                    self.next();
                }
            }
            ".help" | ".h" => print_repl_help(),
            ".prefix" => self.set_notation(Notation::Prefix),
            ".postfix" => self.set_notation(Notation::Postfix),
            ".toggle" => {
                let notation = self.calc.notation().toggled();
                self.set_notation(notation);
            }
            ".keys" => {
                if self.calc.keys().is_empty() {
                    println!("(empty)");
                } else {
                    println!("{}", self.calc.keys());
                }
            }
            ".clear" => {
                self.cancel();
                self.calc.clear();
            }
            ".next" | ".n" => self.next(),
            ".prev" | ".p" => self.previous(),
            ".finish" | ".f" => self.finish(),
            ".cancel" => self.cancel(),
            ".play" => self.play(),
            ".copy" => self.copy(),
            ".paste" => self.paste(),
            cmd if cmd.starts_with('.') && cmd.len() > 1 => {
                eprintln!("Unknown command: {} (try .help)", cmd);
            }
            input => {
                self.cancel();
                self.calc.clear();
                self.calc.add_keys(input);
                self.calculate();
            }
        }
        Action::Continue
    }
}

fn print_repl_help() {
    println!(
        r#"Type an expression and press Enter to calculate it step by step.

    .prefix / .postfix      Switch notation (recalculates the current keys)
    .toggle                 Switch to the other notation
    .keys                   Show the normalized key list
    .clear                  Empty the key list
    .next / .prev           Step forward / back (Enter also steps forward)
    .finish                 Jump to the last step
    .play                   Reveal the remaining steps with a delay
    .cancel                 Drop the current calculation
    .copy / .paste          Copy the key list / type the clipboard
    exit                    Quit (or Ctrl-D)"#
    );
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

// ============================================
// REPL main loop
// ============================================

pub(crate) fn run_repl(notation: Notation, config: Config, opts: OutputOptions) -> RlResult<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(PolstepHelper));

    // Try to load history
    let history_path = dirs_home().map(|h| h.join(".polstep_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    println!("polstep-{} ({} notation)", VERSION, notation);
    println!("  Type 'exit' or Ctrl-D to quit, '.help' for usage");

    let mut session = Session::new(notation, config, opts);

    loop {
        let prompt = session.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                if let Action::Exit = session.handle_line(&line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C - clear the line, keep going
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D - exit
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}
