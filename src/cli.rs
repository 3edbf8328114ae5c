use polstep::Notation;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) notation: Option<Notation>,
    pub(crate) json: bool,
    pub(crate) play: bool,
    pub(crate) trace: bool,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--prefix" | "-n" => {
                cli.notation = Some(Notation::Prefix);
            }
            "--postfix" | "-r" => {
                cli.notation = Some(Notation::Postfix);
            }
            "--json" => {
                cli.json = true;
            }
            "--play" => {
                cli.play = true;
            }
            "--trace" => {
                cli.trace = true;
            }
            "-c" => {
                // Everything after -c is the expression
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"polstep-{} Stepwise Polish notation calculator

USAGE:
    polstep                     Start interactive REPL
    polstep -c <expression>     Calculate one expression and print its steps
    polstep <file>              Calculate every line of a file
    polstep --help              Show this help message
    polstep --version           Show version

OPTIONS:
    -n, --prefix                Normal Polish notation:  + 3 4
    -r, --postfix               Reverse Polish notation: 3 4 +
    --json                      Print the steps as JSON
    --play                      Reveal one step at a time (Ctrl-C skips)
    --trace                     Debug logging on stderr

INPUT:
    Digits, '.', + - × / % and spaces. x, X and * mean ×, : means /.
    Spaces are inserted automatically between numbers and operators;
    a '-' directly before a digit is a negative number.

STARTUP:
    ~/.polsteprc                TOML config (notation, paste_interval_ms,
                                playback_delay_ms, color)
    POLSTEP_CONFIG              Config file location
    POLSTEP_NOTATION            prefix | postfix
    POLSTEP_LOG                 Log filter (e.g. debug, polstep=trace)
    NO_COLOR                    Disable colors

EXAMPLES:
    polstep --postfix -c 3 4 + 2 x      # ((3 + 4) × 2) = 14
    polstep --prefix -c "- x 2 3 4"     # ((2 × 3) - 4) = 2"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("polstep {}", VERSION);
}
