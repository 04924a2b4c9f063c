// phplite: run a script file and write its output to stdout

use std::fs;
use std::process::ExitCode;

use phplite::terminal::StdTerminal;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("phplite");

    if args.len() != 2 {
        eprintln!("Usage: {} <file.php>", program_name);
        eprintln!("Example: {} script.php", program_name);
        return ExitCode::FAILURE;
    }

    phplite::init_tracing();

    let path = &args[1];
    let source = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(path = %path, bytes = source.len(), "read script");

    match phplite::run_source(&source, StdTerminal::stdio()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
