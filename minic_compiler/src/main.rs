use minic_compiler::config::runtime::RuntimeConfig;
use minic_compiler::logging::{self, codes, Diagnostic};
use minic_compiler::pipeline::{self, FileCompilation, OutputTargets};
use minic_compiler::utils::SourceMap;
use std::env;
use std::path::PathBuf;

/// Command line options of the `minic` driver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    input: PathBuf,
    output: Option<PathBuf>,
    trace: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("minic");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error[{}]: {}", codes::driver::USAGE_ERROR, message);
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let loaded = match &options.config {
        Some(path) => RuntimeConfig::load(path),
        None => RuntimeConfig::from_env(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            std::process::exit(1);
        }
    };
    if options.json {
        config.driver.json_diagnostics = true;
    }

    logging::init_global_logging(&config.logging)?;

    let targets = OutputTargets {
        output: options.output.clone(),
        trace: options.trace.clone(),
    };

    match pipeline::process_file(&options.input, &targets, &config) {
        Ok(result) if result.is_success() => {
            let output = result
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!("Compiled {} -> {}", options.input.display(), output);
            Ok(())
        }
        Ok(result) => {
            report_failure(&result, config.driver.json_diagnostics)?;
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            std::process::exit(1);
        }
    }
}

fn report_failure(
    result: &FileCompilation,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let diagnostics = result.compilation.diagnostics();

    if json {
        println!("{}", result.compilation.diagnostics_json()?);
        return Ok(());
    }

    eprintln!("Compilation failed with {} error(s)", diagnostics.len());
    let source_map = SourceMap::new(result.source.clone());
    for diagnostic in diagnostics {
        eprintln!("{}", render_diagnostic(diagnostic, Some(&source_map)));
    }
    if let Some(path) = &result.trace_path {
        eprintln!("Trace written to {}", path.display());
    }
    Ok(())
}

/// One diagnostic line, followed by the offending source line when known
fn render_diagnostic(diagnostic: &Diagnostic, source_map: Option<&SourceMap>) -> String {
    match (diagnostic.span, source_map) {
        (Some(span), Some(map)) => {
            format!("{}\n{}", diagnostic, map.format_error(&span, diagnostic.description()))
        }
        _ => diagnostic.to_string(),
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut input: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                options.help = true;
                return Ok(options);
            }
            "-o" | "--output" => {
                options.output = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            }
            "--trace" => {
                options.trace = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            }
            "--config" => {
                options.config = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            }
            "--json" => {
                options.json = true;
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if input.is_some() {
                    return Err(format!("Unexpected extra argument '{}'", path));
                }
                input = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    options.input = input.ok_or_else(|| "Missing input file".to_string())?;
    Ok(options)
}

fn option_value(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", args[i]))
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <input> [-o <output>] [--trace <log>] [--json] [--config <file.toml>]",
        program_name
    );
}

fn print_help(program_name: &str) {
    println!("minic v{}", env!("CARGO_PKG_VERSION"));
    println!("Translates a small C subset into Python");
    println!();
    println!("USAGE:");
    println!(
        "    {} <input> [-o <output>] [--trace <log>] [--json] [--config <file.toml>]",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <file>    Generated Python (default: <input>.py)");
    println!("    --trace <file>         Trace log (default: <input>.log)");
    println!("    --json                 Print diagnostics as JSON");
    println!("    --config <file.toml>   Load runtime preferences from TOML");
    println!("    -h, --help             Show this help message");
    println!();
    println!("EXIT STATUS:");
    println!("    0 on success, 1 on usage error, unreadable input or any diagnostic");
    println!();
    println!(
        "Limits: {}",
        minic_compiler::config::build_info::source_info()
    );
}
