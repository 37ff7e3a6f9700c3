// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    emission: EmissionLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_token_count: usize,
}

#[derive(serde::Deserialize)]
struct EmissionLimits {
    default_indent_width: usize,
    max_indent_width: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MINIC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=MINIC_CONFIG_DIR");

    let profile = env::var("MINIC_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("MINIC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives at the workspace root (parent of minic_compiler)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("max_file_size exceeds absolute maximum");
    }

    if config.lexical.max_token_count == 0 {
        panic!("max_token_count must be greater than zero");
    }

    if config.emission.default_indent_width == 0
        || config.emission.default_indent_width > config.emission.max_indent_width
    {
        panic!("default_indent_width must be within 1..=max_indent_width");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
    }}

    pub mod lexical {{
        pub const MAX_TOKEN_COUNT: usize = {};
    }}

    pub mod emission {{
        pub const DEFAULT_INDENT_WIDTH: usize = {};
        pub const MAX_INDENT_WIDTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.lexical.max_token_count,
        config.emission.default_indent_width,
        config.emission.max_indent_width,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
