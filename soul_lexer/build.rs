// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    document: DocumentLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_state_depth: usize,
    max_zero_width_transitions: usize,
    max_logged_text_length: usize,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_document_lines: usize,
    max_line_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_memory_events: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOUL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SOUL_CONFIG_DIR");

    let profile = env::var("SOUL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SOUL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the soul_lexer directory
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
    const ABSOLUTE_MAX_STATE_DEPTH: usize = 10_000;

    // Endpoint braces and comments must still nest a few frames deep
    if config.lexical.max_state_depth < 4 {
        panic!("max_state_depth must be at least 4");
    }

    if config.lexical.max_state_depth > ABSOLUTE_MAX_STATE_DEPTH {
        panic!("max_state_depth exceeds absolute maximum");
    }

    // Root -> PossibleWrapClamp -> WrapClampKeyword is the longest rematch chain
    if config.lexical.max_zero_width_transitions < 3 {
        panic!("max_zero_width_transitions must be at least 3");
    }

    if config.logging.max_memory_events > config.logging.log_buffer_size {
        panic!("max_memory_events exceeds log_buffer_size");
    }

    if profile == "production" && config.lexical.max_state_depth > 1_000 {
        panic!("PRODUCTION: max_state_depth too high for production");
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
    pub mod lexical {{
        pub const MAX_STATE_DEPTH: usize = {};
        pub const MAX_ZERO_WIDTH_TRANSITIONS: usize = {};
        pub const MAX_LOGGED_TEXT_LENGTH: usize = {};
    }}

    pub mod document {{
        pub const MAX_DOCUMENT_LINES: usize = {};
        pub const MAX_LINE_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_MEMORY_EVENTS: usize = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.max_state_depth,
        config.lexical.max_zero_width_transitions,
        config.lexical.max_logged_text_length,
        // Document
        config.document.max_document_lines,
        config.document.max_line_length,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_memory_events,
    );

    fs::write(output_path, constants_code).unwrap();
}
