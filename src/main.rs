//! ACL Rollout CLI
//!
//! Usage:
//!   acl-rollout [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --template <FILE>      Cisco layout template (handlebars)
//!       --template-dir <DIR>   Directory of <name>.tmpl layout templates
//!   -c, --config <FILE>        Push configuration (TOML format)
//!   -w, --workers <N>          Render worker count
//!       --strict-vendors       Report devices with unsupported vendors
//!       --print-layout         Print the bundled Cisco layout
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use acl_rollout::template::CISCO_ACL_LAYOUT;
use acl_rollout::{AclPushItem, PushConfig, PushPreparer, TemplateRegistry, UnknownVendorPolicy};

#[derive(Parser)]
#[command(name = "acl-rollout")]
#[command(about = "Render canary and global ACL configs for multi-vendor devices")]
struct Cli {
    /// Push items as a JSON array (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Cisco layout template file (handlebars); the bundled layout is used otherwise
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory holding <name>.tmpl layout templates
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Push configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of render workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Report devices whose vendor has no renderer instead of emitting empty configs
    #[arg(long)]
    strict_vendors: bool,

    /// Print the bundled Cisco layout template and exit
    #[arg(long)]
    print_layout: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.print_layout {
        println!("{}", CISCO_ACL_LAYOUT);
        return;
    }

    // Load configuration, command line flags win
    let mut config = match &cli.config {
        Some(path) => match PushConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => PushConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if cli.strict_vendors {
        config = config.with_unknown_vendor(UnknownVendorPolicy::Reject);
    }

    // Compile the layout before touching any input; a bad template is fatal
    let mut registry = match &cli.template_dir {
        Some(dir) => TemplateRegistry::with_base_path(dir.clone()),
        None => TemplateRegistry::with_builtins(),
    };
    if let Some(path) = &cli.template {
        if let Err(e) = registry.override_from_file(config.cisco_template.clone(), path) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
    let preparer = match PushPreparer::from_provider(&registry, config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}; refusing to start", e);
            process::exit(1);
        }
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let items: Vec<AclPushItem> = match serde_json::from_str(&source) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error parsing push items: {}", e);
            process::exit(1);
        }
    };

    let result = preparer.prepare(&items);
    let errors: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    let output = json!({
        "canary": result.canary(),
        "global": result.global(),
        "errors": errors,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    if !result.is_clean() {
        process::exit(2);
    }
}
