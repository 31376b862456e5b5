use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Html,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List expiring domains ranked by value (default if no subcommand)
    List {
        /// Emit tab-separated values for piping (score, domain, tier, value)
        #[arg(long)]
        tsv: bool,
        /// Rank the dismissed domains instead of the active list
        #[arg(long)]
        dismissed: bool,
    },
    /// Export the ranked list as JSON, CSV or HTML
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Open a domain's WHOIS page in the browser by its index number
    Open {
        /// Index number of the domain to open (1-based, as shown in list)
        index: usize,
    },
    /// Hide a domain from future listings
    Dismiss {
        /// Domain to dismiss, e.g. spamfarm.xyz
        domain: String,
        /// How long to hide it, e.g. "3d" or "2w" (indefinite if omitted)
        #[arg(long = "for", value_name = "DURATION")]
        duration: Option<String>,
    },
    /// Remove a domain from the dismissed list
    Undismiss {
        /// Domain to restore
        domain: String,
    },
    /// Show currently dismissed domains
    Dismissed,
    /// Remove all cached listing pages
    ClearCache,
    /// Create a starter config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(about = "Expiring domain valuation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/domain-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Skip the listing-page cache and always fetch
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        tsv: false,
        dismissed: false,
    });
    let start_time = Instant::now();

    // Commands that don't touch config or network
    match &command {
        Commands::Init => {
            let config_path = cli.config.as_ref().map(PathBuf::from);
            if let Err(e) = domain_scout::config::run_init_wizard(config_path) {
                eprintln!("Init failed: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::ClearCache => {
            if let Err(e) = domain_scout::scrape::clear_cache() {
                eprintln!("Failed to clear cache: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Cache cleared.");
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Dismiss { domain, duration } => {
            let until = match duration {
                None => None,
                Some(raw) => match humantime::parse_duration(raw) {
                    Ok(d) => match chrono::Duration::from_std(d) {
                        Ok(d) => Some(Utc::now() + d),
                        Err(e) => {
                            eprintln!("Invalid duration '{}': {}", raw, e);
                            std::process::exit(EXIT_CONFIG);
                        }
                    },
                    Err(e) => {
                        eprintln!("Invalid duration '{}': {}", raw, e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
            };

            let path = domain_scout::dismiss::get_dismiss_path();
            let mut state = match domain_scout::dismiss::load_dismiss_state(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to load dismiss state: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            state.dismiss(domain.clone(), until);
            if let Err(e) = domain_scout::dismiss::save_dismiss_state(&path, &state) {
                eprintln!("Failed to save dismiss state: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            match until {
                Some(until) => println!("Dismissed {} until {}", domain, until.format("%Y-%m-%d %H:%M UTC")),
                None => println!("Dismissed {} indefinitely", domain),
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Undismiss { domain } => {
            let path = domain_scout::dismiss::get_dismiss_path();
            let mut state = match domain_scout::dismiss::load_dismiss_state(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to load dismiss state: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if state.undismiss(domain) {
                if let Err(e) = domain_scout::dismiss::save_dismiss_state(&path, &state) {
                    eprintln!("Failed to save dismiss state: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
                println!("Restored {}", domain);
            } else {
                println!("{} was not dismissed.", domain);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Dismissed => {
            let path = domain_scout::dismiss::get_dismiss_path();
            let state = match domain_scout::dismiss::load_dismiss_state(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to load dismiss state: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if state.entries().is_empty() {
                println!("No dismissed domains.");
            } else {
                let mut entries: Vec<_> = state.entries().iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                for (domain, entry) in entries {
                    println!("{}  ({})", domain, entry.format_remaining());
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match domain_scout::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Loaded {} sources from config", config.sources.len());
        for (i, source) in config.sources.iter().enumerate() {
            eprintln!(
                "  Source {}: {} ({})",
                i + 1,
                source.name.as_deref().unwrap_or("(unnamed)"),
                source.url
            );
        }
    }

    // Validate valuation config at startup
    let effective_valuation = config.valuation.clone().unwrap_or_default();
    if let Err(errors) = domain_scout::valuation::validate_valuation(&effective_valuation) {
        eprintln!("Valuation config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Check if any sources are configured
    if config.sources.is_empty() {
        eprintln!("No sources configured in config file.");
        eprintln!("Add listing pages to ~/.config/domain-scout/config.yaml:");
        eprintln!("  sources:");
        eprintln!("    - name: pending-delete");
        eprintln!("      url: \"https://member.expireddomains.net/domains/pendingdelete/\"");
        std::process::exit(EXIT_CONFIG);
    }

    let cache_ttl = match domain_scout::config::parse_cache_ttl(&config) {
        Ok(ttl) => ttl,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Setup session cookie (prompts on first run)
    let session = match domain_scout::credentials::setup_session_if_missing() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    if cli.verbose {
        eprintln!("Session cookie resolved");
    }

    // Create scrape client
    let client = match domain_scout::scrape::create_client(&session) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create scrape client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    // Load dismiss state (expired entries drop out on the next save)
    let dismiss_path = domain_scout::dismiss::get_dismiss_path();
    let mut dismiss_state = match domain_scout::dismiss::load_dismiss_state(&dismiss_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load dismiss state: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    dismiss_state.clean_expired();

    let cache_config = domain_scout::scrape::CacheConfig::new(!cli.no_cache, cache_ttl);

    let (active, dismissed) = match domain_scout::fetch::fetch_and_score_domains(
        &client,
        &config,
        &effective_valuation,
        &dismiss_state,
        &cache_config,
        cli.verbose,
    )
    .await
    {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    match command {
        Commands::List {
            tsv,
            dismissed: show_dismissed,
        } => {
            let results = if show_dismissed { &dismissed } else { &active };

            if tsv {
                println!("{}", domain_scout::output::format_tsv(results));
            } else {
                let use_colors = domain_scout::output::should_use_colors();

                if cli.verbose && !results.is_empty() {
                    // Verbose mode: detailed output with factor breakdowns
                    for result in results {
                        println!("{}", domain_scout::output::format_detail(result, use_colors));
                        println!();
                    }
                } else {
                    let output = domain_scout::output::format_ranked_table(results, use_colors);
                    println!("{}", output);
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} domains in {:?}",
                    results.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Export { format, out } => {
            let rendered = match format {
                ExportFormat::Json => match domain_scout::report::to_json(&active) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Export failed: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
                ExportFormat::Csv => domain_scout::report::to_csv(&active),
                ExportFormat::Html => domain_scout::report::to_html(&active),
            };

            match out {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, rendered) {
                        eprintln!("Failed to write {}: {}", path.display(), e);
                        std::process::exit(EXIT_CONFIG);
                    }
                    println!("Wrote {} domains to {}", active.len(), path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Open { index } => {
            // Validate index bounds (1-based)
            if index < 1 || index > active.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    active.len()
                );
                std::process::exit(EXIT_CONFIG);
            }

            let result = &active[index - 1];
            let url = domain_scout::browser::whois_url(&result.domain);

            if let Err(e) = domain_scout::browser::open_url(&url) {
                eprintln!("Failed to open browser: {}", e);
                std::process::exit(EXIT_NETWORK);
            }

            println!("Opening {} in browser: {}", result.domain, url);
        }
        // Handled before the pipeline runs
        Commands::Init
        | Commands::ClearCache
        | Commands::Dismiss { .. }
        | Commands::Undismiss { .. }
        | Commands::Dismissed => unreachable!(),
    }

    std::process::exit(EXIT_SUCCESS);
}
