//! Playbook CLI
//!
//! Inspect a catalog, score formations and generate playbooks offline.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "playbook")]
#[command(about = "Match formations with concepts and generate playbooks", long_about = None)]
struct Cli {
    /// Catalog file (.json/.yaml/.yml); the built-in catalog when omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List formations with their analyzed context
    Formations,

    /// List concepts
    Concepts {
        /// Only "pass" or "run" concepts
        #[arg(long)]
        r#type: Option<String>,
    },

    /// Score every concept against one formation
    Score {
        /// Formation key
        #[arg(long)]
        formation: String,

        /// Include concepts below the viability floor
        #[arg(long, default_value = "false")]
        all: bool,
    },

    /// Generate a playbook
    Generate {
        /// Formation key (repeatable, allocation order)
        #[arg(long = "formation", required = true)]
        formations: Vec<String>,

        /// Target play count
        #[arg(long)]
        count: Option<usize>,

        /// Fraction of pass plays (0-1)
        #[arg(long)]
        ratio: Option<f64>,

        /// Let the fill pass reuse a concept for a different formation
        #[arg(long, default_value = "false")]
        reuse: bool,

        /// Build route/block geometry for every play
        #[arg(long, default_value = "false")]
        materialize: bool,

        /// Output JSON file path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Verify the output checksum after writing
        #[arg(long, default_value = "false")]
        verify: bool,
    },

    /// Print the JSON schema of a playbook request
    Schema {
        /// Output file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use playbook_core::{
        analyze_formation, materialize_selected, plan_playbook, ActionBuilder, ConceptReuse,
        FormationLookup, GenerateOptions, PlannerConfig, SystemClock, UuidIds,
    };
    use playbook_core::builder::routes::RouteRegistry;
    use playbook_core::models::ConceptType;
    use playbook_cli::{load_catalog, write_export, PlaybookExport, EXPORT_SCHEMA_VERSION};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let config = PlannerConfig::from_env()?;
    log::info!(
        "Catalog: {} formations, {} concepts",
        catalog.formations.len(),
        catalog.concepts.len()
    );

    match cli.command {
        Commands::Formations => {
            println!("{:<16} {:<18} {:<8} {:<10} RECEIVERS", "KEY", "NAME", "PERS", "STRUCTURE");
            for (key, spec) in &catalog.formations {
                let ctx = analyze_formation(spec);
                println!(
                    "{:<16} {:<18} {:<8} {:<10} {}",
                    key,
                    spec.name,
                    ctx.personnel,
                    ctx.structure.code(),
                    ctx.receiver_count
                );
            }
        }

        Commands::Concepts { r#type } => {
            let wanted = match r#type.as_deref() {
                None => None,
                Some("pass") => Some(ConceptType::Pass),
                Some("run") => Some(ConceptType::Run),
                Some(other) => anyhow::bail!("Unknown concept type '{}', expected pass or run", other),
            };
            for concept in catalog.concepts.iter().filter(|c| wanted.map_or(true, |t| c.concept_type == t)) {
                println!(
                    "{:<20} {:<5} {:<14} {}",
                    concept.id,
                    concept.concept_type.as_str(),
                    concept.category.as_deref().unwrap_or("-"),
                    concept.name
                );
            }
        }

        Commands::Score { formation, all } => {
            let Some(spec) = catalog.formation(&formation) else {
                anyhow::bail!("Unknown formation '{}'", formation);
            };
            let ctx = analyze_formation(spec);
            println!("🏈 {} ({} personnel, {})", spec.name, ctx.personnel, ctx.structure.code());

            let floor = if all { 0 } else { config.viability_floor };
            for scored in playbook_core::rank_concepts(&catalog.concepts, &ctx, floor) {
                println!(
                    "   {:>3}  {:<20} {}",
                    scored.score.score,
                    scored.concept.id,
                    scored.score.rationale.join("; ")
                );
            }
        }

        Commands::Generate { formations, count, ratio, reuse, materialize, out, metadata, verify } => {
            let mut config = config;
            if reuse {
                config.concept_reuse = ConceptReuse::AcrossFormations;
            }
            let mut options = GenerateOptions::new(formations);
            options.target_play_count = count;
            options.pass_run_ratio = ratio;

            println!("🔨 Generating playbook...");
            println!("   Formations: {}", options.formations.join(", "));
            println!("   Target:     {}", options.target(&config));
            println!("   Pass ratio: {:.2}", options.ratio(&config));

            let mut ids = UuidIds;
            let plays = plan_playbook(&catalog, &catalog.concepts, &options, &config, &mut ids);
            let documents = if materialize {
                let builder = ActionBuilder::new(RouteRegistry::standard(), config.yard_scale);
                materialize_selected(&plays, &catalog, &builder, &mut ids, &SystemClock)
            } else {
                Vec::new()
            };

            println!("\n✅ {} plays generated", plays.len());
            for play in &plays {
                println!("   {:>3}  {:<6} {}", play.score, play.concept.concept_type.as_str(), play.name);
            }
            if plays.len() < options.target(&config) {
                println!("   (viable concepts ran out before the target)");
            }

            if let Some(path) = out {
                let export = PlaybookExport {
                    schema_version: EXPORT_SCHEMA_VERSION.to_string(),
                    formations: options.formations.clone(),
                    plays,
                    documents,
                };
                let meta = write_export(&path, &export)?;
                println!("\n📄 Playbook saved to: {}", path.display());
                println!("   Checksum: {}", meta.checksum);

                if verify {
                    verify_export_integrity(&path, &meta.checksum)?;
                }
                if let Some(metadata_path) = metadata {
                    std::fs::write(&metadata_path, serde_json::to_string_pretty(&meta)?)?;
                    println!("📄 Metadata saved to: {}", metadata_path.display());
                }
            }
        }

        Commands::Schema { out } => {
            let schema = playbook_core::playbook_request_schema();
            match out {
                Some(path) => {
                    std::fs::write(&path, schema)?;
                    println!("📄 Schema saved to: {}", path.display());
                }
                None => println!("{}", schema),
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn verify_export_integrity(path: &std::path::Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying export integrity...");
    if playbook_cli::verify_export(path, checksum)? {
        println!("✅ Export verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Export verification failed - checksum mismatch!")
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("playbook CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
