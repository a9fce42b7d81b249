use clap::{Parser, Subcommand};
use blockfunc::editor::events::EventJournal;
use blockfunc::editor::repair::{self, RepairQueue};
use blockfunc::functions::{propagate, registry, validate};
use blockfunc::model::{Block, Workspace};
use blockfunc::model::builder::WorkspaceBuilder;
use blockfunc::model::loader;
use blockfunc::model::signature::{ArgType, Signature};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample workspace document to play with
    Demo {
        /// Output path for the workspace YAML file
        #[arg(long, short, default_value = "workspace.yaml")]
        out: PathBuf,
    },
    /// List the functions defined in a workspace document
    Inspect {
        /// Path to the workspace YAML file
        file: PathBuf,
    },
    /// Validate a candidate signature against a workspace
    Validate {
        /// Path to the workspace YAML file
        file: PathBuf,
        /// Signature payload (JSON), or a path to a file holding one
        signature: String,
    },
    /// Apply a new signature to a function and all of its callers
    Mutate {
        /// Path to the workspace YAML file
        file: PathBuf,
        /// Current name of the function to mutate
        name: String,
        /// New signature payload (JSON), or a path to a file holding one
        signature: String,
        /// Where to write the mutated workspace (in place when omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Demo { out } => {
            let workspace = sample_workspace();
            loader::save_workspace_to_yaml(&workspace, &out.to_string_lossy())?;
            info!("Wrote sample workspace to {:?}", out);
        }
        Commands::Inspect { file } => {
            let workspace = loader::load_workspace_from_yaml(&file.to_string_lossy())?;
            info!("Loaded workspace {} with {} blocks", workspace.id, workspace.blocks.len());

            for def_id in registry::all_definitions(&workspace) {
                if let Some(signature) = workspace.block(def_id).and_then(|b| b.signature()) {
                    let callers = registry::find_callers(&workspace, &signature.name).len();
                    println!("{}  [{} caller(s)]", signature, callers);
                }
            }
        }
        Commands::Validate { file, signature } => {
            let workspace = loader::load_workspace_from_yaml(&file.to_string_lossy())?;
            let candidate = read_signature(signature)?;

            match validate::validate_signature(&workspace, &candidate) {
                Ok(()) => println!("ok: {}", candidate),
                Err(reason) => {
                    println!("rejected: {}", reason);
                    std::process::exit(1);
                }
            }
        }
        Commands::Mutate { file, name, signature, out } => {
            let mut workspace = loader::load_workspace_from_yaml(&file.to_string_lossy())?;
            let new_signature = read_signature(signature)?;

            // Headless run: a local journal and repair queue stand in for the
            // editing session, and repairs are flushed immediately.
            let mut journal = EventJournal::new();
            let mut repairs = RepairQueue::new();
            let mutated = propagate::mutate_callers_and_definition(
                &mut workspace,
                &mut journal,
                &mut repairs,
                name,
                &new_signature,
            )?;
            if !mutated {
                println!("no function named {:?}", name);
                std::process::exit(1);
            }
            for task in repairs.drain() {
                repair::apply(&mut workspace, &mut journal, &task);
            }

            // One JSON line per event, for piping.
            for event in journal.drain() {
                println!("{}", serde_json::to_string(&event)?);
            }

            let target = out.as_ref().unwrap_or(file);
            loader::save_workspace_to_yaml(&workspace, &target.to_string_lossy())?;
            info!("Wrote mutated workspace to {:?}", target);
        }
    }

    Ok(())
}

fn sample_workspace() -> Workspace {
    let signature = Signature::new("doStuff")
        .arg("a", ArgType::Number)
        .arg("b", ArgType::Text);

    WorkspaceBuilder::new("demo")
        .variable("score")
        .definition(signature.clone())
        .statement_with_reporter("text_print", ArgType::Number, "a")
        .reporter(ArgType::Text, "b")
        .build()
        .call(&signature)
        .value("a", Block::plain("math_number"))
        .build()
        .build()
}

fn read_signature(raw: &str) -> anyhow::Result<Signature> {
    let payload = if Path::new(raw).exists() {
        std::fs::read_to_string(raw)?
    } else {
        raw.to_string()
    };
    Signature::from_payload(payload.trim())
}
