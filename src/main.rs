//! accessor-bridge: generate setter/getter assignments between two types
//! from a host snapshot and insert them below the caret line.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use accessor_bridge::core::insert::LineBuffer;
use accessor_bridge::mapping::host::{BufferEditor, LogNotifier};
use accessor_bridge::mapping::snapshot::{load_snapshot, HostSnapshot, InMemoryHost};
use accessor_bridge::{BridgeAction, BridgeConfig};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "accessor-bridge")]
#[command(about = "Generate target.setX(source.getX()) assignments below the caret line")]
struct Cli {
    /// -v for info, -vv for debug output.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Insert the assignments and print (or write back) the buffer.
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// Overwrite the buffer file instead of printing to stdout.
        #[arg(long)]
        write: bool,
    },
    /// Print the assignments that would be inserted, leave the buffer alone.
    Preview {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Host snapshot (.toon or .json): imports, type fields, clipboard, selection, caret line.
    #[arg(long, value_name = "FILE")]
    snapshot: PathBuf,
    /// Source file the assignments go into.
    #[arg(long, value_name = "FILE")]
    buffer: PathBuf,
    /// Zero-based caret line; overrides the snapshot.
    #[arg(long)]
    caret_line: Option<usize>,
    /// Source type name; overrides the snapshot clipboard.
    #[arg(long)]
    clipboard: Option<String>,
    /// Target type name; overrides the snapshot selection.
    #[arg(long)]
    selection: Option<String>,
    /// Bridge configuration (.toon or .json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

struct Loaded {
    action: BridgeAction,
    host: InMemoryHost,
    editor: BufferEditor,
}

impl InputArgs {
    fn load(&self) -> anyhow::Result<Loaded> {
        let config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                BridgeConfig::load(path, &text)?
            }
            None => BridgeConfig::default(),
        };

        let text = fs::read_to_string(&self.snapshot)
            .with_context(|| format!("reading {}", self.snapshot.display()))?;
        let mut snapshot: HostSnapshot = load_snapshot(&self.snapshot, &text)?;
        if let Some(line) = self.caret_line {
            snapshot.caret_line = line;
        }
        if let Some(clipboard) = &self.clipboard {
            snapshot.clipboard = Some(clipboard.clone());
        }
        if let Some(selection) = &self.selection {
            snapshot.selection = Some(selection.clone());
        }

        let source = fs::read_to_string(&self.buffer)
            .with_context(|| format!("reading {}", self.buffer.display()))?;
        let editor = BufferEditor::new(LineBuffer::new(&source), snapshot.caret_line, snapshot.selection.clone());

        Ok(Loaded {
            action: BridgeAction::new(config),
            host: InMemoryHost::new(snapshot),
            editor,
        })
    }
}

fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Generate { input, write } => {
            let Loaded { action, host, mut editor } = input.load()?;
            if action.run(&host, &mut editor, &LogNotifier).is_err() {
                return Ok(ExitCode::FAILURE);
            }

            let output = editor.into_buffer().into_string();
            if write {
                fs::write(&input.buffer, output).with_context(|| format!("writing {}", input.buffer.display()))?;
            } else {
                print!("{output}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Preview { input } => {
            let Loaded { action, host, editor } = input.load()?;
            let Ok(plan) = action.plan(&host, &editor, &LogNotifier) else {
                return Ok(ExitCode::FAILURE);
            };

            println!("// {} -> {}", plan.source_type, plan.target_type);
            for statement in &plan.statements {
                println!("{}{}", plan.anchor_indent, statement);
            }
            for field in &plan.unmatched_source {
                println!("// unused source field: {field}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    execute(cli)
}
