//! 距离向量路由仿真
//!
//! 读取拓扑、消息与变更文件，输出每个 epoch 的路由表与消息追踪结果。

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dvsim_rs::dv::RoutingOpts;
use dvsim_rs::report::SnapshotLogger;
use dvsim_rs::sim::{self, RunSummary, SimError, SimOpts, Simulator};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "distvec",
    about = "Distance-vector routing simulator: converge tables, apply link changes, trace messages"
)]
struct Args {
    /// Topology file: `nodeA nodeB cost` per line
    topology: PathBuf,

    /// Message file: `source destination <text>` per line
    messages: PathBuf,

    /// Change file: `nodeA nodeB cost` per line (`-999` removes the link)
    changes: PathBuf,

    /// Output file for routing tables and message traces
    #[arg(long, short, default_value = "output.txt")]
    output: PathBuf,

    /// Also write per-epoch snapshots as a JSON array
    #[arg(long)]
    json: Option<PathBuf>,

    /// Cap relaxation rounds per convergence (defaults to node count - 1)
    #[arg(long)]
    max_rounds: Option<usize>,
}

fn run(args: &Args) -> Result<RunSummary, SimError> {
    let links = sim::load_topology(&args.topology)?;
    let messages = sim::load_messages(&args.messages)?;
    let changes = sim::load_changes(&args.changes)?;
    info!(
        links = links.len(),
        messages = messages.len(),
        changes = changes.len(),
        "读取输入完成"
    );

    let opts = SimOpts {
        routing: RoutingOpts {
            round_limit: args.max_rounds,
        },
    };
    let mut simulator = Simulator::new(links, messages, opts);
    if args.json.is_some() {
        simulator.snapshots = Some(SnapshotLogger::default());
    }

    let file = File::create(&args.output).map_err(|source| SimError::Create {
        path: args.output.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    let summary = simulator.run(&changes, &mut out)?;

    if let (Some(path), Some(logger)) = (&args.json, &simulator.snapshots) {
        logger.write_to(path)?;
        eprintln!("wrote snapshots to {}", path.display());
    }
    Ok(summary)
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(summary) => {
            println!(
                "done: epochs={}, messages_traced={}, unreachable={}, output={}",
                summary.epochs,
                summary.messages_traced,
                summary.unreachable,
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "运行失败");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
