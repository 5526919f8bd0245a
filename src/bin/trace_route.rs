//! 单路径追踪模式
//!
//! 只追踪一对 (src, dst)，打印详细的收敛与逐跳信息。配合 `RUST_LOG=trace` 使用。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dvsim_rs::dv::{RoutingOpts, trace};
use dvsim_rs::net::{Network, NodeId};
use dvsim_rs::sim::{self, SimError};
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "trace-route", about = "单路径追踪模式：收敛后追踪一对节点之间的路由")]
struct Args {
    /// 拓扑文件
    #[arg(long)]
    topology: PathBuf,
    /// 可选的变更文件，全部施加后再追踪
    #[arg(long)]
    changes: Option<PathBuf>,
    #[arg(long, allow_negative_numbers = true)]
    src: i64,
    #[arg(long, allow_negative_numbers = true)]
    dst: i64,
}

fn run(args: &Args) -> Result<(), SimError> {
    let opts = RoutingOpts::default();
    let mut net = Network::from_links(sim::load_topology(&args.topology)?);
    info!(nodes = net.node_count(), links = net.links().len(), "构建拓扑");
    net.ensure_converged(&opts);

    if let Some(path) = &args.changes {
        for change in sim::load_changes(path)? {
            change.apply(&mut net);
            net.ensure_converged(&opts);
        }
    }

    let (src, dst) = (NodeId(args.src), NodeId(args.dst));
    if let Some(table) = net.table(src) {
        debug!(node = %src, routes = table.len(), "源节点路由表");
        for (d, entry) in table.iter() {
            println!("{} {} {}", d, entry.next_hop, entry.cost);
        }
    }

    match trace(&net, src, dst) {
        Ok(route) => {
            let path: Vec<String> = route.path.iter().map(ToString::to_string).collect();
            println!("{src} -> {dst}: cost {} path {}", route.cost, path.join(" "));
        }
        Err(why) => println!("{src} -> {dst}: unreachable ({why})"),
    }
    info!(
        convergences = net.stats.convergences,
        relaxation_rounds = net.stats.relaxation_rounds,
        "追踪完成"
    );
    Ok(())
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
    if let Err(e) = run(&args) {
        error!(error = %e, "运行失败");
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
