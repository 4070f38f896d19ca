use clap::Parser;
use fastsearch_uninstall_lib::{commands, modules};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "fastsearch-uninstall")]
#[command(about = "FastSearch 服务卸载工具", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    modules::common::logging::init_logging(cli.verbose);

    let result = match cli.command {
        commands::Command::Uninstall(cmd) => commands::uninstall::execute(cmd),
        commands::Command::Inspect(cmd) => commands::inspect::execute(cmd),
    };

    if let Err(e) = result {
        if cli.verbose {
            tracing::error!("错误: {:#}", e);
        }
        eprintln!("错误: {}", e);
        process::exit(1);
    }
}
