use clap::Parser;

use activity_service::cli::{Cli, Commands, ConfigCommands};
use activity_service::config::{get_config, init_config_from};
use activity_service::runtime::lifetime::startup::describe_startup_error;
use activity_service::runtime::modes::{run_config_generate, run_server};
use activity_service::system::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 配置生成不需要加载配置和日志
    match cli.command {
        Some(Commands::ConfigGen { output_path, force })
        | Some(Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        }) => {
            if let Err(e) = run_config_generate(output_path, force) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            return;
        }
        Some(Commands::Serve) | None => {}
    }

    init_config_from(&cli.config);
    let config = get_config();

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server().await {
        tracing::error!("Server exited with error: {:#}", e);
        eprintln!("{}", describe_startup_error(&e));
        std::process::exit(1);
    }
}
