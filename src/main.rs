use clap::Parser as _;

mod cli;
mod config;
mod events;
mod headless;
mod records;
mod view;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);
    cli::run(cli)
}

fn init_logging(verbosity: u8) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbosity {
        0 => {}
        1 => {
            logger.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            logger.filter_level(log::LevelFilter::Trace);
        }
    }
    logger.init();
}
