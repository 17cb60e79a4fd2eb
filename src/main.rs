use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cfg = mandala_garden::config::Config::parse();
    mandala_garden::app::run(cfg)
}
