use args::Args;
use clap::Parser;
use svg_font::build::build_font;

mod args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        // RUST_LOG still wins over -v.
        .parse_default_env()
        .init();

    build_font(&args.config, &args.input, &args.output)?;

    Ok(())
}
