use clap::Parser;

use quickbill_cli::{Args, app};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    quickbill_observability::tracing::init(args.log_format);

    let generated = app::run(&args)?;
    println!("{}", generated.path.display());
    Ok(())
}
