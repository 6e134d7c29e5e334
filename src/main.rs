use anyhow::Result;
use clap::Parser;

use surgery_progress_report::cli::{Cli, normalize};
use surgery_progress_report::{logging, processor, snapshot, util};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  logging::init();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: load the snapshot
  let snap = snapshot::load_snapshot(&cfg.source)?;

  // Phase 3: render one view or the whole bundle
  processor::process(&cfg, &snap)
}
