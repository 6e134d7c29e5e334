// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, effective now, output writing, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime; paths; clap CommandFactory
// outputs: Canonicalized paths, output files or stdout, directories ensured, man page text
// side_effects: write_output and prepare_out_dir touch the filesystem
// invariants:
// - prepare_out_dir returns an existing directory (either provided or temp timestamped)
// - write_output with "-" prints to stdout and creates nothing
// errors: IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::CommandFactory;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current time is used. Centralizes our handling of test
/// determinism without sprinkling `Utc::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Write `body` to `out`: "-" prints to stdout, anything else is a file path
/// whose parent directories are created on demand.
pub fn write_output(out: &str, body: &str) -> Result<()> {
  if out == "-" {
    println!("{}", body);
    return Ok(());
  }
  let path = Path::new(out);
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
  tracing::info!(path = %path.display(), "wrote output");
  Ok(())
}

/// Prepare an output directory for `--view all` runs.
///
/// - When `out` is not "-", it is treated as the target directory; it will be created if needed.
/// - When `out` is "-", a temp directory is created with a timestamped name.
///   Returns the absolute path as a String.
pub fn prepare_out_dir(out: &str, now: DateTime<Utc>) -> Result<String> {
  let dir = if out != "-" {
    out.to_string()
  } else {
    std::env::temp_dir()
      .join(format!("surgery-report-{}", now.format("%Y%m%d-%H%M%S")))
      .to_string_lossy()
      .to_string()
  };
  std::fs::create_dir_all(&dir).with_context(|| format!("creating output directory {dir}"))?;

  Ok(dir)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
