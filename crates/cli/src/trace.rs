//! The `--tracing` flag prints synthesis statistics to stderr as
//! semi-structured `key=value` lines, so runs stay scriptable while the
//! grammar itself owns stdout.

use std::fmt;
use std::io::{Stderr, Write};
use std::sync::Mutex;

use anyhow::Result;
use clap::ValueEnum;

use gram_synth_core::{QueryCounter, Synthesis};

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
  /// Do not print any synthesis statistics
  #[default]
  Nothing = 0,
  /// Print run totals: passes, rewrites, considered candidates, queries
  Summary = 1,
}

impl fmt::Debug for Granularity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Granularity::Nothing => write!(f, "nothing"),
      Granularity::Summary => write!(f, "summary"),
    }
  }
}

impl Granularity {
  pub fn run_trace(&self) -> RunTrace {
    self.run_trace_impl(std::io::stderr())
  }

  fn run_trace_impl<W: Write>(&self, w: W) -> TraceInfo<W> {
    TraceInfo {
      level: *self,
      output: Mutex::new(w),
    }
  }
}

pub struct TraceInfo<W: Write> {
  level: Granularity,
  output: Mutex<W>,
}

impl<W: Write> TraceInfo<W> {
  fn print_summary<F>(&self, entity_type: &str, kv_write: F) -> Result<()>
  where
    F: FnOnce(&mut W) -> Result<()>,
  {
    if self.level < Granularity::Summary {
      return Ok(());
    }
    let mut w = self.output.lock().expect("lock should not be poisoned");
    write!(w, "gram-synth: {:?}|{entity_type}: ", self.level)?;
    kv_write(&mut *w)?;
    writeln!(w)?;
    Ok(())
  }

  pub fn print_synthesis<O>(&self, result: &Synthesis<QueryCounter<O>>) -> Result<()> {
    self.print_summary("synthesis", |w| {
      write!(
        w,
        "passCount={},rewriteCount={},consideredCount={},queryCount={}",
        result.passes(),
        result.rewrites(),
        result.considered(),
        result.oracle().count(),
      )?;
      Ok(())
    })
  }
}

pub type RunTrace = TraceInfo<Stderr>;
