use std::sync::atomic::{AtomicUsize, Ordering};

/// A membership oracle classifies candidate strings as inside or outside the
/// target language.
///
/// The synthesizer treats the oracle as a pure, deterministic, total
/// predicate: identical inputs must yield identical answers, and a query must
/// not observe synthesis state. Implementations are responsible for
/// translating any internal failure into `false`; an oracle never errors
/// from the synthesizer's point of view.
pub trait Oracle {
  fn accepts(&self, candidate: &str) -> bool;
}

impl<F> Oracle for F
where
  F: Fn(&str) -> bool,
{
  fn accepts(&self, candidate: &str) -> bool {
    self(candidate)
  }
}

/// Counts the queries issued to an inner oracle.
///
/// The count is observable while the synthesizer still owns the oracle, so
/// callers can report query totals without threading state through the
/// search.
#[derive(Debug, Default)]
pub struct QueryCounter<O> {
  inner: O,
  queries: AtomicUsize,
}

impl<O> QueryCounter<O> {
  pub fn new(inner: O) -> Self {
    Self {
      inner,
      queries: AtomicUsize::new(0),
    }
  }

  pub fn count(&self) -> usize {
    self.queries.load(Ordering::Acquire)
  }
}

impl<O: Oracle> Oracle for QueryCounter<O> {
  fn accepts(&self, candidate: &str) -> bool {
    self.queries.fetch_add(1, Ordering::AcqRel);
    self.inner.accepts(candidate)
  }
}
