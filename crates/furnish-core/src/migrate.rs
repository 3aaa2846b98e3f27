//! One-shot schema evolution for the user collection.
//!
//! [`PIPELINE`] is a fixed, ordered list of steps. [`run`] applies them in
//! order and stops at the first failure; there is no version table and no
//! rollback.

use std::fmt;

use thiserror::Error;

use crate::{
  store::UserStore,
  user::{self, NewUser},
};

pub const SAMPLE_NAME: &str = "John Doe";
pub const SAMPLE_EMAIL: &str = "john.doe@example.com";

/// Value written by [`Migration::BackfillAge`].
pub const DEFAULT_AGE: i64 = 0;

/// A named schema evolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
  /// Insert one sample user, but only into an empty collection.
  SeedSampleUser,
  /// Set `age` to [`DEFAULT_AGE`] on every document. Overwrites.
  BackfillAge,
}

/// Steps in the order they are applied.
pub const PIPELINE: [Migration; 2] = [Migration::SeedSampleUser, Migration::BackfillAge];

/// What a successful step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
  /// The sample user was inserted.
  Seeded,
  /// The collection already held documents; nothing was inserted.
  SeedSkipped { existing: u64 },
  /// `age` was set on this many documents.
  Backfilled { matched: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
  pub step:    Migration,
  pub outcome: StepOutcome,
}

#[derive(Debug, Error)]
#[error("migration step `{step}` failed: {source}")]
pub struct MigrationError<E> {
  pub step:   Migration,
  #[source]
  pub source: E,
}

impl Migration {
  pub fn name(self) -> &'static str {
    match self {
      Self::SeedSampleUser => "seed-sample-user",
      Self::BackfillAge => "backfill-age",
    }
  }

  /// Apply this single step to `store`.
  pub async fn apply<S: UserStore>(self, store: &S) -> Result<StepOutcome, S::Error> {
    match self {
      Self::SeedSampleUser => {
        let existing = store.count().await?;
        if existing > 0 {
          return Ok(StepOutcome::SeedSkipped { existing });
        }
        store
          .insert(NewUser::stamped(SAMPLE_NAME, SAMPLE_EMAIL, DEFAULT_AGE, user::now()))
          .await?;
        Ok(StepOutcome::Seeded)
      }
      Self::BackfillAge => {
        let matched = store.backfill_age(DEFAULT_AGE).await?;
        Ok(StepOutcome::Backfilled { matched })
      }
    }
  }
}

impl fmt::Display for Migration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl fmt::Display for StepOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Seeded => f.write_str("sample user inserted"),
      Self::SeedSkipped { existing } => {
        write!(f, "skipped, collection already holds {existing} document(s)")
      }
      Self::Backfilled { matched } => write!(f, "age set on {matched} document(s)"),
    }
  }
}

/// Run every step of [`PIPELINE`] in order.
///
/// Returns one report per step, or the first step's failure. Later steps are
/// not attempted once one fails.
pub async fn run<S: UserStore>(
  store: &S,
) -> Result<Vec<StepReport>, MigrationError<S::Error>> {
  let mut reports = Vec::with_capacity(PIPELINE.len());
  for step in PIPELINE {
    let outcome = step
      .apply(store)
      .await
      .map_err(|source| MigrationError { step, source })?;
    reports.push(StepReport { step, outcome });
  }
  Ok(reports)
}
