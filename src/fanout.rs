//! Catalog-wide fan-out
//!
//! One logical change spans one container (or directory) per language and
//! there is no multi-file transaction to lean on. Mutations therefore run in
//! two phases: every precondition is checked for every target before the
//! first write, then the per-target step is applied in order. A failure in
//! the apply phase after some targets were mutated surfaces as
//! [`LocaleError::PartiallyApplied`], naming exactly which targets changed.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{LocaleError, Result};

/// Outcome of a fully applied catalog mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanOut {
    /// Operation name, e.g. `create_key`
    pub operation: String,
    /// Languages (or sections, for language replication) that were mutated
    pub targets: Vec<String>,
}

impl FanOut {
    pub fn single(operation: &str, target: &str) -> Self {
        Self {
            operation: operation.to_string(),
            targets: vec![target.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Run `check` for every target, then `apply` for every target
pub(crate) fn fan_out<C, A>(
    operation: &str,
    targets: &[String],
    mut check: C,
    mut apply: A,
) -> Result<FanOut>
where
    C: FnMut(&str) -> Result<()>,
    A: FnMut(&str) -> Result<()>,
{
    for target in targets {
        check(target)?;
    }
    apply_all(operation, targets, &mut apply)
}

/// Apply `step` to each target in order, reporting partial application
pub(crate) fn apply_all<A>(operation: &str, targets: &[String], step: &mut A) -> Result<FanOut>
where
    A: FnMut(&str) -> Result<()>,
{
    let mut applied: Vec<String> = Vec::with_capacity(targets.len());
    for target in targets {
        if let Err(err) = step(target) {
            if applied.is_empty() {
                return Err(err);
            }
            warn!(
                operation,
                failed = %target,
                applied = applied.len(),
                error = %err,
                "catalog mutation partially applied"
            );
            return Err(LocaleError::PartiallyApplied {
                operation: operation.to_string(),
                applied,
                failed: target.clone(),
                source: Box::new(err),
            });
        }
        applied.push(target.clone());
    }
    info!(operation, targets = applied.len(), "catalog mutation applied");
    Ok(FanOut {
        operation: operation.to_string(),
        targets: applied,
    })
}
