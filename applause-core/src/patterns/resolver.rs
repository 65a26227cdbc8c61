//! resolver.rs - Resolves pattern declarations into the ordered pattern list.
//!
//! Declarations are normalized independently. Inline sources are handled
//! immediately; deferred sources are spawned as tasks that all run at once and
//! are joined before anything is compiled. The result is sorted so that longer
//! literal keys are tried before keys that are their prefixes.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use serde_json::Value;
use tokio::runtime::{Builder, Handle};
use tokio::task::JoinHandle;

use crate::config::{ApplauseConfig, EngineOptions};
use crate::errors::{ApplauseError, Result};
use crate::patterns::flatten::flatten;
use crate::patterns::normalizer::{normalize_entries, normalize_pair, CompiledPattern, PatternSource};
use crate::sources::{Deferred, Format, FormatParsers, LoadError, Payload, SourceData};

/// The ordered, immutable list of patterns an engine applies.
#[derive(Debug, Default)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledPattern> {
        self.patterns.iter()
    }
}

/// Identifies where a deferred source's patterns go once it completes.
#[derive(Debug, Clone, Copy)]
struct PendingSource {
    slot: usize,
    index: usize,
    format: Format,
}

/// Declarations split into finished slots and sources still to load.
///
/// Slots keep declaration order; each holds the patterns of one declaration,
/// one source of a declaration, or the variables.
struct Resolution {
    options: EngineOptions,
    parsers: FormatParsers,
    slots: Vec<Vec<CompiledPattern>>,
    deferred: Vec<(PendingSource, Deferred)>,
}

impl Resolution {
    fn plan(config: ApplauseConfig) -> Result<Self> {
        let ApplauseConfig { options, patterns, variables, parsers } = config;
        let declared = patterns.len();
        let mut resolution = Self {
            options,
            parsers,
            slots: Vec::with_capacity(declared + 1),
            deferred: Vec::new(),
        };

        for (index, mut declaration) in patterns.into_iter().enumerate() {
            if declaration.is_inert() {
                debug!("Pattern #{} has no match, replacement or source; ignoring it.", index);
                continue;
            }
            if !declaration.has_sources() {
                let compiled = normalize_pair(
                    index,
                    declaration.matcher,
                    declaration.replacement,
                    PatternSource::Patterns,
                    &resolution.options,
                )?;
                resolution.slots.push(vec![compiled]);
                continue;
            }
            if declaration.matcher.is_some() || declaration.replacement.is_some() {
                warn!("Pattern #{} declares a key/value source; its match/replacement are ignored.", index);
            }
            for (format, data) in declaration.take_sources() {
                let slot = resolution.slots.len();
                resolution.slots.push(Vec::new());
                match data {
                    SourceData::Inline(payload) => {
                        resolution.slots[slot] = resolution.compile_source(index, format, payload)?;
                    }
                    SourceData::Deferred(deferred) => {
                        resolution.deferred.push((PendingSource { slot, index, format }, deferred));
                    }
                }
            }
        }

        if let Some(variables) = variables {
            let entries = flatten(&Value::Object(variables), &resolution.options.delimiter);
            let compiled = normalize_entries(declared, entries, PatternSource::Variables, &resolution.options)?;
            resolution.slots.push(compiled);
        }

        Ok(resolution)
    }

    fn compile_source(&self, index: usize, format: Format, payload: Payload) -> Result<Vec<CompiledPattern>> {
        let value = payload.into_value(format, &self.parsers)?;
        let entries = flatten(&value, &self.options.delimiter);
        debug!("Pattern #{}: {} source flattened into {} key(s).", index, format, entries.len());
        normalize_entries(index, entries, format.into(), &self.options)
    }

    /// Spawns every deferred source and waits for all of them. The first
    /// failure aborts the tasks still running.
    async fn load_deferred(&mut self) -> Result<()> {
        if self.deferred.is_empty() {
            return Ok(());
        }
        debug!("Waiting for {} deferred source(s).", self.deferred.len());

        let spawned: Vec<(PendingSource, JoinHandle<Result<Payload, LoadError>>)> = self
            .deferred
            .drain(..)
            .map(|(pending, deferred)| (pending, tokio::spawn(deferred.into_task())))
            .collect();
        let mut handles = spawned.into_iter();

        while let Some((pending, handle)) = handles.next() {
            match self.settle(pending, handle.await) {
                Ok(compiled) => self.slots[pending.slot] = compiled,
                Err(e) => {
                    for (_, rest) in handles.by_ref() {
                        rest.abort();
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn settle(
        &self,
        pending: PendingSource,
        joined: Result<Result<Payload, LoadError>, tokio::task::JoinError>,
    ) -> Result<Vec<CompiledPattern>> {
        let PendingSource { index, format, .. } = pending;
        let payload = match joined {
            Ok(Ok(payload)) => payload,
            Ok(Err(LoadError::Failed(source))) => return Err(ApplauseError::Loader { index, format, source }),
            Ok(Err(LoadError::Dropped)) => return Err(ApplauseError::LoaderDropped { index, format }),
            Err(e) if e.is_panic() => return Err(ApplauseError::LoaderPanicked { index, format }),
            Err(_) => return Err(ApplauseError::LoaderDropped { index, format }),
        };
        self.compile_source(index, format, payload)
    }

    fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Orders the patterns by descending key length. The sort is stable, so
    /// equal lengths (and every raw regex) keep declaration order.
    fn finish(self) -> CompiledPatterns {
        let mut patterns: Vec<CompiledPattern> = self.slots.into_iter().flatten().collect();
        patterns.sort_by(|a, b| b.source_key_length.cmp(&a.source_key_length));
        info!("Resolved {} pattern(s).", patterns.len());
        CompiledPatterns { patterns }
    }
}

/// Resolves every declaration of `config`, waiting for deferred sources.
pub async fn resolve_patterns(config: ApplauseConfig) -> Result<CompiledPatterns> {
    let mut resolution = Resolution::plan(config)?;
    resolution.load_deferred().await?;
    Ok(resolution.finish())
}

/// Blocking counterpart of [`resolve_patterns`].
///
/// Without deferred sources no runtime is involved. Otherwise a private
/// current-thread runtime drives the loaders, which is refused when called
/// from inside another runtime.
pub fn resolve_patterns_blocking(config: ApplauseConfig) -> Result<CompiledPatterns> {
    let mut resolution = Resolution::plan(config)?;
    if resolution.has_deferred() {
        if Handle::try_current().is_ok() {
            return Err(ApplauseError::BlockingInAsyncContext);
        }
        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(resolution.load_deferred())?;
    }
    Ok(resolution.finish())
}
