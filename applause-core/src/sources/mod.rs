//! Key/value pattern sources.
//!
//! A `json`, `yaml` or `cson` pattern declaration carries its data either
//! inline or through a deferred loader that produces it later. This module
//! models both shapes and the one-shot completion handle handed to callback
//! loaders.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::errors::{ApplauseError, Result};

pub mod parsers;

pub use parsers::{CsonParser, FormatParser, FormatParsers, JsonParser, YamlParser};

/// A boxed, sendable future, as produced by deferred loaders.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The document format of a key/value source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Cson,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Cson => "cson",
        };
        f.write_str(name)
    }
}

/// The content a source provides: raw document text still to be parsed,
/// or an already-parsed value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Data(Value),
}

impl Payload {
    /// Turns the payload into a value tree, parsing text with the parser
    /// registered for `format`. Parser errors are returned unmodified.
    pub(crate) fn into_value(self, format: Format, parsers: &FormatParsers) -> Result<Value> {
        match self {
            Payload::Data(value) => Ok(value),
            Payload::Text(text) => parsers.get(format).parse(&text).map_err(ApplauseError::Parse),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Data(other),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

/// A loader that produces its payload asynchronously.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    async fn load(&self) -> anyhow::Result<Payload>;
}

/// One-shot completion handle given to callback loaders.
///
/// Consuming methods guarantee the callback fires at most once. Dropping the
/// handle unused is reported as [`ApplauseError::LoaderDropped`].
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<anyhow::Result<Payload>>,
}

impl Completion {
    pub fn complete(self, payload: impl Into<Payload>) {
        self.send(Ok(payload.into()));
    }

    pub fn fail(self, error: impl Into<anyhow::Error>) {
        self.send(Err(error.into()));
    }

    fn send(self, result: anyhow::Result<Payload>) {
        if self.tx.send(result).is_err() {
            debug!("Deferred source completed after resolution was abandoned.");
        }
    }
}

/// Why a deferred source produced no payload.
#[derive(Debug)]
pub(crate) enum LoadError {
    Failed(anyhow::Error),
    Dropped,
}

/// A pattern source whose data arrives later.
pub enum Deferred {
    /// Invoked once with a [`Completion`] it must eventually consume.
    Callback(Box<dyn FnOnce(Completion) + Send + 'static>),
    Loader(Arc<dyn SourceLoader>),
    Future(BoxFuture<anyhow::Result<Payload>>),
}

impl Deferred {
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        Deferred::Callback(Box::new(callback))
    }

    pub fn loader<L>(loader: L) -> Self
    where
        L: SourceLoader + 'static,
    {
        Deferred::Loader(Arc::new(loader))
    }

    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<Payload>> + Send + 'static,
    {
        Deferred::Future(Box::pin(future))
    }

    pub(crate) fn into_task(self) -> BoxFuture<Result<Payload, LoadError>> {
        match self {
            Deferred::Callback(callback) => Box::pin(async move {
                let (tx, rx) = oneshot::channel();
                callback(Completion { tx });
                match rx.await {
                    Ok(result) => result.map_err(LoadError::Failed),
                    Err(_) => Err(LoadError::Dropped),
                }
            }),
            Deferred::Loader(loader) => {
                Box::pin(async move { loader.load().await.map_err(LoadError::Failed) })
            }
            Deferred::Future(future) => Box::pin(async move { future.await.map_err(LoadError::Failed) }),
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Deferred::Callback(_) => "Callback",
            Deferred::Loader(_) => "Loader",
            Deferred::Future(_) => "Future",
        };
        f.debug_tuple("Deferred").field(&kind).finish()
    }
}

/// The data attached to a `json`/`yaml`/`cson` declaration.
#[derive(Debug)]
pub enum SourceData {
    Inline(Payload),
    Deferred(Deferred),
}

impl SourceData {
    pub fn is_deferred(&self) -> bool {
        matches!(self, SourceData::Deferred(_))
    }
}

impl From<Value> for SourceData {
    fn from(value: Value) -> Self {
        SourceData::Inline(value.into())
    }
}

impl From<&str> for SourceData {
    fn from(text: &str) -> Self {
        SourceData::Inline(text.into())
    }
}

impl From<String> for SourceData {
    fn from(text: String) -> Self {
        SourceData::Inline(text.into())
    }
}

impl From<Deferred> for SourceData {
    fn from(deferred: Deferred) -> Self {
        SourceData::Deferred(deferred)
    }
}
