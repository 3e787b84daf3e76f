//! Id-keyed registries of parsers, transformers and generators.
//!
//! The registry is a plain owned value. Registration takes `&mut self`
//! and execution takes `&self`, so within one owner every registration
//! completes before anything runs.

use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use grammar_forge_core::Grammar;
use serde::Serialize;

use crate::builtins;
use crate::config::PipelineConfig;
use crate::error::{PluginError, PluginFailure, PluginPanic};
use crate::options::PluginOptions;
use crate::plugin::{
    Generator, GeneratorOutput, Parser, Plugin, PluginKind, PluginMetadata, Transformer,
};

/// Per-plugin options keyed by plugin id.
pub type OptionsById = BTreeMap<String, PluginOptions>;

struct Entry<P: ?Sized> {
    plugin: Arc<P>,
    enabled: bool,
    options: PluginOptions,
}

impl<P: ?Sized> Entry<P> {
    fn new(plugin: Arc<P>, options: PluginOptions) -> Self {
        Self {
            plugin,
            enabled: true,
            options,
        }
    }
}

/// A snapshot of one registered plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginInfo {
    pub id: String,
    pub kind: PluginKind,
    pub enabled: bool,
    pub metadata: PluginMetadata,
    /// Declared input format for parsers, output format for generators.
    pub format: Option<String>,
    pub default_options: PluginOptions,
}

/// Result of running a transformer chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub grammar: Grammar,
    /// Ids of the transformers applied, in order.
    pub applied: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Result of a single parser run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub grammar: Grammar,
    pub parser: String,
    pub format: Option<String>,
}

/// Result of a single generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    pub output: GeneratorOutput,
    pub generator: String,
    pub format: Option<String>,
}

/// Result of [`PluginRegistry::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub transformed: TransformResult,
    pub generated: GenerateResult,
}

/// Parsers, transformers and generators, each keyed by id.
///
/// [`Default`] gives the built-in set; [`PluginRegistry::new`] starts
/// empty.
pub struct PluginRegistry {
    parsers: HashMap<String, Entry<dyn Parser>>,
    transformers: HashMap<String, Entry<dyn Transformer>>,
    generators: HashMap<String, Entry<dyn Generator>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("parsers", &sorted_ids(self.parsers.keys()))
            .field("transformers", &sorted_ids(self.transformers.keys()))
            .field("generators", &sorted_ids(self.generators.keys()))
            .finish()
    }
}

fn sorted_ids<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
            transformers: HashMap::new(),
            generators: HashMap::new(),
        }
    }

    /// A registry holding every built-in plugin.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        if let Err(err) = registry.register_builtins() {
            tracing::error!(%err, "built-in plugin ids collide");
        }
        registry
    }

    /// Adds every built-in plugin to this registry.
    ///
    /// # Errors
    ///
    /// Fails on the first built-in whose id is already taken.
    pub fn register_builtins(&mut self) -> Result<(), PluginError> {
        for (id, plugin) in builtins::parsers() {
            insert(&mut self.parsers, PluginKind::Parser, id, plugin, PluginOptions::new())?;
        }
        for (id, plugin) in builtins::transformers() {
            insert(
                &mut self.transformers,
                PluginKind::Transformer,
                id,
                plugin,
                PluginOptions::new(),
            )?;
        }
        for (id, plugin) in builtins::generators() {
            insert(
                &mut self.generators,
                PluginKind::Generator,
                id,
                plugin,
                PluginOptions::new(),
            )?;
        }
        Ok(())
    }

    pub fn register_parser<P: Parser + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: P,
    ) -> Result<(), PluginError> {
        self.register_parser_with_options(id, plugin, PluginOptions::new())
    }

    /// Registers a parser with default options that callers can override.
    pub fn register_parser_with_options<P: Parser + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: P,
        options: PluginOptions,
    ) -> Result<(), PluginError> {
        let plugin: Arc<dyn Parser> = Arc::new(plugin);
        insert(&mut self.parsers, PluginKind::Parser, &id.into(), plugin, options)
    }

    pub fn register_transformer<T: Transformer + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: T,
    ) -> Result<(), PluginError> {
        self.register_transformer_with_options(id, plugin, PluginOptions::new())
    }

    /// Registers a transformer with default options that callers can
    /// override.
    pub fn register_transformer_with_options<T: Transformer + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: T,
        options: PluginOptions,
    ) -> Result<(), PluginError> {
        let plugin: Arc<dyn Transformer> = Arc::new(plugin);
        insert(&mut self.transformers, PluginKind::Transformer, &id.into(), plugin, options)
    }

    pub fn register_generator<G: Generator + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: G,
    ) -> Result<(), PluginError> {
        self.register_generator_with_options(id, plugin, PluginOptions::new())
    }

    /// Registers a generator with default options that callers can
    /// override.
    pub fn register_generator_with_options<G: Generator + 'static>(
        &mut self,
        id: impl Into<String>,
        plugin: G,
        options: PluginOptions,
    ) -> Result<(), PluginError> {
        let plugin: Arc<dyn Generator> = Arc::new(plugin);
        insert(&mut self.generators, PluginKind::Generator, &id.into(), plugin, options)
    }

    /// Removes a plugin.
    pub fn unregister(&mut self, id: &str, kind: PluginKind) -> Result<(), PluginError> {
        let removed = match kind {
            PluginKind::Parser => self.parsers.remove(id).is_some(),
            PluginKind::Transformer => self.transformers.remove(id).is_some(),
            PluginKind::Generator => self.generators.remove(id).is_some(),
        };
        if !removed {
            return Err(not_found(id, kind));
        }
        tracing::debug!(%id, %kind, "unregistered plugin");
        Ok(())
    }

    /// Enables or disables a plugin. Disabled plugins stay registered but
    /// are invisible to lookups and execution.
    pub fn set_plugin_enabled(
        &mut self,
        id: &str,
        kind: PluginKind,
        enabled: bool,
    ) -> Result<(), PluginError> {
        let flag = match kind {
            PluginKind::Parser => self.parsers.get_mut(id).map(|e| &mut e.enabled),
            PluginKind::Transformer => self.transformers.get_mut(id).map(|e| &mut e.enabled),
            PluginKind::Generator => self.generators.get_mut(id).map(|e| &mut e.enabled),
        };
        let flag = flag.ok_or_else(|| not_found(id, kind))?;
        *flag = enabled;
        tracing::debug!(%id, %kind, enabled, "changed plugin state");
        Ok(())
    }

    /// Whether `id` is registered under `kind`, enabled or not.
    pub fn is_registered(&self, id: &str, kind: PluginKind) -> bool {
        match kind {
            PluginKind::Parser => self.parsers.contains_key(id),
            PluginKind::Transformer => self.transformers.contains_key(id),
            PluginKind::Generator => self.generators.contains_key(id),
        }
    }

    pub fn get_parser(&self, id: &str) -> Option<Arc<dyn Parser>> {
        enabled(&self.parsers, id).map(|e| Arc::clone(&e.plugin))
    }

    pub fn get_transformer(&self, id: &str) -> Option<Arc<dyn Transformer>> {
        enabled(&self.transformers, id).map(|e| Arc::clone(&e.plugin))
    }

    pub fn get_generator(&self, id: &str) -> Option<Arc<dyn Generator>> {
        enabled(&self.generators, id).map(|e| Arc::clone(&e.plugin))
    }

    /// Snapshots of every plugin of `kind`, sorted by id.
    pub fn list(&self, kind: PluginKind) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = match kind {
            PluginKind::Parser => self
                .parsers
                .iter()
                .map(|(id, e)| info(id, kind, e, e.plugin.input_format()))
                .collect(),
            PluginKind::Transformer => self
                .transformers
                .iter()
                .map(|(id, e)| info(id, kind, e, None))
                .collect(),
            PluginKind::Generator => self
                .generators
                .iter()
                .map(|(id, e)| info(id, kind, e, e.plugin.output_format()))
                .collect(),
        };
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Runs the transformers `ids` in order, each on the previous output.
    ///
    /// Options for a transformer are looked up in `options` by its id and
    /// layered over the defaults it was registered with.
    ///
    /// # Errors
    ///
    /// Stops at the first id that is unknown or disabled, whose options
    /// are rejected, or whose transformer fails or panics. Nothing after
    /// the failing stage runs.
    pub fn transform<S: AsRef<str>>(
        &self,
        grammar: &Grammar,
        ids: &[S],
        options: &OptionsById,
    ) -> Result<TransformResult, PluginError> {
        let mut current = grammar.clone();
        let mut applied = Vec::with_capacity(ids.len());

        for id in ids {
            let id = id.as_ref();
            let entry = enabled(&self.transformers, id)
                .ok_or_else(|| not_found(id, PluginKind::Transformer))?;
            let effective = effective_options(entry, options.get(id), id, PluginKind::Transformer)?;

            tracing::debug!(transformer = %id, rules = current.len(), "applying transformer");
            let plugin = &entry.plugin;
            current = guarded(|| plugin.transform(&current, &effective))
                .map_err(|source| PluginError::failed(PluginKind::Transformer, id, source))?;
            applied.push(id.to_string());
        }

        Ok(TransformResult {
            grammar: current,
            applied,
            timestamp: Utc::now(),
        })
    }

    /// Runs one generator.
    pub fn generate(
        &self,
        grammar: &Grammar,
        id: &str,
        options: Option<&PluginOptions>,
    ) -> Result<GenerateResult, PluginError> {
        let entry =
            enabled(&self.generators, id).ok_or_else(|| not_found(id, PluginKind::Generator))?;
        let effective = effective_options(entry, options, id, PluginKind::Generator)?;

        tracing::debug!(generator = %id, "generating output");
        let plugin = &entry.plugin;
        let output = guarded(|| plugin.generate(grammar, &effective))
            .map_err(|source| PluginError::failed(PluginKind::Generator, id, source))?;

        Ok(GenerateResult {
            output,
            generator: id.to_string(),
            format: plugin.output_format().map(String::from),
        })
    }

    /// Runs one parser.
    pub fn parse(
        &self,
        input: &str,
        id: &str,
        options: Option<&PluginOptions>,
    ) -> Result<ParseResult, PluginError> {
        let entry = enabled(&self.parsers, id).ok_or_else(|| not_found(id, PluginKind::Parser))?;
        let effective = effective_options(entry, options, id, PluginKind::Parser)?;

        tracing::debug!(parser = %id, bytes = input.len(), "parsing input");
        let plugin = &entry.plugin;
        let grammar = guarded(|| plugin.parse(input, &effective))
            .map_err(|source| PluginError::failed(PluginKind::Parser, id, source))?;

        Ok(ParseResult {
            grammar,
            parser: id.to_string(),
            format: plugin.input_format().map(String::from),
        })
    }

    /// Parses `input`, applies the configured transformers, and generates
    /// the configured output.
    pub fn run(&self, config: &PipelineConfig, input: &str) -> Result<PipelineOutput, PluginError> {
        let parsed = self.parse(input, &config.parser, Some(&config.parser_options))?;
        let transformed = self.transform(
            &parsed.grammar,
            config.transformers.as_slice(),
            &config.options,
        )?;
        let generated = self.generate(
            &transformed.grammar,
            &config.generator,
            Some(&config.generator_options),
        )?;
        tracing::debug!(
            parser = %config.parser,
            transformers = transformed.applied.len(),
            generator = %config.generator,
            "pipeline finished"
        );
        Ok(PipelineOutput {
            transformed,
            generated,
        })
    }
}

fn insert<P: ?Sized>(
    map: &mut HashMap<String, Entry<P>>,
    kind: PluginKind,
    id: &str,
    plugin: Arc<P>,
    options: PluginOptions,
) -> Result<(), PluginError> {
    if map.contains_key(id) {
        return Err(PluginError::DuplicateRegistration {
            id: id.to_string(),
            kind,
        });
    }
    map.insert(id.to_string(), Entry::new(plugin, options));
    tracing::debug!(%id, %kind, "registered plugin");
    Ok(())
}

fn enabled<'a, P: ?Sized>(map: &'a HashMap<String, Entry<P>>, id: &str) -> Option<&'a Entry<P>> {
    map.get(id).filter(|entry| entry.enabled)
}

fn not_found(id: &str, kind: PluginKind) -> PluginError {
    PluginError::NotFound {
        id: id.to_string(),
        kind,
    }
}

fn info<P: Plugin + ?Sized>(
    id: &str,
    kind: PluginKind,
    entry: &Entry<P>,
    format: Option<&str>,
) -> PluginInfo {
    PluginInfo {
        id: id.to_string(),
        kind,
        enabled: entry.enabled,
        metadata: entry.plugin.metadata().clone(),
        format: format.map(String::from),
        default_options: entry.options.clone(),
    }
}

/// Caller options over entry defaults, validated when anything was set.
fn effective_options<P: Plugin + ?Sized>(
    entry: &Entry<P>,
    supplied: Option<&PluginOptions>,
    id: &str,
    kind: PluginKind,
) -> Result<PluginOptions, PluginError> {
    let effective = match supplied {
        Some(options) => options.merged_over(&entry.options),
        None => entry.options.clone(),
    };
    if !effective.is_empty() {
        entry
            .plugin
            .validate_options(&effective)
            .map_err(|errors| PluginError::InvalidOptions {
                id: id.to_string(),
                kind,
                errors,
            })?;
    }
    Ok(effective)
}

/// Runs plugin code, turning a panic into an ordinary failure.
///
/// The process panic hook still runs before the unwind is caught, so the
/// default hook reports the panic on stderr. Hosts that want silence
/// install their own hook with `std::panic::set_hook`.
fn guarded<T>(f: impl FnOnce() -> Result<T, PluginFailure>) -> Result<T, PluginFailure> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Box::new(PluginPanic::from_payload(payload))),
    }
}
