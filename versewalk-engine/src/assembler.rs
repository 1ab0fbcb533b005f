//! Poem assembly
//!
//! Orchestrates one generation run: plan the scheme, draw length targets,
//! resolve one rhyme family per group, then render every line in poem order.
//! Any failure aborts the run; partial poems are never returned.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::lookup::RhymeLookup;
use crate::poem::{Line, Poem, Stanza};
use crate::resolver::{ResolverSettings, RhymeResolver};
use crate::synthesizer::LineSynthesizer;
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use versewalk_core::{render_line, CorpusModel, SchemePlan};

/// Counters collected during one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Calls that reached the rhyme lookup, retries included
    pub lookup_calls: usize,
    /// Distinct queries answered during the run
    pub cached_queries: usize,
    /// Rhyme groups resolved
    pub groups: usize,
    /// Total tokens across all lines
    pub tokens: usize,
}

/// Builds poems from a corpus and a rhyme lookup
pub struct PoemAssembler {
    config: EngineConfig,
    lookup: Arc<dyn RhymeLookup>,
}

impl PoemAssembler {
    /// Create an assembler; the configuration is validated here
    pub fn new(config: EngineConfig, lookup: Arc<dyn RhymeLookup>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, lookup })
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the rhyme lookup in use
    pub fn lookup_name(&self) -> &'static str {
        self.lookup.name()
    }

    /// Load `corpus` and generate a poem following `scheme`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        scheme: &str,
        corpus: &str,
        rng: &mut R,
    ) -> Result<Poem> {
        let model = self.load_corpus(corpus)?;
        self.generate_with_model(scheme, &model, rng)
    }

    /// Build the corpus model with the configured tokenizer settings
    pub fn load_corpus(&self, corpus: &str) -> Result<CorpusModel> {
        let model = CorpusModel::load_with(corpus, &self.config.tokenizer)?;
        debug!(
            "corpus model: {} words, {} tokens, {} line endings",
            model.word_count(),
            model.token_count(),
            model.line_endings().len()
        );
        Ok(model)
    }

    /// Generate a poem from a prebuilt model
    pub fn generate_with_model<R: Rng + ?Sized>(
        &self,
        scheme: &str,
        model: &CorpusModel,
        rng: &mut R,
    ) -> Result<Poem> {
        self.generate_with_stats(scheme, model, rng)
            .map(|(poem, _)| poem)
    }

    /// Generate a poem and report run counters
    pub fn generate_with_stats<R: Rng + ?Sized>(
        &self,
        scheme: &str,
        model: &CorpusModel,
        rng: &mut R,
    ) -> Result<(Poem, GenerationStats)> {
        let plan = SchemePlan::with_options(scheme, &self.config.plan)?;
        let lengths = self.config.length.line_lengths(plan.line_count(), rng)?;
        debug!(
            "plan: {} lines, {} groups, {} stanzas",
            plan.line_count(),
            plan.groups().len(),
            plan.stanza_count()
        );

        let mut resolver = RhymeResolver::new(
            model,
            self.lookup.as_ref(),
            ResolverSettings::from(&self.config),
        );

        let mut used: HashSet<String> = HashSet::new();
        let mut families = Vec::with_capacity(plan.groups().len());
        for group in plan.groups() {
            let family = resolver.family_for_group(group.key, group.size(), &used, rng)?;
            used.extend(family.members().iter().cloned());
            families.push(family);
        }

        let mut endings: Vec<Option<String>> = vec![None; plan.line_count()];
        for (group, family) in plan.groups().iter().zip(&families) {
            let chosen = family.choose(group.size(), rng);
            debug!("group {}: endings {:?}", group.key, chosen);
            for (&line, ending) in group.lines.iter().zip(chosen) {
                endings[line] = Some(ending);
            }
        }

        let synthesizer = LineSynthesizer::new(model, self.config.boundary_policy);
        let mut lines = Vec::with_capacity(plan.line_count());
        for (slot, (ending, &target_length)) in
            plan.lines().iter().zip(endings.into_iter().zip(&lengths))
        {
            let group = plan.group_of(slot.index).key;
            let ending = ending.ok_or_else(|| EngineError::RhymeGroupUnsatisfiable {
                group,
                attempts: 0,
                reason: "rhyme family smaller than its group".to_string(),
            })?;

            let tokens = synthesizer.render(&ending, target_length, rng)?;
            let terminal = (self.config.punctuate && plan.ends_stanza(slot.index)).then_some('.');
            lines.push(Line {
                text: render_line(&tokens, terminal),
                tokens,
                label: slot.label,
                group,
                ending,
                target_length,
            });
        }

        let stats = GenerationStats {
            lookup_calls: resolver.lookup_calls(),
            cached_queries: resolver.cache().len(),
            groups: plan.groups().len(),
            tokens: lines.iter().map(Line::token_count).sum(),
        };

        let mut remaining = lines.into_iter();
        let stanzas = plan
            .stanza_ranges()
            .into_iter()
            .map(|range| Stanza {
                lines: remaining.by_ref().take(range.len()).collect(),
            })
            .collect();
        let poem = Poem { stanzas };

        info!(
            "generated {} lines in {} stanzas ({} rhyme lookups via {})",
            poem.line_count(),
            poem.stanza_count(),
            stats.lookup_calls,
            self.lookup.name()
        );
        Ok((poem, stats))
    }
}
