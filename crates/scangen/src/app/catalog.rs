//! Registry of scan presets and the templates they render with.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::app::presets::{ScanPreset, builtin_presets};
use crate::app::template::{LineTemplate, TemplateSet};
use crate::app::write::{ScanJob, WriteSummary, write_generated_file, write_lines};
use crate::infra::config::Config;

/// Presets in listing order together with every known template.
pub struct Catalog {
    templates: TemplateSet,
    presets: Vec<ScanPreset>,
}

impl Catalog {
    /// Only the compiled-in presets and templates.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            templates: TemplateSet::with_builtins().context("failed to load built-in templates")?,
            presets: builtin_presets().context("invalid built-in preset")?,
        })
    }

    /// Built-ins extended by configured templates and presets.
    ///
    /// A configured preset sharing a built-in name replaces it in place.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut catalog = Self::builtin()?;
        for (name, source) in &config.templates {
            catalog
                .templates
                .insert(name.clone(), source.clone())
                .with_context(|| format!("failed to register configured template '{name}'"))?;
        }
        for preset in &config.presets {
            catalog.upsert(preset.clone());
        }
        catalog.validate()?;
        Ok(catalog)
    }

    fn upsert(&mut self, preset: ScanPreset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    fn validate(&self) -> Result<()> {
        for preset in &self.presets {
            if !self.templates.contains(&preset.template) {
                return Err(anyhow!(
                    "preset '{}' refers to unknown template '{}'",
                    preset.name,
                    preset.template
                ));
            }
            if preset.ranges.is_empty() {
                return Err(anyhow!("preset '{}' has no ranges", preset.name));
            }
        }
        Ok(())
    }

    pub fn presets(&self) -> &[ScanPreset] {
        &self.presets
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Look up a preset by name.
    pub fn preset(&self, name: &str) -> Result<&ScanPreset> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = self.presets.iter().map(|p| p.name.as_str()).collect();
                anyhow!("unknown preset '{name}' (known: {})", known.join(", "))
            })
    }

    /// Write the named preset to its output file under `out_dir`.
    pub fn generate(&self, name: &str, out_dir: &Path) -> Result<WriteSummary> {
        let preset = self.preset(name)?;
        let template = self.templates.get(&preset.template)?;
        let path = out_dir.join(&preset.output);
        let _span = tracing::info_span!("generate", preset = %preset.name).entered();

        let jobs = jobs_for(preset, &template);
        write_generated_file(&path, &jobs)
            .with_context(|| format!("failed to generate preset '{}'", preset.name))
    }

    /// Stream the named preset's lines to `writer`.
    pub fn render<W: Write>(&self, name: &str, writer: &mut W) -> Result<usize> {
        let preset = self.preset(name)?;
        let template = self.templates.get(&preset.template)?;

        let jobs = jobs_for(preset, &template);
        write_lines(writer, "<stdout>", &jobs)
            .with_context(|| format!("failed to render preset '{}'", preset.name))
    }
}

fn jobs_for<'a>(preset: &ScanPreset, template: &'a dyn LineTemplate) -> Vec<ScanJob<'a>> {
    preset
        .ranges
        .iter()
        .map(|spec| ScanJob::new(*spec, template))
        .collect()
}
