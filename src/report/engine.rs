use handlebars::Handlebars;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use super::types::{ReportContext, ReportFormat};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),
}

/// Built-in plain text report
pub const DEFAULT_TEXT_TEMPLATE: &str = r#"Folder reconciliation report
Directory source:  {{directorySource}}
Governance source: {{governanceSource}}
Generated at:      {{generatedAt}}

In both ({{summary.both}}):
{{#each both}}
  {{name}}{{#if metadata}}  [{{#each metadata}}{{@key}}={{this}}{{#unless @last}}, {{/unless}}{{/each}}]{{/if}}
{{/each}}

Only in governance ({{summary.governanceOnly}}):
{{#each governanceOnly}}
  {{name}}{{#if metadata}}  [{{#each metadata}}{{@key}}={{this}}{{#unless @last}}, {{/unless}}{{/each}}]{{/if}}
{{/each}}

Only in repository ({{summary.repoOnly}}):
{{#each repoOnly}}
  {{this}}
{{/each}}

{{#if inSync}}Repository and governance list are in sync.{{else}}Repository and governance list differ.{{/if}}
"#;

pub struct ReportEngine {
    handlebars: Handlebars<'static>,
}

impl ReportEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Reports are plain text, folder names must not be HTML escaped
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Load a custom text template from disk
    pub async fn load_template(&self, template_path: &Path) -> Result<String, ReportError> {
        if template_path.exists() {
            let content = fs::read_to_string(template_path).await?;
            Ok(content)
        } else {
            Err(ReportError::TemplateNotFound(
                template_path.display().to_string(),
            ))
        }
    }

    /// Render with the built-in text template
    pub fn render_text(&self, context: &ReportContext) -> Result<String, ReportError> {
        self.render_with(DEFAULT_TEXT_TEMPLATE, context)
    }

    /// Render with a caller supplied handlebars template
    pub fn render_with(&self, template: &str, context: &ReportContext) -> Result<String, ReportError> {
        self.handlebars
            .render_template(template, context)
            .map_err(ReportError::from)
    }

    pub fn render_json(&self, context: &ReportContext) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(context)?)
    }

    pub fn render(&self, context: &ReportContext, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Text => self.render_text(context),
            ReportFormat::Json => self.render_json(context),
        }
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
