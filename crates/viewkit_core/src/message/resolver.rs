//! Message template resolution.
//!
//! # Responsibility
//! - Resolve a template id plus ordered placeholder values into a
//!   user-facing diagnostic.
//! - Resolve the human-readable label of the component a diagnostic is
//!   about.
//!
//! # Invariants
//! - Lookup falls back exact locale -> language -> default locale; only a
//!   miss at every level is an error, because silently losing diagnostic
//!   text would mask the original problem.
//! - Placeholder substitution never fails: extra values are ignored,
//!   missing ones render as the empty string.

use crate::convert::converter::UiComponent;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Locale used when no locale-specific template exists.
pub const DEFAULT_LOCALE: &str = "en";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder regex"));

/// One diagnostic template: a summary line and an optional longer detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub summary: String,
    pub detail: Option<String>,
}

impl MessageTemplate {
    /// Template with a summary only.
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: None,
        }
    }

    /// Template with summary and detail variants.
    pub fn with_detail(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Loaded template table keyed by `(locale, template id)`.
#[derive(Debug, Default, Clone)]
pub struct TemplateTable {
    entries: BTreeMap<(String, String), MessageTemplate>,
}

impl TemplateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one template for a locale.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        template_id: impl Into<String>,
        template: MessageTemplate,
    ) {
        self.entries
            .insert((locale.into(), template_id.into()), template);
    }

    /// Exact-key lookup; fallback logic lives in the resolver.
    pub fn get(&self, locale: &str, template_id: &str) -> Option<&MessageTemplate> {
        self.entries
            .get(&(locale.to_string(), template_id.to_string()))
    }

    /// Number of loaded templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no templates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Severity of a resolved diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Fatal,
}

/// User-facing diagnostic produced by template resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
}

/// Message-resolution error: the diagnostic infrastructure itself is
/// misconfigured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// No template found at any fallback level.
    TemplateMissing { template_id: String, locale: String },
}

impl Display for MessageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateMissing {
                template_id,
                locale,
            } => write!(
                f,
                "no message template `{template_id}` for locale `{locale}` or any fallback"
            ),
        }
    }
}

impl Error for MessageError {}

/// Pure lookup/format service over a loaded template table.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    templates: TemplateTable,
    default_locale: String,
}

impl MessageResolver {
    /// Creates a resolver falling back to [`DEFAULT_LOCALE`].
    pub fn new(templates: TemplateTable) -> Self {
        Self::with_default_locale(templates, DEFAULT_LOCALE)
    }

    /// Creates a resolver with an explicit default locale.
    pub fn with_default_locale(templates: TemplateTable, default_locale: impl Into<String>) -> Self {
        Self {
            templates,
            default_locale: default_locale.into(),
        }
    }

    /// Resolves a template id into a diagnostic for the given locale.
    ///
    /// Conversion diagnostics are rendered at [`Severity::Error`].
    ///
    /// # Errors
    /// Returns `MessageError::TemplateMissing` when no template exists for
    /// the locale, its bare language, or the default locale.
    pub fn resolve(
        &self,
        locale: &str,
        template_id: &str,
        placeholders: &[String],
    ) -> Result<DiagnosticMessage, MessageError> {
        let template = self.find_template(locale, template_id).ok_or_else(|| {
            MessageError::TemplateMissing {
                template_id: template_id.to_string(),
                locale: locale.to_string(),
            }
        })?;

        Ok(DiagnosticMessage {
            severity: Severity::Error,
            summary: substitute(&template.summary, placeholders),
            detail: template
                .detail
                .as_deref()
                .map(|detail| substitute(detail, placeholders)),
        })
    }

    /// Resolves the label to report for a component: the explicit label if
    /// one was configured, else the structural identifier.
    pub fn label(&self, component: &dyn UiComponent) -> String {
        component
            .label()
            .map(str::to_string)
            .unwrap_or_else(|| component.structural_id().to_string())
    }

    fn find_template(&self, locale: &str, template_id: &str) -> Option<&MessageTemplate> {
        if let Some(template) = self.templates.get(locale, template_id) {
            return Some(template);
        }
        if let Some(language) = bare_language(locale) {
            if let Some(template) = self.templates.get(language, template_id) {
                return Some(template);
            }
        }
        if locale != self.default_locale {
            return self.templates.get(&self.default_locale, template_id);
        }
        None
    }
}

/// Positional `{n}` substitution: lenient on both sides so the diagnostic
/// path itself cannot crash.
fn substitute(template: &str, placeholders: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let index: usize = caps[1].parse().unwrap_or(usize::MAX);
            placeholders.get(index).cloned().unwrap_or_default()
        })
        .into_owned()
}

fn bare_language(locale: &str) -> Option<&str> {
    let language = locale.split(['-', '_']).next()?;
    if language.is_empty() || language == locale {
        return None;
    }
    Some(language)
}
