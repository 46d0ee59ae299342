//! Identity context: who the assistant speaks as, and the system prompt built from it.
//!
//! Two optional sources feed the prompt:
//!
//! 1. **Resume**: a PDF whose page text is extracted in document order
//! 2. **Summary**: a plain-text file read verbatim
//!
//! Neither source is allowed to fail construction. A missing or unreadable
//! file degrades to a fixed placeholder and a `warn` log line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Used when the resume PDF is missing or its text cannot be extracted.
pub const RESUME_PLACEHOLDER: &str = "Could not load resume text.";

/// Used when the summary file is missing or unreadable.
pub const SUMMARY_PLACEHOLDER: &str = "No summary available.";

/// Where the identity context comes from.
#[derive(Debug, Clone, Default)]
pub struct IdentitySource {
    /// The name the assistant speaks as
    pub name: String,

    /// Path to the resume PDF
    pub resume_path: PathBuf,

    /// Path to the plain-text summary
    pub summary_path: PathBuf,

    /// Optional full system prompt (replaces the composed prompt)
    pub system_prompt_override: Option<String>,
}

/// The loaded identity. Built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub summary: String,
    pub resume: String,
    pub system_prompt: String,

    /// Whether the resume came from the PDF rather than the placeholder
    #[serde(default)]
    pub resume_loaded: bool,

    /// Whether the summary came from the file rather than the placeholder
    #[serde(default)]
    pub summary_loaded: bool,
}

impl Identity {
    /// Load both context sources and compose the system prompt. Never fails.
    pub fn load(source: &IdentitySource) -> Self {
        let (resume, resume_loaded) = match Self::read_resume(&source.resume_path) {
            Ok(text) => (text, true),
            Err(reason) => {
                warn!(path = %source.resume_path.display(), %reason, "Using resume placeholder");
                (RESUME_PLACEHOLDER.to_string(), false)
            }
        };

        let (summary, summary_loaded) = match std::fs::read_to_string(&source.summary_path) {
            Ok(text) => (text, true),
            Err(e) => {
                warn!(path = %source.summary_path.display(), error = %e, "Using summary placeholder");
                (SUMMARY_PLACEHOLDER.to_string(), false)
            }
        };

        let system_prompt = match &source.system_prompt_override {
            Some(prompt) => {
                debug!("Using system prompt override");
                prompt.clone()
            }
            None => Self::compose_prompt(&source.name, &summary, &resume),
        };

        debug!(
            name = %source.name,
            resume_loaded,
            summary_loaded,
            prompt_len = system_prompt.len(),
            "Identity loaded"
        );

        Self {
            name: source.name.clone(),
            summary,
            resume,
            system_prompt,
            resume_loaded,
            summary_loaded,
        }
    }

    /// Build the persona instruction block from its three parts.
    pub fn compose_prompt(name: &str, summary: &str, resume: &str) -> String {
        format!(
            "You are acting as {name}. Answer questions about {name}'s career, background, and skills. \
             Be professional and engaging, as if talking to a potential employer. \
             If you don't know something, use the record_unknown_question tool. \
             Encourage users to share their email and use record_user_details tool. \
             \n\n## Summary:\n{summary}\n\n## Resume:\n{resume}\n\n"
        )
    }

    /// Extract the text of every page, in page order.
    fn read_resume(path: &Path) -> std::result::Result<String, String> {
        if !path.exists() {
            return Err("file not found".into());
        }

        let document = lopdf::Document::load(path).map_err(|e| e.to_string())?;

        // get_pages() is keyed by 1-based page number in a BTreeMap, so this walks in order
        let pages = document
            .get_pages()
            .into_keys()
            .map(|page_number| {
                document
                    .extract_text(&[page_number])
                    .map_err(|e| format!("page {page_number}: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(join_pages(pages))
    }

    /// Estimate the token count of the system prompt (rough: 4 chars ≈ 1 token).
    pub fn estimated_tokens(&self) -> usize {
        self.system_prompt.len() / 4
    }

    /// Get a diagnostic summary of loaded context.
    pub fn diagnostic_summary(&self) -> String {
        let source = |loaded: bool| if loaded { "loaded" } else { "placeholder" };
        let mut out = String::new();
        out.push_str(&format!("Name: {}\n", self.name));
        out.push_str(&format!("Resume: {} ({} chars)\n", source(self.resume_loaded), self.resume.len()));
        out.push_str(&format!("Summary: {} ({} chars)\n", source(self.summary_loaded), self.summary.len()));
        out.push_str(&format!(
            "System Prompt: {} chars (~{} tokens)\n",
            self.system_prompt.len(),
            self.estimated_tokens()
        ));
        out
    }
}

/// Concatenate page texts, leaving out only pages that yielded nothing.
fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages.into_iter().filter(|page| !page.is_empty()).collect()
}
