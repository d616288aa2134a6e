//! Bundled document skeletons with `{{name}}` placeholders
//!
//! Substitution is a single left-to-right pass: inserted values are copied
//! verbatim and never scanned for further placeholders.

use crate::error::{ReportError, Result};

/// A named document skeleton
#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    source: &'static str,
}

/// Single-file report with every table inline
pub const MARKUP: Template = Template::new("markup.html", include_str!("../templates/markup.html"));

/// HTML shell that loads a companion data script
pub const RECORDS: Template =
    Template::new("records.html", include_str!("../templates/records.html"));

impl Template {
    #[must_use]
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Template { name, source }
    }

    /// Fill every placeholder.
    ///
    /// # Errors
    ///
    /// Fails on an unterminated placeholder or one missing from `values`.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(
            self.source.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| self.error("unterminated placeholder"))?;
            let key = after[..end].trim();
            let value = values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or_else(|| self.error(&format!("no value for placeholder '{key}'")))?;
            out.push_str(value);
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }

    fn error(&self, message: &str) -> ReportError {
        ReportError::Template {
            template: self.name.to_string(),
            message: message.to_string(),
        }
    }
}
