//! Grouped report lines, keyed by module name or [`GENERAL`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group holding overall remarks and matching statistics.
pub const GENERAL: &str = "general";

/// Ordered text lines per group.
///
/// Line order within a group is emission order; groups are kept sorted so
/// serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    groups: BTreeMap<String, Vec<String>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: impl Into<String>, line: impl Into<String>) {
        self.groups.entry(group.into()).or_default().push(line.into());
    }

    /// Lines of one group; empty when the group has none.
    pub fn lines(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(group, lines)| (group.as_str(), lines.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Total number of lines across all groups.
    pub fn line_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Keep only the lines of `group` for which `keep` returns true.
    pub fn retain(&mut self, group: &str, mut keep: impl FnMut(&str) -> bool) {
        if let Some(lines) = self.groups.get_mut(group) {
            lines.retain(|line| keep(line));
        }
    }

    /// Append every group of `other` after this report's lines.
    pub fn merge(&mut self, other: Report) {
        for (group, lines) in other.groups {
            self.groups.entry(group).or_default().extend(lines);
        }
    }

    /// Render the whole report as a plain-text analysis document.
    ///
    /// The `general` group comes first, then modules alphabetically.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let general = self.groups.get(GENERAL);
        let modules = self.groups.iter().filter(|(group, _)| *group != GENERAL);

        for (group, lines) in general
            .map(|lines| (GENERAL, lines))
            .into_iter()
            .chain(modules.map(|(group, lines)| (group.as_str(), lines)))
        {
            if lines.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("---Analysis of module '{}'---\n", group));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}
