//! Grouping of parsed commits into changelog sections

use tracing::trace;

use crate::rules::ChangelogRules;
use crate::types::{ChangeGroup, ParsedCommit};

/// Group commits into sections.
///
/// Commits whose type the rules do not map are left out. Entries keep the
/// order of `records`. Sections named in the rules' section order come
/// first, in that order; the rest follow in the order they were first seen.
/// Only non-empty groups are returned.
pub fn group(records: &[ParsedCommit], rules: &ChangelogRules) -> Vec<ChangeGroup> {
    let mut keyed: Vec<(String, ChangeGroup)> = Vec::new();

    for record in records {
        let Some(section) = rules.section_for(&record.commit_type) else {
            trace!(hash = %record.hash, commit_type = %record.commit_type, "type not in changelog");
            continue;
        };

        match keyed.iter_mut().find(|(key, _)| key == section) {
            Some((_, group)) => group.push(record.entry()),
            None => {
                let mut group = ChangeGroup::new(humanize(section));
                group.push(record.entry());
                keyed.push((section.to_string(), group));
            }
        }
    }

    let rank = |key: &str| {
        rules
            .section_order
            .iter()
            .position(|s| s == key)
            .unwrap_or(rules.section_order.len())
    };
    // Stable sort keeps first-seen order among unlisted sections
    keyed.sort_by_key(|(key, _)| rank(key));

    keyed
        .into_iter()
        .map(|(_, group)| group)
        .filter(|group| !group.is_empty())
        .collect()
}

/// Turn a section key into a heading title (`feat` -> `Feat`)
pub fn humanize(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
