//! Rendering of matched field pairs into report lines.
//!
//! Every line starts with a fixed-width `module / model / field (type)`
//! location and lands in the bucket of the old record's alias-mapped module.

use crate::alias::AliasMap;
use crate::record::{
    Record, COLUMN1, COLUMN2, FIELD, INHERITS, IS_FUNCTION, IS_PROPERTY, IS_RELATED, MODEL,
    MODULE, ORDER, RELATION, REQUIRED, STORED, TABLE, TYPE,
};
use crate::report::Report;

/// Writes field-level change lines into a [`Report`].
pub struct ChangeReporter<'a> {
    aliases: &'a AliasMap,
    report: &'a mut Report,
}

impl<'a> ChangeReporter<'a> {
    pub fn new(aliases: &'a AliasMap, report: &'a mut Report) -> Self {
        Self { aliases, report }
    }

    /// Emit one line per meaningful difference between `old` and `new`
    /// among `keys`.
    pub fn report_changes(&mut self, old: &Record, new: &Record, keys: &[&str]) {
        for &key in keys {
            match key {
                REQUIRED => {
                    if !old.flag(REQUIRED) && new.flag(REQUIRED) {
                        self.print(old, "now required");
                    }
                }
                STORED => {
                    if old.flag(STORED) != new.flag(STORED) {
                        let text = if !new.flag(STORED) {
                            "not stored anymore"
                        } else if old.flag(IS_PROPERTY) && new.flag(IS_PROPERTY) {
                            "needs conversion to v18-style company dependent"
                        } else {
                            "is now stored"
                        };
                        self.print(old, text);
                    }
                }
                IS_FUNCTION => {
                    self.print_toggle(old, new, key, "now a function", "not a function anymore")
                }
                IS_PROPERTY => {
                    self.print_toggle(old, new, key, "now a property", "not a property anymore")
                }
                IS_RELATED => {
                    self.print_toggle(old, new, key, "now related", "not related anymore")
                }
                TABLE => {
                    if !old.same(new, TABLE) {
                        self.print_change(old, new, TABLE);
                    }
                    if old.flag(TABLE) && new.flag(TABLE) {
                        for column in [COLUMN1, COLUMN2] {
                            if !old.same(new, column) {
                                self.print_change(old, new, column);
                            }
                        }
                    }
                }
                _ => {
                    if !old.same(new, key) {
                        self.print_change(old, new, key);
                    }
                }
            }
        }
    }

    /// Append `text` at the location of `record`.
    pub fn print(&mut self, record: &Record, text: &str) {
        let location = location(record.str(MODULE), record);
        let group = self.aliases.module_map(record.str(MODULE)).to_string();
        self.report.push(group, format!("{}: {}", location, text));
    }

    fn print_toggle(&mut self, old: &Record, new: &Record, key: &str, on: &str, off: &str) {
        if old.flag(key) != new.flag(key) {
            self.print(old, if new.flag(key) { on } else { off });
        }
    }

    /// Generic `<key> is now '<new>' ('<old>')` line. A module change is also
    /// mirrored into the new module's bucket.
    fn print_change(&mut self, old: &Record, new: &Record, key: &str) {
        let mut text = format!(
            "{} is now '{}' ('{}')",
            key,
            new.display(key),
            old.display(key)
        );
        if key == COLUMN1 || key == COLUMN2 {
            text.push_str(&format!(" [{}]", old.display(TABLE)));
        }
        if key == RELATION {
            text.push_str(" [nothing to do]");
        }
        tracing::debug!(
            model = old.str(MODEL),
            field = old.str(FIELD),
            key,
            "attribute changed"
        );

        if key != MODULE {
            self.print(old, &text);
            return;
        }

        let aliases = self.aliases;
        let old_group = aliases.module_map(old.str(MODULE));
        let new_group = aliases.module_map(new.str(MODULE));
        // A known module rename lands both lines in one bucket; keep the mirror only.
        if old_group != new_group {
            self.print(old, &text);
        }
        let mirror = format!(
            "{}: previously in module {}",
            location(new.str(MODULE), old),
            old.str(MODULE)
        );
        self.report.push(new_group, mirror);
    }
}

/// Fixed-width `module / model / field (type)` prefix.
pub fn location(module: &str, record: &Record) -> String {
    let field = record.str(FIELD);
    let mut field_repr = field.to_string();
    if field != INHERITS && field != ORDER {
        field_repr.push_str(&format!(" ({})", record.display(TYPE)));
    }
    format!(
        "{:<12} / {:<24} / {:<30}",
        module,
        record.str(MODEL),
        field_repr
    )
}
