/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::ops::AddAssign;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{Error, Result};
use crate::policy::path_part::{tokenize, PathPart};
use crate::policy::restriction::RestrictionStore;

/// A generated log path: a fixed parent directory prepended at `generate()`
/// time, plus a flat sequence of parts (including `Folder` separators) that
/// make up the rotatable portion of the path. `Entity`s (the
/// directory/file segments between folder boundaries) are derived on
/// demand from the parts, not stored as a separate nested structure.
///
/// The parent directory is not subject to the folder-placement rules below
/// — those govern only the generated/matched portion, so an absolute
/// `parent` (which necessarily starts with a separator) never trips them.
#[derive(Default)]
pub struct Path {
    parent: PathBuf,
    parts: Vec<PathPart>,
}

impl Path {
    pub fn new() -> Self {
        Self {
            parent: PathBuf::new(),
            parts: Vec::new(),
        }
    }

    /// A `Path` rooted at `parent`: every generated path is `parent` joined
    /// with whatever the parts produce, and directory scanning for
    /// `Opener::Appender`/`Resizer` starts from `parent`.
    pub fn with_parent(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: parent.into(),
            parts: Vec::new(),
        }
    }

    pub fn parent_dir(&self) -> &std::path::Path {
        &self.parent
    }

    /// Appends a literal path fragment, splitting on `/`/`\` into `Text` and
    /// `Folder` parts and validating folder placement as it goes.
    pub fn add_text(&mut self, fragment: &str) -> Result<()> {
        for part in tokenize(fragment) {
            self.add_part(part)?;
        }
        Ok(())
    }

    pub fn add_part(&mut self, part: PathPart) -> Result<()> {
        if part.is_folder() {
            if self.parts.is_empty() {
                return Err(Error::PathRuleViolation(
                    "path may not begin with a folder separator".to_owned(),
                ));
            }
            if self.parts.last().map(PathPart::is_folder) == Some(true) {
                return Err(Error::PathRuleViolation(
                    "path may not contain consecutive folder separators".to_owned(),
                ));
            }
        }
        self.parts.push(part);
        Ok(())
    }

    /// Generates a concrete filesystem path: every part is generated in
    /// order and concatenated, then the result is joined onto the parent
    /// directory.
    pub fn generate(&mut self) -> PathBuf {
        let mut out = String::new();
        for part in &mut self.parts {
            out.push_str(&part.generate());
        }
        if self.parent.as_os_str().is_empty() {
            PathBuf::from(out)
        } else {
            self.parent.join(out)
        }
    }

    /// The entities (folder/file segments) making up this path, in order.
    /// Each entity owns the slice of parts between folder boundaries; the
    /// separators themselves are not part of any entity.
    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut entities = Vec::new();
        let mut start = 0;
        for (i, part) in self.parts.iter().enumerate() {
            if part.is_folder() {
                entities.push(Entity {
                    parts: &self.parts[start..i],
                });
                start = i + 1;
            }
        }
        entities.push(Entity {
            parts: &self.parts[start..],
        });
        entities
    }

    pub fn append_restrictions(&self, store: &mut RestrictionStore) {
        for part in &self.parts {
            part.append_restrictions(store);
        }
    }
}

impl AddAssign<&str> for Path {
    fn add_assign(&mut self, rhs: &str) {
        self.add_text(rhs).expect("illegal path fragment");
    }
}

impl AddAssign<PathPart> for Path {
    fn add_assign(&mut self, rhs: PathPart) {
        self.add_part(rhs).expect("illegal path part");
    }
}

/// A single folder or file segment of a `Path`: the parts between two
/// folder boundaries (or the start/end of the path).
pub struct Entity<'a> {
    parts: &'a [PathPart],
}

impl<'a> Entity<'a> {
    /// An anchored regex matching the file/folder names this entity could
    /// have generated, built by concatenating each part's pattern in order.
    pub fn matcher(&self) -> Regex {
        let mut pattern = String::from("^");
        for part in self.parts {
            pattern.push_str(&part.regex_str());
        }
        pattern.push('$');
        Regex::new(&pattern).expect("entity pattern is always valid")
    }

    /// A comparator usable with `Iterator::max_by` to find the "latest"
    /// candidate among sibling names this entity could have generated: each
    /// part's match is compared in turn with `PathPart::is_earlier`, walking
    /// left to right and stopping at the first part that disagrees.
    pub fn comparer(&self) -> impl Fn(&str, &str) -> std::cmp::Ordering + '_ {
        move |a, b| self.compare(a, b)
    }

    fn compare(&self, a: &str, b: &str) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        let mut remaining_a = a;
        let mut remaining_b = b;

        for part in self.parts {
            let re = Regex::new(&part.regex_str()).expect("part pattern is always valid");
            let match_a = re.find(remaining_a);
            let match_b = re.find(remaining_b);

            let (match_a, match_b) = match (match_a, match_b) {
                (Some(ma), Some(mb)) => (ma, mb),
                _ => return Ordering::Equal,
            };

            if part.is_earlier(match_a.as_str(), match_b.as_str()) {
                return Ordering::Less;
            }
            if part.is_earlier(match_b.as_str(), match_a.as_str()) {
                return Ordering::Greater;
            }

            remaining_a = &remaining_a[match_a.end()..];
            remaining_b = &remaining_b[match_b.end()..];
        }

        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_leading_folder() {
        let mut path = Path::new();
        assert!(path.add_part(PathPart::folder()).is_err());
    }

    #[test]
    fn rejects_consecutive_folders() {
        let mut path = Path::new();
        path.add_text("logs").unwrap();
        path.add_part(PathPart::folder()).unwrap();
        assert!(path.add_part(PathPart::folder()).is_err());
    }

    #[test]
    fn entities_split_on_folder_boundaries() {
        let mut path = Path::new();
        path.add_text("logs/app").unwrap();
        let entities = path.entities();
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn matcher_matches_generated_name() {
        let mut path = Path::new();
        path.add_part(PathPart::text("app").unwrap()).unwrap();
        path.add_part(PathPart::text(".log").unwrap()).unwrap();
        let generated = path.generate();
        let entities = path.entities();
        let matcher = entities[0].matcher();
        assert!(matcher.is_match(generated.to_str().unwrap()));
    }

    #[test]
    fn comparer_ranks_index_numerically() {
        let mut path = Path::new();
        path.add_part(PathPart::text("app-").unwrap()).unwrap();
        path.add_part(PathPart::index()).unwrap();
        let entities = path.entities();
        let cmp = entities[0].comparer();
        assert_eq!(cmp("app-2", "app-10"), std::cmp::Ordering::Less);
        assert_eq!(cmp("app-10", "app-2"), std::cmp::Ordering::Greater);
    }
}
