// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Directive parsing.
//!
//! A directive is a single line comment addressed to one generator module:
//!
//! ```text
//! //repogen:<module>[:<directive>] [<args>]
//! ```
//!
//! | Comment | Module | Directive | Args |
//! |---------|--------|-----------|------|
//! | `//repogen:crud` | `crud` | | |
//! | `//repogen:crud get delete` | `crud` | | `get delete` |
//! | `//repogen:crud:plural People` | `crud` | `plural` | `People` |
//! | `//repogen:search:extra Q string` | `search` | `extra` | `Q string` |
//!
//! Only the first terminator after the prefix matters: a space ends the
//! module and starts the arguments, a colon ends the module and starts the
//! directive. The scan is a single left-to-right pass.

/// Prefix every directive comment starts with.
pub const PREFIX: &str = "//repogen:";

/// One parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Module the directive is addressed to.
    pub module:    String,
    /// Optional sub-directive, empty when absent.
    pub directive: String,
    /// Free-form arguments, empty when absent.
    pub args:      String
}

impl Directive {
    /// Parse a raw comment line.
    ///
    /// Returns `None` when the line does not start with [`PREFIX`] or the
    /// module name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use repogen_core::Directive;
    ///
    /// let dir = Directive::parse("//repogen:crud:plural People").unwrap();
    /// assert_eq!(dir.module, "crud");
    /// assert_eq!(dir.directive, "plural");
    /// assert_eq!(dir.args, "People");
    ///
    /// assert!(Directive::parse("// repogen:crud").is_none());
    /// ```
    #[must_use]
    pub fn parse(comment: &str) -> Option<Self> {
        let rest = comment.strip_prefix(PREFIX)?;

        for (i, c) in rest.char_indices() {
            match c {
                ' ' => {
                    if i == 0 {
                        return None;
                    }
                    return Some(Self {
                        module:    rest[..i].to_owned(),
                        directive: String::new(),
                        args:      rest[i + 1..].to_owned()
                    });
                }
                ':' => {
                    if i == 0 {
                        return None;
                    }
                    let tail = &rest[i + 1..];
                    let (directive, args) = tail.split_once(' ').unwrap_or((tail, ""));
                    return Some(Self {
                        module:    rest[..i].to_owned(),
                        directive: directive.to_owned(),
                        args:      args.to_owned()
                    });
                }
                _ => {}
            }
        }

        Some(Self {
            module:    rest.to_owned(),
            directive: String::new(),
            args:      String::new()
        })
    }

    /// Parse every directive out of a sequence of comment lines.
    ///
    /// Lines that are not directives are dropped; order is preserved.
    pub fn parse_all<'a>(comments: impl IntoIterator<Item = &'a str>) -> Vec<Self> {
        comments.into_iter().filter_map(Self::parse).collect()
    }

    /// Check if this is the bare module directive, without a sub-directive.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.directive.is_empty()
    }

    /// Arguments split on single spaces.
    ///
    /// Empty arguments yield no words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.args.split(' ').filter(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(module: &str, directive: &str, args: &str) -> Directive {
        Directive {
            module:    module.into(),
            directive: directive.into(),
            args:      args.into()
        }
    }

    #[test]
    fn module_only() {
        assert_eq!(Directive::parse("//repogen:crud"), Some(dir("crud", "", "")));
    }

    #[test]
    fn module_with_args() {
        assert_eq!(
            Directive::parse("//repogen:crud get delete"),
            Some(dir("crud", "", "get delete"))
        );
    }

    #[test]
    fn module_with_directive() {
        assert_eq!(
            Directive::parse("//repogen:crud:repository Widgets"),
            Some(dir("crud", "repository", "Widgets"))
        );
    }

    #[test]
    fn directive_without_args() {
        assert_eq!(
            Directive::parse("//repogen:bob:models"),
            Some(dir("bob", "models", ""))
        );
    }

    #[test]
    fn args_keep_later_colons_and_spaces() {
        assert_eq!(
            Directive::parse("//repogen:repo:extra Count(ctx context.Context) (int, error)"),
            Some(dir("repo", "extra", "Count(ctx context.Context) (int, error)"))
        );
        assert_eq!(
            Directive::parse("//repogen:search a:b"),
            Some(dir("search", "", "a:b"))
        );
    }

    #[test]
    fn empty_module_is_rejected() {
        assert_eq!(Directive::parse("//repogen: crud"), None);
        assert_eq!(Directive::parse("//repogen::crud"), None);
    }

    #[test]
    fn empty_remainder_is_empty_module() {
        assert_eq!(Directive::parse("//repogen:"), Some(dir("", "", "")));
    }

    #[test]
    fn foreign_comments_are_ignored() {
        assert_eq!(Directive::parse("// Widget is a widget."), None);
        assert_eq!(Directive::parse("/*repogen:crud*/"), None);
        assert_eq!(Directive::parse("//go:generate repogen"), None);
    }

    #[test]
    fn parse_all_keeps_order() {
        let dirs = Directive::parse_all([
            "// Widget docs",
            "//repogen:crud",
            "//repogen:search:extra Q string"
        ]);
        assert_eq!(dirs, vec![dir("crud", "", ""), dir("search", "extra", "Q string")]);
    }

    #[test]
    fn words_skip_empty_args() {
        assert_eq!(dir("crud", "", "").words().count(), 0);
        assert_eq!(dir("crud", "", "get edit").words().collect::<Vec<_>>(), ["get", "edit"]);
    }
}
