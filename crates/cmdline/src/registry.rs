use std::collections::VecDeque;

use crate::option::Declaration;

/// Declared options, split into required and optional sets.
///
/// Insertion order is kept in both sets. It is the order usage text lists
/// them in.
#[derive(Debug, Clone, Default)]
pub struct Registry<'a> {
    required: VecDeque<Declaration<'a>>,
    optional: VecDeque<Declaration<'a>>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append declarations to the set matching each one's `required` flag.
    ///
    /// Declarations without a long name are skipped. Names are not
    /// deduplicated.
    pub fn push<I>(&mut self, decls: I)
    where
        I: IntoIterator<Item = Declaration<'a>>,
    {
        for decl in decls {
            if !decl.is_well_formed() {
                tracing::debug!(?decl, "dropping declaration without a long name");
                continue;
            }
            if decl.required {
                self.required.push_back(decl);
            } else {
                self.optional.push_back(decl);
            }
        }
    }

    pub fn clear(&mut self) {
        self.required.clear();
        self.optional.clear();
    }

    pub fn required(&self) -> &VecDeque<Declaration<'a>> {
        &self.required
    }

    pub fn required_mut(&mut self) -> &mut VecDeque<Declaration<'a>> {
        &mut self.required
    }

    pub fn optional(&self) -> &VecDeque<Declaration<'a>> {
        &self.optional
    }

    pub fn optional_mut(&mut self) -> &mut VecDeque<Declaration<'a>> {
        &mut self.optional
    }

    /// Required declarations followed by optional ones.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration<'a>> {
        self.required.iter().chain(self.optional.iter())
    }

    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::StrView;

    fn longs(decls: &VecDeque<Declaration<'_>>) -> Vec<String> {
        decls
            .iter()
            .filter_map(|d| d.long.as_ref())
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn push_partitions_by_required_flag() {
        let mut reg = Registry::new();
        reg.push([
            Declaration::new("--help"),
            Declaration::new("--test").required(true),
            Declaration::new("--output"),
            Declaration::new("--input").required(true),
        ]);
        assert_eq!(longs(reg.required()), ["--test", "--input"]);
        assert_eq!(longs(reg.optional()), ["--help", "--output"]);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn push_drops_declarations_without_long_name() {
        let mut reg = Registry::new();
        reg.push([
            Declaration::default().short("-x").required(true),
            Declaration {
                long: Some(StrView::empty()),
                ..Declaration::default()
            },
            Declaration::new("--kept"),
        ]);
        assert!(reg.required().is_empty());
        assert_eq!(longs(reg.optional()), ["--kept"]);
    }

    #[test]
    fn push_keeps_duplicates_and_appends() {
        let mut reg = Registry::new();
        reg.push([Declaration::new("--dup")]);
        reg.push([Declaration::new("--dup")]);
        assert_eq!(longs(reg.optional()), ["--dup", "--dup"]);
    }

    #[test]
    fn clear_empties_both_sets() {
        let mut reg = Registry::new();
        reg.push([
            Declaration::new("--a").required(true),
            Declaration::new("--b"),
        ]);
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.iter().count(), 0);
    }

    #[test]
    fn iter_lists_required_first() {
        let mut reg = Registry::new();
        reg.push([
            Declaration::new("--opt"),
            Declaration::new("--req").required(true),
        ]);
        let order: Vec<String> = reg
            .iter()
            .filter_map(|d| d.long.as_ref().map(|l| l.to_string()))
            .collect();
        assert_eq!(order, ["--req", "--opt"]);
    }
}
