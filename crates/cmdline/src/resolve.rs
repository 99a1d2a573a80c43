//! Matching argument tokens against declarations.

use std::collections::VecDeque;
use std::fmt;

use crate::option::{Declaration, Handler};
use crate::registry::Registry;
use crate::view::StrView;

/// Why an invocation fell back to usage text instead of dispatching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageReason {
    #[error("at least one argument (the program path) is required")]
    MissingProgramPath,
    #[error("no options were given after the program path")]
    NoArguments,
    #[error("matched {matched} of {expected} required options")]
    MissingRequired { matched: usize, expected: usize },
    #[error("no argument matched a declared option")]
    NothingMatched,
}

/// A matched token: the handler to run and the value to hand it.
#[derive(Clone)]
pub struct DispatchEntry<'a, 'v> {
    pub handler: Handler<'a>,
    pub value: StrView<'v>,
}

impl fmt::Debug for DispatchEntry<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Match `args` (program path already removed) against `registry`.
///
/// Each token is split at its first `=`. The key is tested against every
/// required declaration and then every optional one; each match appends a
/// dispatch entry carrying the literal value, or the declaration default when
/// the token has no `=`.
///
/// Resolution succeeds when the number of required matches equals the number
/// of required declarations and at least one entry was produced. The count is
/// per match, so a required flag given twice counts twice and can stand in
/// for a missing one.
pub fn resolve<'v, 'a: 'v>(
    registry: &Registry<'a>,
    args: &[StrView<'v>],
) -> Result<Vec<DispatchEntry<'a, 'v>>, UsageReason> {
    if args.is_empty() {
        return Err(UsageReason::NoArguments);
    }

    let mut entries = Vec::new();
    let mut matched = 0usize;
    for arg in args {
        let (key, value) = arg.split_once(b'=');
        matched += collect_matches(registry.required(), &key, value.as_ref(), &mut entries);
        collect_matches(registry.optional(), &key, value.as_ref(), &mut entries);
    }

    let expected = registry.required().len();
    tracing::debug!(
        tokens = args.len(),
        entries = entries.len(),
        matched,
        expected,
        "resolved arguments"
    );

    if matched != expected {
        return Err(UsageReason::MissingRequired { matched, expected });
    }
    if entries.is_empty() {
        return Err(UsageReason::NothingMatched);
    }
    Ok(entries)
}

fn collect_matches<'v, 'a: 'v>(
    decls: &VecDeque<Declaration<'a>>,
    key: &StrView<'v>,
    value: Option<&StrView<'v>>,
    entries: &mut Vec<DispatchEntry<'a, 'v>>,
) -> usize {
    let mut hits = 0;
    for decl in decls {
        if !decl.matches(key) {
            continue;
        }
        let value = match value {
            Some(v) => v.clone(),
            None => decl.default.clone(),
        };
        entries.push(DispatchEntry {
            handler: decl.handler.clone(),
            value,
        });
        hits += 1;
    }
    hits
}
