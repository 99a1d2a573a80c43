use std::fmt;
use std::rc::Rc;

use crate::parser::Parser;
use crate::view::StrView;

/// Callback run for a matched option, or in place of the default usage text.
///
/// It receives the live parser and the resolved value (the `=value` part of
/// the token, the declaration default, or the program name for usage
/// renderers).
pub type Handler<'a> = Rc<dyn Fn(&mut Parser<'a>, &StrView<'_>) + 'a>;

/// Wrap a closure as a [`Handler`].
pub fn handler<'a, F>(f: F) -> Handler<'a>
where
    F: Fn(&mut Parser<'a>, &StrView<'_>) + 'a,
{
    Rc::new(f)
}

/// One declared option.
///
/// The long name is the option's identity; a declaration without one is
/// dropped when pushed into a parser.
#[derive(Clone)]
pub struct Declaration<'a> {
    pub short: Option<StrView<'a>>,
    pub long: Option<StrView<'a>>,
    pub description: StrView<'a>,
    pub required: bool,
    /// Value handed to the handler when the token carries no `=value`.
    pub default: StrView<'a>,
    pub handler: Handler<'a>,
}

impl<'a> Declaration<'a> {
    /// An optional declaration named `long`, with an empty default and a
    /// handler that does nothing.
    pub fn new(long: impl Into<StrView<'a>>) -> Self {
        Self {
            long: Some(long.into()),
            ..Self::default()
        }
    }

    pub fn short(mut self, short: impl Into<StrView<'a>>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn description(mut self, description: impl Into<StrView<'a>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, default: impl Into<StrView<'a>>) -> Self {
        self.default = default.into();
        self
    }

    pub fn on_match<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Parser<'a>, &StrView<'_>) + 'a,
    {
        self.handler = handler(f);
        self
    }

    /// Whether the declaration has a non-empty long name.
    pub fn is_well_formed(&self) -> bool {
        self.long.as_ref().is_some_and(|l| !l.is_empty())
    }

    /// Whether `key` equals the short or the long name.
    pub fn matches(&self, key: &StrView<'_>) -> bool {
        self.short.as_ref().is_some_and(|s| s == key)
            || self.long.as_ref().is_some_and(|l| l == key)
    }
}

impl Default for Declaration<'_> {
    fn default() -> Self {
        Self {
            short: None,
            long: None,
            description: StrView::empty(),
            required: false,
            default: StrView::empty(),
            handler: handler(|_, _| {}),
        }
    }
}

impl fmt::Debug for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
