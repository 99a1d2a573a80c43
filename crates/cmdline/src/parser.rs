use crate::option::{Declaration, Handler, handler};
use crate::printer::{Printer, Sink};
use crate::registry::Registry;
use crate::resolve::{UsageReason, resolve};
use crate::usage::{MISSING_PATH_DIAGNOSTIC, program_name, render_default};
use crate::view::StrView;

/// Status returned by [`Parser::exec`] both after dispatching and after
/// printing usage.
pub const EXIT_HANDLED: i32 = 0;

/// What an invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// This many handlers ran.
    Dispatched(usize),
    /// Usage was printed instead.
    Usage(UsageReason),
}

impl Outcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Option declarations plus the output and usage hooks they run against.
///
/// A parser is single-threaded: handlers are reference counted with `Rc`
/// and run synchronously inside [`Parser::run`]. Share one across threads
/// only behind your own synchronisation.
///
/// Handlers receive the live parser and may print, render usage, or
/// redirect output. Pushing or clearing declarations from a handler does not
/// affect the invocation already in progress.
#[derive(Default)]
pub struct Parser<'a> {
    registry: Registry<'a>,
    usage: Option<Handler<'a>>,
    printer: Printer<'a>,
    path: Vec<u8>,
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register declarations. Those without a long name are dropped.
    pub fn push<I>(&mut self, decls: I)
    where
        I: IntoIterator<Item = Declaration<'a>>,
    {
        self.registry.push(decls);
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<'a> {
        &mut self.registry
    }

    /// Replace the built-in usage text. The renderer receives the program
    /// name with directories stripped.
    pub fn set_usage<F>(&mut self, f: F)
    where
        F: Fn(&mut Parser<'a>, &StrView<'_>) + 'a,
    {
        self.usage = Some(handler(f));
    }

    pub fn clear_usage(&mut self) {
        self.usage = None;
    }

    /// Send all later output, from usage text and handlers alike, to `sink`.
    pub fn set_printer(&mut self, sink: impl Sink + 'a) {
        self.printer.set_sink(sink);
    }

    /// Print fragments through the configured sink.
    pub fn print(&mut self, fragments: &[StrView<'_>]) {
        self.printer.print(fragments);
    }

    /// The program path from the last invocation.
    pub fn path(&self) -> StrView<'_> {
        StrView::bounded(&self.path, self.path.len())
    }

    /// Print usage text for the last invocation's program path.
    ///
    /// Without a path only a diagnostic is printed.
    pub fn print_usage(&mut self) {
        if self.path().is_empty() {
            self.printer.print(&[MISSING_PATH_DIAGNOSTIC.into()]);
            return;
        }
        match self.usage.clone() {
            Some(usage) => {
                let name = program_name(&self.path()).as_bytes().to_vec();
                usage(self, &StrView::bounded(&name, name.len()));
            }
            None => {
                let path = StrView::bounded(&self.path, self.path.len());
                render_default(&mut self.printer, &self.registry, &program_name(&path));
            }
        }
    }

    /// Resolve `argv` and run the matched handlers, or print usage.
    ///
    /// `argv[0]` is the program path. Always returns [`EXIT_HANDLED`]; use
    /// [`Parser::run`] to tell dispatch and usage apart.
    pub fn exec<S: AsRef<[u8]>>(&mut self, argv: &[S]) -> i32 {
        let _ = self.run(argv);
        EXIT_HANDLED
    }

    /// Like [`Parser::exec`], reporting what happened.
    pub fn run<S: AsRef<[u8]>>(&mut self, argv: &[S]) -> Outcome {
        let views: Vec<StrView<'_>> = argv
            .iter()
            .map(|a| StrView::unbounded(a.as_ref()))
            .collect();
        self.run_views(&views)
    }

    /// Like [`Parser::run`], over already built views.
    pub fn run_views(&mut self, argv: &[StrView<'_>]) -> Outcome {
        let Some((path, args)) = argv.split_first() else {
            self.path.clear();
            return self.fall_back(UsageReason::MissingProgramPath);
        };
        self.path = path.as_bytes().to_vec();
        if path.is_empty() {
            // An empty path prints the same diagnostic as a missing one.
            return self.fall_back(UsageReason::MissingProgramPath);
        }

        let entries = match resolve(&self.registry, args) {
            Ok(entries) => entries,
            Err(reason) => return self.fall_back(reason),
        };

        tracing::debug!(count = entries.len(), "dispatching handlers");
        for entry in &entries {
            (entry.handler)(self, &entry.value);
        }
        Outcome::Dispatched(entries.len())
    }

    fn fall_back(&mut self, reason: UsageReason) -> Outcome {
        tracing::debug!(%reason, "printing usage");
        self.print_usage();
        Outcome::Usage(reason)
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("registry", &self.registry)
            .field("custom_usage", &self.usage.is_some())
            .field("printer", &self.printer)
            .field("path", &self.path())
            .finish()
    }
}
