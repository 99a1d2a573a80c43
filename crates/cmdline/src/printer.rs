//! Output sinks for usage text and handler output.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::view::StrView;

/// A destination for text fragments.
pub trait Sink {
    fn write_view(&mut self, fragment: &StrView<'_>);

    /// Called once after each [`Printer::print`] batch.
    fn flush(&mut self) {}
}

impl Sink for String {
    fn write_view(&mut self, fragment: &StrView<'_>) {
        self.push_str(&fragment.to_string_lossy());
    }
}

/// Forwards fragments to an [`io::Write`].
///
/// Write errors are logged and dropped; printing never fails.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl IoSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write_view(&mut self, fragment: &StrView<'_>) {
        if let Err(err) = self.inner.write_all(fragment.as_bytes()) {
            tracing::warn!(error = %err, "failed to write output fragment");
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.inner.flush() {
            tracing::warn!(error = %err, "failed to flush output");
        }
    }
}

/// Adapts a closure into a [`Sink`].
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: FnMut(&StrView<'_>),
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&StrView<'_>),
{
    fn write_view(&mut self, fragment: &StrView<'_>) {
        (self.0)(fragment)
    }
}

/// An in-memory sink whose clones share one buffer.
///
/// Hand one clone to the parser and keep another to read what was printed.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<String>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    /// Return the buffered text and leave the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Sink for SharedBuffer {
    fn write_view(&mut self, fragment: &StrView<'_>) {
        self.0.borrow_mut().write_view(fragment);
    }
}

/// Routes fragments to the configured sink. Without one, printing does
/// nothing.
#[derive(Default)]
pub struct Printer<'a> {
    sink: Option<Box<dyn Sink + 'a>>,
}

impl<'a> Printer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: impl Sink + 'a) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    /// Redirect all later output to `sink`.
    pub fn set_sink(&mut self, sink: impl Sink + 'a) {
        self.sink = Some(Box::new(sink));
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn print(&mut self, fragments: &[StrView<'_>]) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        for fragment in fragments {
            sink.write_view(fragment);
        }
        sink.flush();
    }
}

impl std::fmt::Debug for Printer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("has_sink", &self.has_sink())
            .finish()
    }
}
