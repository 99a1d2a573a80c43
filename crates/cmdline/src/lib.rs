//! Declare command-line options, resolve `argv` against them, and dispatch
//! handlers.
//!
//! ```
//! use cmdline::{Declaration, Parser, SharedBuffer};
//!
//! let out = SharedBuffer::new();
//! let mut parser = Parser::new();
//! parser.set_printer(out.clone());
//! parser.push([
//!     Declaration::new("--test").short("-t").required(true),
//!     Declaration::new("--output")
//!         .short("-o")
//!         .default_value("Hello World!")
//!         .on_match(|p, value| p.print(&[value.clone(), "\n".into()])),
//! ]);
//!
//! parser.exec(&["demo", "--test", "-o=whatever"]);
//! assert_eq!(out.contents(), "whatever\n");
//! ```
//!
//! Tokens are `-short` or `--long`, optionally followed by `=value`. When
//! every required option is matched, handlers run in argument order;
//! otherwise usage text is printed. Everything borrowed from `argv` lives
//! only for that one invocation.

pub mod option;
pub mod parser;
pub mod printer;
pub mod registry;
pub mod resolve;
pub mod usage;
pub mod view;

pub use option::{Declaration, Handler, handler};
pub use parser::{EXIT_HANDLED, Outcome, Parser};
pub use printer::{FnSink, IoSink, Printer, SharedBuffer, Sink};
pub use registry::Registry;
pub use resolve::{DispatchEntry, UsageReason, resolve};
pub use view::StrView;
