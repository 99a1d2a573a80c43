//! Default usage text.

use crate::option::Declaration;
use crate::printer::Printer;
use crate::registry::Registry;
use crate::view::StrView;

/// Printed instead of usage text when there is no program path to name.
pub const MISSING_PATH_DIAGNOSTIC: &str =
    "Must have at least one argument (the path of the current program).\n";

/// Strip any directory prefix from `path`.
///
/// Both `\` and `/` count as separators; the rightmost one wins.
pub fn program_name<'p>(path: &StrView<'p>) -> StrView<'p> {
    let backslash = path.find_last_of(b'\\');
    let slash = path.find_last_of(b'/');
    match backslash.max(slash) {
        Some(at) => path.substr(at + 1, None),
        None => path.clone(),
    }
}

/// Render the built-in usage text for `registry` to `printer`.
///
/// ```text
/// Usage: <name> <required long[=default]>... [OPTIONS]...
/// Options:
///   -s, --long<TAB>description[=default]
/// ```
pub fn render_default(printer: &mut Printer<'_>, registry: &Registry<'_>, name: &StrView<'_>) {
    printer.print(&["Usage: ".into(), name.clone(), " ".into()]);
    for decl in registry.required() {
        print_name_with_default(printer, decl);
        printer.print(&[" ".into()]);
    }
    printer.print(&["[OPTIONS]...\n".into(), "Options:\n".into()]);
    for decl in registry.iter() {
        print_option_line(printer, decl);
    }
}

fn print_long(printer: &mut Printer<'_>, decl: &Declaration<'_>) {
    if let Some(long) = &decl.long {
        printer.print(&[long.clone()]);
    }
}

fn print_name_with_default(printer: &mut Printer<'_>, decl: &Declaration<'_>) {
    print_long(printer, decl);
    if !decl.default.is_empty() {
        printer.print(&["=".into(), decl.default.clone()]);
    }
}

fn print_option_line(printer: &mut Printer<'_>, decl: &Declaration<'_>) {
    printer.print(&["  ".into()]);
    if let Some(short) = decl.short.as_ref().filter(|s| !s.is_empty()) {
        printer.print(&[short.clone(), ", ".into()]);
    }
    print_long(printer, decl);
    printer.print(&["\t".into(), decl.description.clone()]);
    if !decl.default.is_empty() {
        printer.print(&["[=".into(), decl.default.clone(), "]".into()]);
    }
    printer.print(&["\n".into()]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::SharedBuffer;

    #[test]
    fn program_name_strips_directories() {
        let name = |p: &'static str| program_name(&StrView::from(p)).to_string();
        assert_eq!(name("/usr/local/bin/tool"), "tool");
        assert_eq!(name("C:\\tools\\tool.exe"), "tool.exe");
        assert_eq!(name("C:\\mixed/dirs\\tool"), "tool");
        assert_eq!(name("C:\\mixed\\dirs/tool"), "tool");
        assert_eq!(name("tool"), "tool");
        assert_eq!(name("/"), "");
    }

    #[test]
    fn default_usage_lists_required_then_optional() {
        let mut reg = Registry::new();
        reg.push([
            Declaration::new("--help").short("-h").description("Print usage."),
            Declaration::new("--test")
                .short("-t")
                .description("You must use this option.")
                .required(true),
            Declaration::new("--output")
                .short("-o")
                .description("Print text.")
                .default_value("Hello World!"),
        ]);

        let buf = SharedBuffer::new();
        let mut printer = Printer::with_sink(buf.clone());
        render_default(&mut printer, &reg, &"tool".into());

        let text = buf.contents();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Usage: tool --test [OPTIONS]...");
        assert_eq!(lines[1], "Options:");
        assert_eq!(lines[2], "  -t, --test\tYou must use this option.");
        assert_eq!(lines[3], "  -h, --help\tPrint usage.");
        assert_eq!(lines[4], "  -o, --output\tPrint text.[=Hello World!]");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn required_default_appears_in_summary() {
        let mut reg = Registry::new();
        reg.push([Declaration::new("--mode")
            .default_value("fast")
            .required(true)]);

        let buf = SharedBuffer::new();
        let mut printer = Printer::with_sink(buf.clone());
        render_default(&mut printer, &reg, &"tool".into());

        let text = buf.contents();
        assert!(text.starts_with("Usage: tool --mode=fast [OPTIONS]...\n"));
        assert!(text.contains("  --mode\t[=fast]\n"));
    }
}
