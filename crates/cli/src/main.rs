mod manifest;

use anyhow::Result;
use cmdline::{Declaration, IoSink, Parser};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{OptionManifest, OptionSpec};

fn builtin_declarations<'a>() -> [Declaration<'a>; 3] {
    [
        Declaration::new("--help")
            .short("-h")
            .description("Print usage.")
            .on_match(|p, _| p.print_usage()),
        Declaration::new("--test")
            .short("-t")
            .description("You must use this option.")
            .required(true),
        Declaration::new("--output")
            .short("-o")
            .description("Print text.")
            .default_value("Hello World!")
            .on_match(|p, text| p.print(&[text.clone(), "\n".into()])),
    ]
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let manifest: Option<OptionManifest> = manifest::load_from_env()?;
    let argv: Vec<OsString> = std::env::args_os().collect();
    let argv: Vec<&[u8]> = argv.iter().map(|a| a.as_encoded_bytes()).collect();

    let mut parser = Parser::new();
    parser.set_printer(IoSink::stdout());
    parser.push(builtin_declarations());
    if let Some(manifest) = &manifest {
        tracing::debug!(count = manifest.options.len(), "registering manifest options");
        parser.push(manifest.options.iter().map(OptionSpec::declaration));
    }

    let status = parser.exec(&argv);
    Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
