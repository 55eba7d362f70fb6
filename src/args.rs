pub use clap::Parser;

/// Create a TypeScript HTTP service from templates.
///
/// The project name, tsconfig strictness and git setup are asked
/// interactively.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Args {
    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,
}
