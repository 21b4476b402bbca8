use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for isleworld")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Run the ocean update bench
    Bench,
    /// Build rustdoc for the workspace
    Doc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in [Step::Fmt, Step::Clippy, Step::Test, Step::Doc] {
                step.run()?;
            }
        }
        Commands::Fmt => Step::Fmt.run()?,
        Commands::Clippy => Step::Clippy.run()?,
        Commands::Test => Step::Test.run()?,
        Commands::Bench => Step::Bench.run()?,
        Commands::Doc => Step::Doc.run()?,
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Fmt,
    Clippy,
    Test,
    Bench,
    Doc,
}

impl Step {
    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Fmt => &["fmt", "--all", "--", "--check"],
            Self::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Self::Test => &["test", "--workspace"],
            Self::Bench => &["bench", "-p", "isleworld-ocean"],
            Self::Doc => &["doc", "--workspace", "--no-deps"],
        }
    }

    fn run(self) -> Result<()> {
        let args = self.args();
        println!("==> Running cargo {}", args.join(" "));
        let status = Command::new("cargo").args(args).status()?;
        if !status.success() {
            anyhow::bail!("cargo {} failed ({status})", args[0]);
        }
        Ok(())
    }
}
