use clap::Parser;
use env_logger::Env;
use miette::Result;
use schem::cli::commands::{numeric, replay};
use schem::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // RUST_LOG takes precedence over --debug
    let env = if cli.global.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let global = &cli.global;
    match cli.command {
        Commands::Parse(args) => numeric::run_parse(args, global),
        Commands::Split(args) => numeric::run_split(args, global),
        Commands::Format(args) => numeric::run_format(args, global),
        Commands::Round(args) => numeric::run_round(args, global),
        Commands::Magnitude(args) => numeric::run_magnitude(args, global),
        Commands::Options(args) => numeric::run_options(args, global),
        Commands::Replay(args) => replay::run(args, global),
    }
}
