use clap::Parser;
use miette::Result;
use catalog::cli::commands::{completions, db, import, init, list, template};
use catalog::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` ends quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;

    catalog::logging::init_tracing(if global.verbose { "debug" } else { "warn" })?;

    match cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Import(args) => import::run(args, &global),
        Commands::List(args) => list::run(args, &global),
        Commands::Template(args) => template::run(args),
        Commands::Db(cmd) => db::run(cmd, &global),
        Commands::Completions(args) => completions::run(args),
    }
}
