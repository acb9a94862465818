use power_drill::cli::{CliInterface, install_interrupt_handler, parse_cli};
use power_drill::error::AppError;
use power_drill::logging::{default_log_path, init_logging};
use power_drill::session::{RandomOrder, Shuffle};
use power_drill::tui::TuiInterface;
use power_drill::{DriverOutcome, info_log, run_drill};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    // the full-screen interface owns the terminal, so its logs go to a file
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| if cli.tui { default_log_path() } else { None });
    if let Err(e) = init_logging(log_file.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
    }

    let mut shuffler = match cli.seed {
        Some(seed) => RandomOrder::seeded(seed),
        None => RandomOrder::from_entropy(),
    };

    match run(&cli, &mut shuffler) {
        Ok(outcome) => {
            info_log!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &power_drill::cli::Cli, shuffler: &mut dyn Shuffle) -> Result<DriverOutcome, AppError> {
    let overrides = cli.overrides();
    if cli.tui {
        let mut interface = TuiInterface::new()?;
        let outcome = run_drill(&mut interface, &overrides, shuffler)?;
        interface.wait_for_exit();
        Ok(outcome)
    } else {
        if let Err(e) = install_interrupt_handler() {
            log::warn!("Failed to install Ctrl-C handler: {e}");
        }
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        run_drill(&mut interface, &overrides, shuffler)
    }
}
