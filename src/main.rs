use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use selection_lookup::actions::ActionOutcome;
use selection_lookup::config::OptionKind;
use selection_lookup::{logging, AppError, LookupRequest, SessionOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "selection-lookup",
    version,
    about = "Look up, copy or print a text selection",
    long_about = None
)]
struct Cli {
    /// Run the menu option at this display index instead of the main lookup
    #[arg(short, long, value_name = "INDEX")]
    option: Option<usize>,

    /// Use a specific settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds to keep serving copied text until a clipboard manager takes it
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    clipboard_hold: u64,

    /// List the configured menu options and exit
    #[arg(long)]
    list_options: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Selected text; read from stdin when omitted
    #[arg(name = "TEXT")]
    text: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = selection_lookup::load_settings(cli.config.as_deref())?;
    logging::init(cli.debug || settings.debug);

    if cli.list_options {
        for (index, option) in settings.options().iter().enumerate() {
            let behavior = match &option.kind {
                OptionKind::Query { prefix } => format!("query {prefix:?}"),
                OptionKind::Utility { action } => action.name().to_string(),
            };
            println!("{index}\t{}\t{behavior}", option.text.as_deref().unwrap_or("-"));
        }
        return Ok(());
    }

    let text = if cli.text.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(AppError::Input)?;
        buffer
    } else {
        cli.text.join(" ")
    };

    let mut request = LookupRequest::new(text);
    if let Some(index) = cli.option {
        request = request.with_option(index);
    }

    match selection_lookup::run(settings, &request, Duration::from_secs(cli.clipboard_hold))? {
        SessionOutcome::Inactive => eprintln!("disabled on mobile devices"),
        SessionOutcome::Hidden => eprintln!("selection too short; nothing to do"),
        SessionOutcome::Action(outcome) => report(outcome)?,
    }
    Ok(())
}

fn report(outcome: ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::LookupOpened { url } => println!("{url}"),
        ActionOutcome::Copied => println!("copied to clipboard"),
        ActionOutcome::PrintOpened => println!("opened print preview"),
        ActionOutcome::LookupFailed { url } => bail!("failed to open {url}"),
        ActionOutcome::CopyFailed => bail!("failed to copy to clipboard"),
        ActionOutcome::PrintFailed => bail!("failed to open print preview"),
    }
    Ok(())
}
