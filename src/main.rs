use better_rest::app::form::{coffee_label, DISMISS_LABEL, FORM_TITLE};
use better_rest::utils::error::BedtimeError;
use better_rest::utils::logger;
use better_rest::{BedtimeForm, CliConfig, OutputFormat, TomlConfig};
use clap::Parser;
use serde::Serialize;

#[derive(Serialize)]
struct AlertOutput<'a> {
    title: &'a str,
    message: &'a str,
    dismiss: &'a str,
    bedtime: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // The config file can turn on verbose or JSON logging, so read it before the logger exists.
    let file = cli.load_file();
    let file_ref = file.as_ref().ok();
    let verbose = cli.verbose || file_ref.is_some_and(TomlConfig::verbose);
    let json = cli.format == OutputFormat::Json || file_ref.is_some_and(TomlConfig::json_logging);
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting {}", FORM_TITLE);
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match file.and_then(|file| cli.settings(&file)) {
        Ok(settings) => settings,
        Err(e) => exit_with_config_error(&e),
    };

    let mut form = settings.form();
    tracing::debug!(
        "Form: sleep {}, wake {}, coffee {}, model {}",
        form.sleep_label(),
        form.wake_up.format("%H:%M"),
        coffee_label(form.coffee_amount),
        settings.model_path.as_deref().unwrap_or("bundled")
    );

    let outcome = form.calculate_bedtime(&settings.model_source());
    render_alert(&form, cli.format)?;
    form.dismiss_alert();

    if outcome.is_err() {
        std::process::exit(2);
    }

    Ok(())
}

fn render_alert(form: &BedtimeForm, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", form.alert_title);
            println!("{}", form.alert_message);
            println!("[{}]", DISMISS_LABEL);
        }
        OutputFormat::Json => {
            let output = AlertOutput {
                title: &form.alert_title,
                message: &form.alert_message,
                dismiss: DISMISS_LABEL,
                bedtime: form
                    .last_bedtime()
                    .map(|b| b.time.format("%H:%M").to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn exit_with_config_error(e: &BedtimeError) -> ! {
    tracing::error!(
        "Configuration validation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Suggestion: {}", e.recovery_suggestion());
    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());
    std::process::exit(1);
}
