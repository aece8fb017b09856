use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use printer_intents::{intents, Config, Printer};
use tracing_subscriber::prelude::*;

/// Send one-shot commands to OctoPrint printers.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "printer-intents")]
struct Cli {
    /// Config file listing printers.
    #[arg(long, short, default_value = "printers.toml")]
    config: PathBuf,

    /// Which configured printer to talk to. Without it, the config's
    /// default printer is used.
    #[arg(long, short)]
    printer: Option<String>,

    /// Tunnel endpoint URL to use instead of a configured printer.
    /// Credentials embedded in the URL become HTTP Basic auth.
    #[arg(long, conflicts_with = "printer")]
    tunnel: Option<String>,

    /// API key for --tunnel.
    #[arg(long, env = "OCTOPRINT_API_KEY")]
    api_key: Option<String>,

    /// Print outcomes as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the heated bed's target temperature.
    Bed {
        /// Target in degrees celsius; leave it out to turn the bed off.
        /// Negative values also turn the heater off.
        #[arg(allow_negative_numbers = true)]
        target: Option<i32>,
    },
    /// Set a hotend's target temperature.
    Tool {
        /// Which extruder to set; the first one when left out.
        #[arg(long)]
        tool: Option<u32>,

        /// Target in degrees celsius; leave it out to turn the hotend off.
        /// Negative values also turn the heater off.
        #[arg(allow_negative_numbers = true)]
        target: Option<i32>,
    },
    /// Turn the first extruder and the heated bed off.
    Cooldown,
    /// Pause the running print job.
    Pause,
    /// Resume a paused print job.
    Resume,
    /// Cancel the running print job.
    Cancel,
    /// Restart a paused print job from the beginning.
    Restart,
    /// Show how much print time is left.
    Eta,
    /// Show the time left on every configured printer.
    Dashboard,
    /// List the objects of the running print, via the cancelobject plugin.
    Objects {
        /// Cancel the object with this id instead of listing.
        #[arg(long)]
        cancel: Option<i64>,
    },
    /// Delete a file stored on the printer.
    DeleteFile {
        /// Where the file lives, `local` or `sdcard`.
        origin: octoprint::FileOrigin,

        /// Path of the file on that storage.
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::Layer::default())
        .init();

    if matches!(cli.command, Commands::Dashboard) {
        let config = Config::from_file(&cli.config)?;
        return dashboard(&config, cli.json).await;
    }

    let printer = select_printer(&cli)?;
    match cli.command {
        Commands::Bed { target } => {
            report_target(cli.json, "bed", intents::set_bed_temperature(&printer, target).await)
        }
        Commands::Tool { tool, target } => report_target(
            cli.json,
            "tool",
            intents::set_tool_temperature(&printer, tool, target).await,
        ),
        Commands::Cooldown => report_command(cli.json, "cool down", intents::cool_down(&printer).await),
        Commands::Pause => report_command(cli.json, "pause", intents::pause_job(&printer).await),
        Commands::Resume => report_command(cli.json, "resume", intents::resume_job(&printer).await),
        Commands::Cancel => report_command(cli.json, "cancel", intents::cancel_job(&printer).await),
        Commands::Restart => report_command(cli.json, "restart", intents::restart_job(&printer).await),
        Commands::Eta => report_eta(cli.json, intents::remaining_time(&printer).await),
        Commands::Objects { cancel } => objects(cli.json, &printer, cancel).await,
        Commands::DeleteFile { origin, path } => delete_file(&printer, origin, &path).await,
        // Handled before printer selection.
        Commands::Dashboard => Ok(()),
    }
}

/// Figure out which printer the command is aimed at: a tunnel endpoint
/// when one was given, a configured printer otherwise.
fn select_printer(cli: &Cli) -> Result<Printer> {
    if let Some(endpoint) = &cli.tunnel {
        let api_key = cli
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--tunnel needs an api key, via --api-key or OCTOPRINT_API_KEY"))?;
        return Printer::from_tunnel_url(api_key, endpoint);
    }

    let config = Config::from_file(&cli.config)?;
    Ok(config.printer(cli.printer.as_deref())?.clone())
}

fn report_command(json: bool, action: &str, outcome: intents::CommandOutcome) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else if outcome.accepted {
        println!("{}: accepted (status {})", action, outcome.status);
    } else if outcome.status == intents::NO_RESPONSE {
        println!("{}: no response from the printer", action);
    } else {
        println!("{}: refused (status {})", action, outcome.status);
    }

    if outcome.accepted {
        Ok(())
    } else {
        anyhow::bail!("{} was not accepted", action)
    }
}

fn report_target(json: bool, heater: &str, outcome: intents::TargetOutcome) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else if outcome.accepted && outcome.target == 0 {
        println!("{}: heater off (status {})", heater, outcome.status);
    } else if outcome.accepted {
        println!("{}: target set to {}°C (status {})", heater, outcome.target, outcome.status);
    } else if outcome.status == intents::NO_RESPONSE {
        println!("{}: no response from the printer", heater);
    } else {
        println!("{}: refused (status {})", heater, outcome.status);
    }

    if outcome.accepted {
        Ok(())
    } else {
        anyhow::bail!("setting the {} target was not accepted", heater)
    }
}

fn report_eta(json: bool, outcome: intents::RemainingTime) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        match outcome.display.as_deref() {
            Some("") => println!("no print time left"),
            Some("0") => println!("printing, but no estimate is available"),
            Some(display) => println!("{} left", display),
            None if outcome.status == intents::NO_RESPONSE => println!("no response from the printer"),
            None => println!("job state unavailable (status {})", outcome.status),
        }
    }

    if outcome.accepted {
        Ok(())
    } else {
        anyhow::bail!("the job query was not answered usefully")
    }
}

/// Query every configured printer at once and print one line per printer.
async fn dashboard(config: &Config, json: bool) -> Result<()> {
    let mut names: Vec<&String> = config.printers.keys().collect();
    names.sort();

    let queries = names.iter().map(|name| intents::remaining_time(&config.printers[name.as_str()]));
    let outcomes = futures::future::join_all(queries).await;

    for (name, outcome) in names.iter().zip(outcomes) {
        if json {
            println!("{}", serde_json::to_string(&serde_json::json!({"printer": name, "outcome": outcome}))?);
            continue;
        }

        match outcome.display.as_deref() {
            Some("") => println!("{:20} idle", name),
            Some("0") => println!("{:20} printing, no estimate", name),
            Some(display) => println!("{:20} {} left", name, display),
            None => println!("{:20} unreachable", name),
        }
    }

    Ok(())
}

async fn objects(json: bool, printer: &Printer, cancel: Option<i64>) -> Result<()> {
    let client = printer.client()?;

    if let Some(id) = cancel {
        let status = client.cancel_object(id).await?;
        anyhow::ensure!(
            status.is_success(),
            "cancelling object {} was refused (status {})",
            id,
            status
        );
        println!("object {} cancelled", id);
        return Ok(());
    }

    let objects = client.cancel_object_list().await?;
    if json {
        println!("{}", serde_json::to_string(&objects)?);
        return Ok(());
    }

    for object in objects {
        let mut flags = vec![];
        if object.active {
            flags.push("active");
        }
        if object.cancelled {
            flags.push("cancelled");
        }
        if object.ignore {
            flags.push("ignored");
        }
        println!("{:4} {:30} {}", object.id, object.object, flags.join(" "));
    }

    Ok(())
}

async fn delete_file(printer: &Printer, origin: octoprint::FileOrigin, path: &str) -> Result<()> {
    let status = printer.client()?.delete_file(origin, path).await?;

    if status == octoprint::StatusCode::CONFLICT {
        anyhow::bail!("{} is in use by the running job", path);
    }
    anyhow::ensure!(status.is_success(), "deleting {} was refused (status {})", path, status);

    println!("{} deleted", path);
    Ok(())
}
