use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let printer = octoprint::Client::new(&args[1], &args[2])?;
    let snapshot = printer.job_info().await?;
    eprintln!("Server answered {}", snapshot.status);

    let info = match snapshot.info {
        Some(info) => info,
        None => {
            eprintln!("No job information in the response");
            return Ok(());
        }
    };

    if let Some(state) = &info.state {
        eprintln!("State: {}", state);
    }
    if let Some(file) = info.job.as_ref().and_then(|job| job.file.as_ref()) {
        if let Some(name) = &file.name {
            eprintln!("File: {}", name);
        }
    }
    if let Some(completion) = info.progress.completion {
        eprintln!("Completion: {:.1}%", completion);
    }
    if let Some(left) = info.progress.print_time_left {
        eprintln!("Time left: {}s", left);
    }

    Ok(())
}
