use clap::Parser;
use ljdrift::cli::{Args, handle_list_integrators, init_tracing, load_and_apply_config};
use ljdrift::output::{CsvSink, Manifest};
use ljdrift::simulation::{RunReport, Study};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_integrators {
        handle_list_integrators();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every timestep configuration succeeded
fn run(args: &Args) -> ljdrift::Result<bool> {
    let config = load_and_apply_config(args)?;

    if let Some(path) = &args.write_config {
        config.save(path)?;
        info!("Wrote configuration to {}", path.display());
    }

    let study = Study::new(
        config.constants(),
        config.initial_system()?,
        config.run_plan(),
    )?;

    let mut sink = CsvSink::new(&config.output.directory).with_precision(config.output.precision);
    let reports = study.run(&mut sink);

    let manifest = Manifest::new(&config, &reports);
    let path = manifest.write(sink.directory())?;
    info!(
        files = sink.written().len(),
        "Wrote manifest to {}",
        path.display()
    );

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        error!("{failed} of {} configurations failed", reports.len());
    }
    Ok(reports.iter().all(RunReport::is_ok))
}
