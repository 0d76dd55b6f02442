use env_logger::Env;
use log::{info, warn};
use ptp_plot::plot::{parse_cli, PlotArgs};
use ptp_plot::runner::{show, PlotRunner};
use ptp_plot::PlotError;

fn run(args: PlotArgs) -> Result<(), PlotError> {
    info!(
        "read data from {} and plot to {}.svg",
        args.input.display(),
        args.name
    );
    let mut runner = PlotRunner::new(args.style)?;
    let data = runner.load(&args.input, &args.column)?;
    let (_, svgout) = runner.plot_data(&data, &args.name)?;
    if args.show {
        if let Err(e) = show(&svgout) {
            warn!("{}", e);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = parse_cli();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
