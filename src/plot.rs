use super::style::{PlotStyle, DEFAULT_FONT_FAMILY};
use super::{DEFAULT_NAME, DT_COLUMN, VERSION};
use clap::{value_t, App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// What the plotting app was asked to do
#[derive(Debug, Clone)]
pub struct PlotArgs {
    pub input: PathBuf,
    pub name: String,
    pub column: String,
    pub show: bool,
    pub style: PlotStyle,
}

fn app() -> App<'static, 'static> {
    let arg_input = Arg::with_name("input")
        .help("whitespace delimited dump with a header line")
        .required(true)
        .index(1);
    let arg_name = Arg::with_name("name")
        .help("name of the output svg file, without extension")
        .short("o")
        .long("name")
        .takes_value(true)
        .default_value(DEFAULT_NAME);
    let arg_column = Arg::with_name("column")
        .help("column with the time error in ns")
        .long("column")
        .takes_value(true)
        .default_value(DT_COLUMN);
    let arg_window = Arg::with_name("window")
        .help("number of samples to plot, from the first row")
        .short("n")
        .long("window")
        .takes_value(true)
        .default_value("1250");
    let arg_width = Arg::with_name("width")
        .help("figure width, inches")
        .long("width")
        .takes_value(true)
        .default_value("5.2");
    let arg_height = Arg::with_name("height")
        .help("figure height, inches")
        .long("height")
        .takes_value(true)
        .default_value("3");
    let arg_dpi = Arg::with_name("dpi")
        .help("pixels per inch of the svg canvas")
        .long("dpi")
        .takes_value(true)
        .default_value("100");
    let arg_font = Arg::with_name("font")
        .help("font family for labels and ticks")
        .long("font")
        .takes_value(true)
        .default_value(DEFAULT_FONT_FAMILY);
    let arg_show = Arg::with_name("show")
        .help("open the saved svg with the system viewer")
        .long("show")
        .takes_value(false);
    App::new("ptp_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the time error of a PTP servo dump")
        .arg(arg_input)
        .arg(arg_name)
        .arg(arg_column)
        .arg(arg_window)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_dpi)
        .arg(arg_font)
        .arg(arg_show)
}

/// Takes the CLI arguments that control the plotting of the time error.
/// Exits with the clap message on invalid arguments, `--help` and `--version`.
pub fn parse_cli() -> PlotArgs {
    parse_cli_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_cli_from<I, T>(args: I) -> Result<PlotArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = app().get_matches_from_safe(args)?;
    let style = PlotStyle {
        window_size: value_t!(cli_args, "window", usize)?,
        figure_width: value_t!(cli_args, "width", f64)?,
        figure_height: value_t!(cli_args, "height", f64)?,
        dpi: value_t!(cli_args, "dpi", f64)?,
        font_family: String::from(cli_args.value_of("font").unwrap_or(DEFAULT_FONT_FAMILY)),
        ..PlotStyle::default()
    };
    Ok(PlotArgs {
        input: PathBuf::from(cli_args.value_of_os("input").unwrap_or_default()),
        name: String::from(cli_args.value_of("name").unwrap_or(DEFAULT_NAME)),
        column: String::from(cli_args.value_of("column").unwrap_or(DT_COLUMN)),
        show: cli_args.is_present("show"),
        style,
    })
}
