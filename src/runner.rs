use crate::error::PlotError;
use crate::style::PlotStyle;
use crate::{Figure, TimeError};
use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Hands out figure indices, starting from 1
#[derive(Debug, Clone)]
pub struct FigureCounter {
    next: usize,
}

impl FigureCounter {
    pub fn new() -> FigureCounter {
        FigureCounter { next: 1 }
    }

    pub fn next_index(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }
}

impl Default for FigureCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads the time error window and turns it into svg figures,
/// owning the style and the figure counter.
#[derive(Debug, Clone)]
pub struct PlotRunner {
    pub style: PlotStyle,
    counter: FigureCounter,
}

impl PlotRunner {
    pub fn new(style: PlotStyle) -> Result<PlotRunner, PlotError> {
        style.validate()?;
        Ok(PlotRunner {
            style,
            counter: FigureCounter::new(),
        })
    }

    pub fn load(&self, fin: &Path, column: &str) -> Result<TimeError, PlotError> {
        let data = TimeError::from_dump(fin, column, self.style.window_size)?;
        info!(
            "loaded {} samples of {} from {}",
            data.len(),
            column,
            fin.display()
        );
        Ok(data)
    }

    pub fn figure(&mut self, data: &TimeError) -> Figure {
        Figure::new(self.counter.next_index(), data, &self.style)
    }

    /// Builds the next figure and saves it as `<name>.svg`
    pub fn plot_data(
        &mut self,
        data: &TimeError,
        name: &str,
    ) -> Result<(Figure, PathBuf), PlotError> {
        let figure = self.figure(data);
        let svgout = PathBuf::from(format!("{}.svg", name));
        figure.save_svg(&svgout)?;
        info!(
            "saved figure {} ({}x{} px, y in [{:.3}, {:.3}] ns) to {}",
            figure.index,
            figure.size.0,
            figure.size.1,
            figure.y_range.0,
            figure.y_range.1,
            svgout.display()
        );
        Ok((figure, svgout))
    }
}

#[cfg(target_os = "macos")]
fn viewer(fout: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(fout);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer(fout: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(&["/C", "start", ""]).arg(fout);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer(fout: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(fout);
    cmd
}

/// Opens a saved figure with the system viewer and waits for the launcher
pub fn show(fout: &Path) -> Result<(), PlotError> {
    let status = viewer(fout).status().map_err(|e| PlotError::Show {
        path: fout.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !status.success() {
        return Err(PlotError::Show {
            path: fout.to_path_buf(),
            reason: format!("viewer exited with {}", status),
        });
    }
    info!("opened {}", fout.display());
    Ok(())
}
