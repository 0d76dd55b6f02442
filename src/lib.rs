use log::debug;
use plotters::prelude::*;
use std::path::Path;
pub mod error;
pub mod plot;
pub mod runner;
pub mod style;
pub mod table;

pub use error::PlotError;
pub use style::PlotStyle;
pub use table::DumpTable;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// column of the servo dump holding the time error, in ns
pub const DT_COLUMN: &str = "dt_ns";
pub const DEFAULT_NAME: &str = "ptp_plot";

pub const X_DESC: &str = "Cycle";
pub const Y_DESC: &str = "Time error [ns]";

/// The window of time error samples, one per servo cycle
#[derive(Debug, Clone, PartialEq)]
pub struct TimeError {
    pub cycle: Vec<usize>,
    pub dt_ns: Vec<f64>,
}

impl TimeError {
    pub fn new(capacity: usize) -> TimeError {
        TimeError {
            cycle: Vec::with_capacity(capacity),
            dt_ns: Vec::with_capacity(capacity),
        }
    }

    /// Takes the first `n` values of `column`, numbering them from cycle 0.
    /// Only the values inside the window are parsed,
    /// `nan` and `inf` are accepted and show up as a gap in the plot.
    pub fn from_table(table: &DumpTable, column: &str, n: usize) -> Result<TimeError, PlotError> {
        let cells = table.column(column)?;
        if cells.len() < n {
            return Err(PlotError::ShortColumn {
                column: column.to_string(),
                needed: n,
                available: cells.len(),
            });
        }
        let mut timeerror = TimeError::new(n);
        for (i, c) in cells[..n].iter().enumerate() {
            let v: f64 = c.parse().map_err(|_| PlotError::Parse {
                column: column.to_string(),
                row: i + 1,
                value: c.to_string(),
            })?;
            timeerror.cycle.push(i);
            timeerror.dt_ns.push(v);
        }
        Ok(timeerror)
    }

    /// Reads the whole dump and slices the window out of it
    pub fn from_dump(fin: &Path, column: &str, n: usize) -> Result<TimeError, PlotError> {
        let table = DumpTable::from_path(fin)?;
        TimeError::from_table(&table, column, n)
    }

    pub fn len(&self) -> usize {
        self.dt_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dt_ns.is_empty()
    }

    /// y range over the finite values, with 5% margin on both sides.
    /// The margin is dropped when it would push the span past f64::MAX.
    pub fn y_range(&self) -> (f64, f64) {
        let finite: Vec<f64> = self
            .dt_ns
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        match min_and_max(&finite[..]) {
            Some((ymin, ymax)) if ymax > ymin => {
                let margin = ymax / 20. - ymin / 20.;
                let (lo, hi) = (ymin - margin, ymax + margin);
                if (hi - lo).is_finite() {
                    (lo, hi)
                } else {
                    (ymin, ymax)
                }
            }
            Some((y, _)) => (y - 1., y + 1.),
            None => (-1., 1.),
        }
    }
}

/// In-memory plot of a time error window, rendered once to svg
#[derive(Debug, Clone)]
pub struct Figure {
    pub index: usize,
    pub size: (u32, u32),
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_desc: String,
    pub y_desc: String,
    /// (cycle, time error); non-finite values split the line
    pub points: Vec<(f64, f64)>,
    pub style: PlotStyle,
}

impl Figure {
    pub fn new(index: usize, data: &TimeError, style: &PlotStyle) -> Figure {
        let xmax = data.len().saturating_sub(1).max(1) as f64;
        let points = data
            .cycle
            .iter()
            .zip(data.dt_ns.iter())
            .map(|(&x, &y)| (x as f64, y))
            .collect();
        Figure {
            index,
            size: style.size_px(),
            x_range: (0., xmax),
            y_range: data.y_range(),
            x_desc: X_DESC.to_string(),
            y_desc: Y_DESC.to_string(),
            points,
            style: style.clone(),
        }
    }

    /// runs of finite points, each drawn as its own line
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.points
            .split(|(_, y)| !y.is_finite())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    /// plots the time error series to svg
    pub fn save_svg(&self, fout: &Path) -> Result<(), PlotError> {
        let (ymin, ymax) = self.y_range;
        if !(ymax - ymin).is_finite() {
            return Err(PlotError::Render(format!(
                "y range [{:e}, {:e}] is too wide to plot",
                ymin, ymax
            )));
        }
        let style = &self.style;
        let font = (style.font_family.as_str(), style.font_px());
        let root = SVGBackend::new(fout, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(8)
            .x_label_area_size((style.font_px() * 3.).ceil() as i32)
            .y_label_area_size((style.font_px() * 5.).ceil() as i32)
            .build_cartesian_2d(
                self.x_range.0..self.x_range.1,
                self.y_range.0..self.y_range.1,
            )?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(
                style
                    .grid_color
                    .mix(style.grid_alpha)
                    .stroke_width(style.grid_px()),
            )
            .label_style(font)
            .axis_desc_style(font)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .draw()?;

        let line = style.line_color.stroke_width(style.line_px());
        for chunk in self.segments() {
            chart.draw_series(LineSeries::new(chunk.iter().copied(), line))?;
        }
        root.present()?;
        debug!("figure {} written to {}", self.index, fout.display());
        Ok(())
    }
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[&str]) -> DumpTable {
        let mut text = String::from("cycle dt_ns offset_ns\n");
        for (i, v) in values.iter().enumerate() {
            text.push_str(&format!("{} {} 0\n", i, v));
        }
        DumpTable::parse(text.as_bytes(), Path::new("dump.txt")).unwrap()
    }

    #[test]
    fn takes_the_head_of_the_column() {
        let t = table(&["1.5", "-2", "3", "4"]);
        let te = TimeError::from_table(&t, DT_COLUMN, 3).unwrap();
        assert_eq!(te.cycle, vec![0, 1, 2]);
        assert_eq!(te.dt_ns, vec![1.5, -2., 3.]);
    }

    #[test]
    fn short_column_is_an_error() {
        let t = table(&["1", "2"]);
        match TimeError::from_table(&t, DT_COLUMN, 3) {
            Err(PlotError::ShortColumn {
                needed, available, ..
            }) => assert_eq!((needed, available), (3, 2)),
            other => panic!("expected short column, got {:?}", other),
        }
    }

    #[test]
    fn bad_number_inside_the_window() {
        let t = table(&["1", "x", "3"]);
        match TimeError::from_table(&t, DT_COLUMN, 3) {
            Err(PlotError::Parse { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "x");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn values_after_the_window_are_not_parsed() {
        let t = table(&["1", "2", "garbage"]);
        let te = TimeError::from_table(&t, DT_COLUMN, 2).unwrap();
        assert_eq!(te.len(), 2);
    }

    #[test]
    fn y_range_has_margin() {
        let t = table(&["0", "10", "nan"]);
        let te = TimeError::from_table(&t, DT_COLUMN, 3).unwrap();
        let (lo, hi) = te.y_range();
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn flat_and_empty_ranges() {
        let flat = TimeError {
            cycle: vec![0, 1],
            dt_ns: vec![4., 4.],
        };
        assert_eq!(flat.y_range(), (3., 5.));
        let allnan = TimeError {
            cycle: vec![0, 1],
            dt_ns: vec![f64::NAN, f64::NAN],
        };
        assert_eq!(allnan.y_range(), (-1., 1.));
    }

    #[test]
    fn identity_series() {
        let values: Vec<String> = (0..1250).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let t = table(&refs);
        let te = TimeError::from_table(&t, DT_COLUMN, 1250).unwrap();
        let fig = Figure::new(1, &te, &PlotStyle::default());
        assert_eq!(fig.x_range, (0., 1249.));
        assert_eq!(fig.points.len(), 1250);
        assert!(fig.points.iter().all(|(x, y)| x == y));
        assert_eq!(fig.x_desc, "Cycle");
        assert_eq!(fig.y_desc, "Time error [ns]");
    }

    #[test]
    fn x_range_ignores_values() {
        let te = TimeError {
            cycle: vec![0, 1, 2, 3],
            dt_ns: vec![1e9, -1e9, 5., 0.],
        };
        let fig = Figure::new(7, &te, &PlotStyle::default());
        assert_eq!(fig.index, 7);
        assert_eq!(fig.x_range, (0., 3.));
        assert_eq!(fig.size, (520, 300));
    }

    #[test]
    fn saves_svg_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let fout = dir.path().join("fig.svg");
        let te = TimeError {
            cycle: (0..50).collect(),
            dt_ns: (0..50).map(|i| if i == 20 { f64::NAN } else { i as f64 }).collect(),
        };
        Figure::new(1, &te, &PlotStyle::default())
            .save_svg(&fout)
            .unwrap();
        let svg = std::fs::read_to_string(&fout).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Cycle"));
        assert!(svg.contains("Time error [ns]"));
        assert!(svg.contains("Arial"));
        assert!(svg.matches("<polyline").count() >= 2);
    }

    #[test]
    fn huge_span_keeps_finite_bounds() {
        let te = TimeError {
            cycle: vec![0, 1, 2],
            dt_ns: vec![-1e308, 0., 1e308],
        };
        assert_eq!(te.y_range(), (-1e308, 1e308));
        let wide = TimeError {
            cycle: vec![0, 1],
            dt_ns: vec![-8e307, 8e307],
        };
        let (lo, hi) = wide.y_range();
        assert!((hi - lo).is_finite());
        assert!(lo < -8e307 && hi > 8e307);
    }

    #[test]
    fn unplottable_span_is_an_error_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let fout = dir.path().join("fig.svg");
        let te = TimeError {
            cycle: vec![0, 1, 2],
            dt_ns: vec![-1e308, 0., 1e308],
        };
        let err = Figure::new(1, &te, &PlotStyle::default())
            .save_svg(&fout)
            .unwrap_err();
        assert!(matches!(err, PlotError::Render(_)));
        assert!(!fout.exists());
    }

    #[test]
    fn infinite_values_leave_a_gap() {
        let t = table(&["0", "inf", "1", "2", "-inf", "nan", "3"]);
        let te = TimeError::from_table(&t, DT_COLUMN, 7).unwrap();
        let fig = Figure::new(1, &te, &PlotStyle::default());
        let segments = fig.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], &[(0., 0.)][..]);
        assert_eq!(segments[1], &[(2., 1.), (3., 2.)][..]);
        assert_eq!(segments[2], &[(6., 3.)][..]);
        assert!(segments.iter().flat_map(|c| c.iter()).all(|(_, y)| y.is_finite()));
        assert!((fig.y_range.0 + 0.15).abs() < 1e-12);
        assert!((fig.y_range.1 - 3.15).abs() < 1e-12);
    }

    #[test]
    fn min_and_max_of_slice() {
        assert_eq!(min_and_max(&[3, -1, 7, 2]), Some((-1, 7)));
        assert_eq!(min_and_max::<f64>(&[]), None);
    }
}
