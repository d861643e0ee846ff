//! Build a docked application shell, run a few frames and print the layout.

use std::{fs, io, path::PathBuf};

use anyhow::Context as _;
use bramble::{
    Canvas, CanvasConfig, Core, FrameReport, NodeId, Widget,
    dump::layout_table,
    error::{Error, Result},
    geom::{INFINITE, Insets, Size},
    layout::{Context, Dock},
    render::{RenderView, Renderer},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lay out a sample widget tree and print the result.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON canvas config. Flags below override it.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Root width.
    #[clap(long)]
    width: Option<i32>,

    /// Root height.
    #[clap(long)]
    height: Option<i32>,

    /// Number of rows in the list.
    #[clap(short, long, default_value_t = 5)]
    rows: usize,

    /// Print the paint log as well as the layout table.
    #[clap(short, long)]
    paint: bool,
}

/// A fixed-height line of text.
struct Label {
    /// Text shown.
    text: String,
}

impl Widget for Label {
    fn measure(&mut self, _ctx: &mut Context<'_>, _available: Size) -> Result<Size> {
        Ok(Size::new(text_width(self.text.len()), 18))
    }
}

/// Width of `len` fixed-pitch glyphs. Very long text saturates just below the
/// unbounded sentinel, so measure still reports a finite size.
fn text_width(len: usize) -> i32 {
    i32::try_from(len)
        .unwrap_or(i32::MAX)
        .saturating_mul(8)
        .min(INFINITE - 1)
}

/// A container with no behavior of its own.
struct Pane;

impl Widget for Pane {}

/// Prints one line per painted node.
struct LineRenderer<W: io::Write> {
    /// Output sink.
    out: W,
}

impl<W: io::Write> Renderer for LineRenderer<W> {
    fn draw(&mut self, view: &RenderView) -> Result<()> {
        let r = view.screen;
        let name = view.name.as_deref().unwrap_or("-");
        writeln!(
            self.out,
            "{:<8} {:<10} ({},{}) {}x{}",
            view.kind.as_str(),
            name,
            r.x,
            r.y,
            r.w,
            r.h
        )
        .map_err(|e| Error::InvalidOperation(e.to_string()))
    }
}

/// Add a named pane.
fn pane(core: &mut Core, parent: NodeId, name: &str, dock: Dock) -> Result<NodeId> {
    let id = core.add_child(parent, Pane)?;
    core.set_name(id, Some(name))?;
    core.set_dock(id, dock)?;
    Ok(id)
}

/// Build the application shell and return the list rows.
fn build(core: &mut Core, rows: usize) -> Result<Vec<NodeId>> {
    let root = core.root_id();
    let toolbar = pane(core, root, "toolbar", Dock::Top)?;
    core.set_height(toolbar, 32)?;
    let status = pane(core, root, "status", Dock::Bottom)?;
    core.set_height(status, 20)?;
    let sidebar = pane(core, root, "sidebar", Dock::Left)?;
    core.set_width(sidebar, 160)?;
    core.set_padding(sidebar, Insets::all(4))?;
    let body = pane(core, root, "body", Dock::Fill)?;
    core.set_padding(body, Insets::all(8))?;

    let mut ids = Vec::with_capacity(rows);
    for i in 0..rows {
        let row = core.add_child(
            body,
            Label {
                text: format!("row {i}"),
            },
        )?;
        core.set_name(row, Some(&format!("row{i}")))?;
        core.set_dock(row, Dock::Top)?;
        core.set_margin(row, Insets::new(0, 0, 0, 2))?;
        core.set_virtual(row, true)?;
        ids.push(row);
    }

    let popup = pane(core, body, "popup", Dock::None)?;
    core.set_size(popup, Size::new(120, 60))?;
    core.set_position(popup, 200, 40)?;
    core.set_draw_background(popup, true)?;
    Ok(ids)
}

/// Log and print a frame report.
fn report(label: &str, r: FrameReport) {
    info!(?r, label, "frame");
    println!(
        "{label}: full_layout={} deferred={} disposed={}",
        r.full_layout, r.deferred_laid_out, r.disposed
    );
}

/// Load the config file if given, then apply flag overrides.
fn load_config(args: &Args) -> anyhow::Result<CanvasConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CanvasConfig::from_json(&text)?
        }
        None => CanvasConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut canvas = Canvas::new(load_config(&args)?);
    let rows = build(canvas.core_mut(), args.rows)?;

    report("initial", canvas.frame()?);
    println!("{}", layout_table(canvas.core(), canvas.root())?);

    // Growing a virtual row only re-lays out that row.
    if let Some(first) = rows.first() {
        canvas.core_mut().set_height(*first, 40)?;
        report("row resized", canvas.frame()?);
    }

    // Removing a row dirties the list, so the next frame is a full pass.
    if let Some(last) = rows.last() {
        canvas.core_mut().delayed_delete(*last)?;
        report("row removed", canvas.frame()?);
    }
    println!("{}", layout_table(canvas.core(), canvas.root())?);

    if args.paint {
        let mut renderer = LineRenderer { out: io::stdout() };
        canvas.render(&mut renderer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bramble::geom::Rect;

    use super::*;

    #[test]
    fn label_width_saturates() {
        assert_eq!(text_width(5), 40);
        assert_eq!(text_width(300_000_000), INFINITE - 1);
        assert_eq!(text_width(usize::MAX), INFINITE - 1);
    }

    #[test]
    fn shell_layout() -> Result<()> {
        let mut canvas = Canvas::new(CanvasConfig {
            width: 640,
            height: 480,
            validate_tree: true,
        });
        let rows = build(canvas.core_mut(), 3)?;
        assert!(canvas.frame()?.full_layout);

        let core = canvas.core();
        assert_eq!(core.screen_bounds(rows[0]), Some(Rect::new(168, 40, 464, 18)));
        assert_eq!(core.screen_bounds(rows[1]), Some(Rect::new(168, 60, 464, 18)));

        canvas.core_mut().set_height(rows[0], 40)?;
        let report = canvas.frame()?;
        assert!(!report.full_layout);
        assert_eq!(report.deferred_laid_out, 1);
        Ok(())
    }
}
