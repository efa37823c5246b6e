//! The boundary between the maze algorithms and whatever shows them.
//!
//! The generator and solver push fire-and-forget notifications through a `Renderer` and pause
//! through a `Pacing` strategy between animation steps. Neither ever feeds back into the
//! algorithms, so a maze run headless with `NullRenderer` and `NoPacing` carves and solves
//! exactly the same as one animated on screen.

use image::{ImageResult, Rgb, RgbImage};
use log::{trace, warn};
use std::convert::TryFrom;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::cells::Cell;
use crate::units::{CellSidePixels, ColumnsCount, Height, RowsCount, Width};

pub const BACKGROUND_COLOUR: [u8; 3] = [0, 0, 0];
pub const GRID_LINE_COLOUR: [u8; 3] = [0xff, 0xff, 0xff];
pub const PASSAGE_COLOUR: [u8; 3] = [0, 102, 102];
pub const SOLUTION_COLOUR: [u8; 3] = [240, 0, 0];

/// How a cell on the solution trail should be marked.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum VisitRole {
    Ordinary,
    Entry,
    Exit,
}

pub trait Renderer {
    /// Draw the initial, fully walled, grid.
    fn render_grid(&mut self, columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels);

    /// Erase the wall segment between two adjacent cells.
    fn render_wall_removed(&mut self, a: Cell, b: Cell);

    /// Mark a cell as part of the solution trail.
    fn render_visit(&mut self, cell: Cell, role: VisitRole);

    /// Flush the current frame for display.
    fn present(&mut self);

    /// Has whoever is watching asked to quit? Polled by the driver between phases.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Delay between animation steps.
pub trait Pacing {
    fn pause(&mut self);
}

#[derive(Debug, Copy, Clone, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn pause(&mut self) {}
}

#[derive(Debug, Copy, Clone)]
pub struct FixedDelay(pub Duration);

impl Pacing for FixedDelay {
    fn pause(&mut self) {
        thread::sleep(self.0);
    }
}

/// The renderer and pacing strategy a maze walk reports its progress to.
pub struct Animation<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub pacing: &'a mut dyn Pacing,
}

impl<'a> Animation<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, pacing: &'a mut dyn Pacing) -> Animation<'a> {
        Animation { renderer, pacing }
    }

    /// End one animation step: show it, then wait unless nobody is watching any more.
    pub fn frame(&mut self) {
        self.renderer.present();
        if !self.renderer.should_stop() {
            self.pacing.pause();
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_grid(&mut self, _: ColumnsCount, _: RowsCount, _: CellSidePixels) {}
    fn render_wall_removed(&mut self, _: Cell, _: Cell) {}
    fn render_visit(&mut self, _: Cell, _: VisitRole) {}
    fn present(&mut self) {}
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum RenderEvent {
    Grid(ColumnsCount, RowsCount, CellSidePixels),
    WallRemoved(Cell, Cell),
    Visit(Cell, VisitRole),
    Present,
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<RenderEvent>,
}

impl EventRecorder {
    pub fn new() -> EventRecorder {
        EventRecorder::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn removed_walls(&self) -> Vec<(Cell, Cell)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                RenderEvent::WallRemoved(a, b) => Some((a, b)),
                _ => None,
            })
            .collect()
    }

    pub fn visits(&self) -> Vec<(Cell, VisitRole)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                RenderEvent::Visit(cell, role) => Some((cell, role)),
                _ => None,
            })
            .collect()
    }

    pub fn presents_count(&self) -> usize {
        self.events.iter().filter(|event| **event == RenderEvent::Present).count()
    }
}

impl Renderer for EventRecorder {
    fn render_grid(&mut self, columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels) {
        self.events.push(RenderEvent::Grid(columns, rows, cell_size));
    }
    fn render_wall_removed(&mut self, a: Cell, b: Cell) {
        self.events.push(RenderEvent::WallRemoved(a, b));
    }
    fn render_visit(&mut self, cell: Cell, role: VisitRole) {
        self.events.push(RenderEvent::Visit(cell, role));
    }
    fn present(&mut self) {
        self.events.push(RenderEvent::Present);
    }
}

/// Traces each notification before handing it on.
#[derive(Debug)]
pub struct LoggingRenderer<R: Renderer> {
    inner: R,
}

impl<R: Renderer> LoggingRenderer<R> {
    pub fn new(inner: R) -> LoggingRenderer<R> {
        LoggingRenderer { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Renderer> Renderer for LoggingRenderer<R> {
    fn render_grid(&mut self, columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels) {
        trace!("render grid {}x{} at {}px", columns.0, rows.0, cell_size.0);
        self.inner.render_grid(columns, rows, cell_size);
    }
    fn render_wall_removed(&mut self, a: Cell, b: Cell) {
        trace!("render wall removed {} - {}", a, b);
        self.inner.render_wall_removed(a, b);
    }
    fn render_visit(&mut self, cell: Cell, role: VisitRole) {
        trace!("render visit {} {:?}", cell, role);
        self.inner.render_visit(cell, role);
    }
    fn present(&mut self) {
        self.inner.present();
    }
    fn should_stop(&self) -> bool {
        self.inner.should_stop()
    }
}

/// A pixel rectangle, laid out the way sdl2's `Rect::new` takes it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> PixelRect {
        PixelRect { x, y, width, height }
    }
}

/// Widest or tallest canvas the raster renderers will draw, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Full extent of a grid of cells in pixels.
/// `None` when there is nothing to draw or either side would exceed `MAX_CANVAS_SIDE`.
pub fn canvas_size(columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels) -> Option<(Width, Height)> {
    let side = cell_size.0 as usize;
    let width = columns.0.checked_mul(side)?;
    let height = rows.0.checked_mul(side)?;
    let limit = MAX_CANVAS_SIDE as usize;
    if width == 0 || height == 0 || width > limit || height > limit {
        return None;
    }
    Some((Width(width as u32), Height(height as u32)))
}

// Offset of a cell's top or left edge plus `extra` pixels, saturating at the end of the i32 range.
fn pixel_offset(index: u32, side: u32, extra: u32) -> i32 {
    let offset = u64::from(index) * u64::from(side) + u64::from(extra);
    i32::try_from(offset).unwrap_or(i32::MAX)
}

/// The square outline drawn around a cell when the grid starts out fully walled.
pub fn cell_outline_rect(cell: Cell, cell_size: CellSidePixels) -> PixelRect {
    let side = cell_size.0;
    PixelRect::new(pixel_offset(cell.x, side, 0), pixel_offset(cell.y, side, 0), side, side)
}

/// The area painted over to erase the wall between two adjacent cells.
///
/// It covers the inside of both cells and the wall between them, leaving a small gap before the
/// far walls so separate passages stay distinguishable.
pub fn wall_removal_rect(a: Cell, b: Cell, cell_size: CellSidePixels) -> Option<PixelRect> {
    if !a.is_adjacent(b) {
        return None;
    }
    const INTERVAL: u32 = 2;
    let side = cell_size.0;
    let inner = side.saturating_sub(1);
    let span = inner.saturating_mul(2).saturating_sub(INTERVAL);

    let first = if a <= b { a } else { b };
    let x = pixel_offset(first.x, side, 1);
    let y = pixel_offset(first.y, side, 1);
    if a.y == b.y {
        Some(PixelRect::new(x, y, span, inner))
    } else {
        Some(PixelRect::new(x, y, inner, span))
    }
}

/// The dot marking a cell on the solution trail.
pub fn visit_marker_rect(cell: Cell, cell_size: CellSidePixels) -> PixelRect {
    let side = cell_size.0;
    let dot = (side / 5).max(1);
    let middle = side / 2;
    PixelRect::new(pixel_offset(cell.x, side, middle), pixel_offset(cell.y, side, middle), dot, dot)
}

/// Draws into an in-memory RGB image that can be written out as a PNG.
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    image: RgbImage,
    cell_size: CellSidePixels,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        ImageRenderer::new()
    }
}

impl ImageRenderer {
    /// An empty canvas; `render_grid` sizes it.
    pub fn new() -> ImageRenderer {
        ImageRenderer {
            image: RgbImage::new(0, 0),
            cell_size: CellSidePixels(1),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Save as a PNG (or whatever format the path's extension names).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save(path)
    }

    fn fill_rect(&mut self, rect: PixelRect, colour: [u8; 3]) {
        let (x_start, y_start) = (rect.x.max(0) as u32, rect.y.max(0) as u32);
        let x_end = (rect.x as i64 + rect.width as i64).min(self.image.width() as i64).max(0) as u32;
        let y_end = (rect.y as i64 + rect.height as i64).min(self.image.height() as i64).max(0) as u32;
        for y in y_start..y_end {
            for x in x_start..x_end {
                self.image.put_pixel(x, y, Rgb(colour));
            }
        }
    }

    fn outline_rect(&mut self, rect: PixelRect, colour: [u8; 3]) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let far_edge = |start: i32, length: u32| {
            (i64::from(start) + i64::from(length) - 1).min(i64::from(i32::MAX)) as i32
        };
        let right = far_edge(rect.x, rect.width);
        let bottom = far_edge(rect.y, rect.height);
        self.fill_rect(PixelRect::new(rect.x, rect.y, rect.width, 1), colour);
        self.fill_rect(PixelRect::new(rect.x, bottom, rect.width, 1), colour);
        self.fill_rect(PixelRect::new(rect.x, rect.y, 1, rect.height), colour);
        self.fill_rect(PixelRect::new(right, rect.y, 1, rect.height), colour);
    }
}

impl Renderer for ImageRenderer {
    fn render_grid(&mut self, columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels) {
        self.cell_size = cell_size;
        let (Width(w), Height(h)) = match canvas_size(columns, rows, cell_size) {
            Some(size) => size,
            None => {
                warn!("Cannot draw {}x{} cells of {}px, leaving the image empty",
                      columns.0, rows.0, cell_size.0);
                self.image = RgbImage::new(0, 0);
                return;
            }
        };
        self.image = RgbImage::from_pixel(w, h, Rgb(BACKGROUND_COLOUR));

        for y in 0..rows.0 {
            for x in 0..columns.0 {
                let rect = cell_outline_rect(Cell::new(x as u32, y as u32), cell_size);
                self.outline_rect(rect, GRID_LINE_COLOUR);
            }
        }
    }

    fn render_wall_removed(&mut self, a: Cell, b: Cell) {
        if let Some(rect) = wall_removal_rect(a, b, self.cell_size) {
            self.fill_rect(rect, PASSAGE_COLOUR);
        }
    }

    fn render_visit(&mut self, cell: Cell, _: VisitRole) {
        let rect = visit_marker_rect(cell, self.cell_size);
        self.fill_rect(rect, SOLUTION_COLOUR);
    }

    fn present(&mut self) {}
}
