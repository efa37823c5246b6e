//! On-screen animation in an SDL2 window.
//!
//! SDL does not keep the back buffer between presents, so the renderer remembers every shape
//! drawn so far and replays them all on each frame.

use log::warn;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use std::thread;
use std::time::Duration;

use crate::cells::Cell;
use crate::renderers::{canvas_size, cell_outline_rect, visit_marker_rect, wall_removal_rect,
                       PixelRect, Renderer, VisitRole, BACKGROUND_COLOUR, GRID_LINE_COLOUR,
                       PASSAGE_COLOUR, SOLUTION_COLOUR};
use crate::units::{CellSidePixels, ColumnsCount, Height, RowsCount, Width};

const WINDOW_SIDE: u32 = 600;
const IDLE_FPS: u64 = 30;

#[derive(Debug, Copy, Clone)]
enum Shape {
    Outline(PixelRect, [u8; 3]),
    Filled(PixelRect, [u8; 3]),
}

pub struct SdlRenderer {
    _sdl_context: sdl2::Sdl,
    canvas: Canvas<Window>,
    events: EventPump,
    cell_size: CellSidePixels,
    shapes: Vec<Shape>,
    quit_requested: bool,
}

fn sdl_rect(rect: PixelRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

fn sdl_colour(colour: [u8; 3]) -> Color {
    Color::RGB(colour[0], colour[1], colour[2])
}

impl SdlRenderer {
    pub fn new(title: &str) -> Result<SdlRenderer, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let window = video_subsystem.window(title, WINDOW_SIDE, WINDOW_SIDE)
                                    .position_centered()
                                    .build()
                                    .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas()
                           .present_vsync()
                           .accelerated()
                           .build()
                           .map_err(|e| e.to_string())?;
        let events = sdl_context.event_pump()?;

        Ok(SdlRenderer {
            _sdl_context: sdl_context,
            canvas,
            events,
            cell_size: CellSidePixels(1),
            shapes: Vec::new(),
            quit_requested: false,
        })
    }

    /// Keep showing the finished maze until the window is closed or `q` is pressed.
    pub fn run_until_closed(&mut self) {
        while !self.quit_requested {
            self.present();
            thread::sleep(Duration::from_millis(1000 / IDLE_FPS));
        }
    }

    fn poll_events(&mut self) {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Q), .. } => self.quit_requested = true,
                _ => continue,
            }
        }
    }

    fn draw(&mut self) -> Result<(), String> {
        self.canvas.set_draw_color(sdl_colour(BACKGROUND_COLOUR));
        self.canvas.clear();
        for shape in &self.shapes {
            match *shape {
                Shape::Outline(rect, colour) => {
                    self.canvas.set_draw_color(sdl_colour(colour));
                    self.canvas.draw_rect(sdl_rect(rect))?;
                }
                Shape::Filled(rect, colour) => {
                    self.canvas.set_draw_color(sdl_colour(colour));
                    self.canvas.fill_rect(sdl_rect(rect))?;
                }
            }
        }
        self.canvas.present();
        Ok(())
    }
}

impl Renderer for SdlRenderer {
    fn render_grid(&mut self, columns: ColumnsCount, rows: RowsCount, cell_size: CellSidePixels) {
        self.cell_size = cell_size;
        self.shapes.clear();
        let (Width(w), Height(h)) = match canvas_size(columns, rows, cell_size) {
            Some(size) => size,
            None => {
                warn!("Cannot draw {}x{} cells of {}px on screen", columns.0, rows.0, cell_size.0);
                return;
            }
        };
        if let Err(e) = self.canvas.window_mut().set_size(w, h) {
            warn!("Could not resize window to {}x{}: {}", w, h, e);
        }
        for y in 0..rows.0 {
            for x in 0..columns.0 {
                let rect = cell_outline_rect(Cell::new(x as u32, y as u32), cell_size);
                self.shapes.push(Shape::Outline(rect, GRID_LINE_COLOUR));
            }
        }
    }

    fn render_wall_removed(&mut self, a: Cell, b: Cell) {
        if let Some(rect) = wall_removal_rect(a, b, self.cell_size) {
            self.shapes.push(Shape::Filled(rect, PASSAGE_COLOUR));
        }
    }

    fn render_visit(&mut self, cell: Cell, _: VisitRole) {
        let rect = visit_marker_rect(cell, self.cell_size);
        self.shapes.push(Shape::Filled(rect, SOLUTION_COLOUR));
    }

    fn present(&mut self) {
        self.poll_events();
        if let Err(e) = self.draw() {
            warn!("Drawing the maze failed: {}", e);
        }
    }

    fn should_stop(&self) -> bool {
        self.quit_requested
    }
}
