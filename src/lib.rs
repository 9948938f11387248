//! Brush stroke fields driven by Perlin noise.
//!
//! A square canvas is cut into `tiles × tiles` cells. Every cell gets two brush strokes, a
//! bottom and a top layer. Three noise-derived maps decide their look:
//! - an *area* map, thresholded into categories 0..=3 that pick color and brush;
//! - an *angle* map, remapped into stroke headings (default 90° .. -90°);
//! - a *length* map, remapped into stroke lengths in tile widths.
//!
//! The top layer samples the same noise at scaled-up frequencies. Jobs are revealed over
//! roughly 80 frames by [`scheduler::Scheduler`], so even a 200×200 grid starts painting
//! immediately.
//!
//! # Basic usage
//! ```
//! # use {
//! #   brushfield::{
//! #     brush::Recorder,
//! #     config::RendererConfig,
//! #     renderer::Renderer,
//! #   },
//! #   serde_json::json,
//! # };
//! let config = RendererConfig::default();
//! // any `BrushBackend`; `drawing::Canvas` paints pixels
//! let backend = Recorder::new(400);
//! let mut renderer = Renderer::new(config, backend);
//!
//! // merge parameters, reseed and start a new reveal
//! let bag = json!({ "tiles": 120, "brushWeight": 3.0 });
//! renderer.regenerate(bag.as_object().unwrap());
//! // one call per frame
//! while renderer.tick() {}
//! assert_eq!(renderer.backend().visible_strokes().len(), 2 * 120 * 120);
//! ```
//!
//! # Backends
//! Renderers only talk to [`brush::BrushBackend`]: named brushes, named flow fields, a stroke
//! color and `draw_flow_line`. [`brush::Recorder`] logs the calls and is what the tests use;
//! [`drawing::Canvas`] rasterizes into an `image::RgbaImage` (requires `drawing` feature).
//!
//! # Explorer
//! [`doe::Session`] runs a few rounds of "pick the best of eight". Candidates are sampled
//! around the previous pick with a shrinking spread, rendered as thumbnails in parallel, and
//! the final pick is handed to the renderer through a [`handoff::KeyValueStore`].

pub mod error;
pub mod geometry;
pub mod noise_field;
pub mod field;
pub mod params;
pub mod brush;
pub mod planner;
pub mod scheduler;
pub mod config;
pub mod handoff;
pub mod renderer;
pub mod doe;
#[cfg(feature = "drawing")]
pub mod drawing;
