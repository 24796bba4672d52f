//! Decorative parallax constellation.
//!
//! A fixed set of nodes drifts with the pointer, deeper nodes moving further.
//! Each animation step eases the offset toward the pointer target and
//! produces a [`Frame`] of dots and links; [`rasterize`] paints a frame into
//! an RGBA buffer for hosts without a 2D canvas.

use ndarray::Array3;
use serde::Serialize;

use crate::config::ParallaxConfig;
use crate::filters::core::{blend_over_f32, to_u8};

const DOT_COLOR: [u8; 3] = [148, 163, 184];
const LINK_COLOR: [u8; 3] = [51, 65, 85];
const LINK_MAX_ALPHA: f32 = 0.14;
const LINK_WIDTH: f32 = 0.5;

// ============================================================================
// Deterministic RNG
// ============================================================================

/// MINSTD linear congruential generator; reproducible node layouts.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Uniform f32 in [0, 1).
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32 / 2147483647.0f32).min(0.999_999)
    }
}

// ============================================================================
// Field
// ============================================================================

/// One decorative point; `x`/`y` are viewport fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    /// 0.2-1.0, scales parallax travel, size and opacity.
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub alpha: f32,
}

/// What to draw for one animation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub dots: Vec<Dot>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone)]
pub struct ParallaxField {
    nodes: Vec<Node>,
    link_distance: f32,
    easing: f32,
    offset: (f32, f32),
    target: (f32, f32),
}

impl ParallaxField {
    pub fn new(config: &ParallaxConfig) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let nodes = (0..config.node_count)
            .map(|_| {
                let x = rng.next_f32();
                let y = rng.next_f32();
                let depth = 0.2 + rng.next_f32() * 0.8;
                Node { x, y, depth }
            })
            .collect();
        Self {
            nodes,
            link_distance: config.link_distance,
            easing: config.easing,
            offset: (0.0, 0.0),
            target: (0.0, 0.0),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn target(&self) -> (f32, f32) {
        self.target
    }

    /// Point the drift target at a pointer position within the viewport.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_width: f32, viewport_height: f32) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        let fx = x / viewport_width;
        let fy = y / viewport_height;
        self.target = ((fx - 0.5) * 40.0, (fy - 0.3) * 30.0);
    }

    /// Advance one animation step and describe what to draw.
    ///
    /// With `reduced_motion` the offset is left alone and the frame is empty.
    pub fn step(&mut self, width: f32, height: f32, reduced_motion: bool) -> Frame {
        if reduced_motion {
            return Frame {
                width,
                height,
                ..Frame::default()
            };
        }
        self.offset.0 += (self.target.0 - self.offset.0) * self.easing;
        self.offset.1 += (self.target.1 - self.offset.1) * self.easing;
        self.frame(width, height)
    }

    /// Frame for the current offset without advancing.
    pub fn frame(&self, width: f32, height: f32) -> Frame {
        let (ox, oy) = self.offset;
        let positions: Vec<(f32, f32)> = self
            .nodes
            .iter()
            .map(|n| (n.x * width + ox * n.depth, n.y * height + oy * n.depth))
            .collect();

        let dots = self
            .nodes
            .iter()
            .zip(&positions)
            .map(|(n, &(x, y))| Dot {
                x,
                y,
                radius: 1.0 + n.depth * 2.7,
                opacity: 0.12 + n.depth * 0.18,
            })
            .collect();

        let mut links = Vec::new();
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                let dist = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
                if dist < self.link_distance {
                    links.push(Link {
                        from: a,
                        to: b,
                        alpha: (1.0 - dist / self.link_distance) * LINK_MAX_ALPHA,
                    });
                }
            }
        }

        Frame {
            width,
            height,
            dots,
            links,
        }
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Paint a frame onto a transparent RGBA canvas of the given size.
///
/// Links are drawn as hairlines (coverage scaled by the line width), dots as
/// filled circles with a one-pixel soft edge.
pub fn rasterize(frame: &Frame, width: usize, height: usize) -> Array3<u8> {
    let mut canvas = vec![[0.0f32; 4]; width * height];

    let mut plot = |x: isize, y: isize, color: [u8; 3], alpha: f32| {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            return;
        }
        let px = &mut canvas[y as usize * width + x as usize];
        blend_over_f32(
            px,
            color[0] as f32 / 255.0,
            color[1] as f32 / 255.0,
            color[2] as f32 / 255.0,
            alpha,
        );
    };

    for link in &frame.links {
        let (dx, dy) = (link.to.0 - link.from.0, link.to.1 - link.from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = (link.from.0 + dx * t).floor() as isize;
            let y = (link.from.1 + dy * t).floor() as isize;
            plot(x, y, LINK_COLOR, link.alpha * LINK_WIDTH);
        }
    }

    for dot in &frame.dots {
        let reach = dot.radius.ceil() as isize + 1;
        let (cx, cy) = (dot.x.floor() as isize, dot.y.floor() as isize);
        for y in cy - reach..=cy + reach {
            for x in cx - reach..=cx + reach {
                let dist = ((x as f32 + 0.5 - dot.x).powi(2) + (y as f32 + 0.5 - dot.y).powi(2)).sqrt();
                let coverage = (dot.radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    plot(x, y, DOT_COLOR, dot.opacity * coverage);
                }
            }
        }
    }

    let mut output = Array3::<u8>::zeros((height, width, 4));
    for y in 0..height {
        for x in 0..width {
            let px = canvas[y * width + x];
            for c in 0..4 {
                output[[y, x, c]] = to_u8(px[c]);
            }
        }
    }
    output
}
