//! Grid state: every per-cell and per-face buffer the solver touches.
//!
//! Velocity lives on a MAC layout. `vel_x` sits on the vertical faces
//! between cells and has one extra column, `vel_y` sits on the horizontal
//! faces and has one extra row. Density is cell-centered RGBA.

/// Number of density channels (RGBA).
pub const CHANNELS: usize = 4;

/// Two equally sized buffers and the index of the one currently holding
/// the field. Sweeps read the front, fill the back, then flip.
#[derive(Debug, Clone)]
pub struct PingPong {
    buffers: [Vec<f32>; 2],
    active: usize,
}

impl PingPong {
    pub fn new(len: usize) -> Self {
        Self {
            buffers: [vec![0.0; len], vec![0.0; len]],
            active: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn front(&self) -> &[f32] {
        &self.buffers[self.active]
    }

    pub fn front_mut(&mut self) -> &mut [f32] {
        &mut self.buffers[self.active]
    }

    /// Front for reading and back for writing at the same time.
    pub fn split(&mut self) -> (&[f32], &mut [f32]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.active == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    pub fn swap(&mut self) {
        self.active ^= 1;
    }

    pub fn fill(&mut self, value: f32) {
        for buffer in self.buffers.iter_mut() {
            buffer.fill(value);
        }
    }
}

/// Sample counts of a 2D lattice stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    pub cols: usize,
    pub rows: usize,
}

impl Lattice {
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    pub(crate) vel_x: PingPong,
    pub(crate) vel_y: PingPong,
    pub(crate) density: PingPong,
    pub(crate) pressure: Vec<f32>,
    pub(crate) divergence: Vec<f32>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "grid width must be > 0");
        assert!(height > 0, "grid height must be > 0");
        let cells = width * height;
        Self {
            width,
            height,
            vel_x: PingPong::new((width + 1) * height),
            vel_y: PingPong::new(width * (height + 1)),
            density: PingPong::new(cells * CHANNELS),
            pressure: vec![0.0; cells],
            divergence: vec![0.0; cells],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Lattice of the cell-centered fields.
    pub fn cells(&self) -> Lattice {
        Lattice {
            cols: self.width,
            rows: self.height,
        }
    }

    /// Lattice of the horizontal velocity component (one extra column).
    pub fn u_faces(&self) -> Lattice {
        Lattice {
            cols: self.width + 1,
            rows: self.height,
        }
    }

    /// Lattice of the vertical velocity component (one extra row).
    pub fn v_faces(&self) -> Lattice {
        Lattice {
            cols: self.width,
            rows: self.height + 1,
        }
    }

    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn u_index(&self, x: usize, y: usize) -> usize {
        y * (self.width + 1) + x
    }

    pub fn v_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// First channel of cell `(x, y)` in the density buffer.
    pub fn density_index(&self, x: usize, y: usize) -> usize {
        self.cell_index(x, y) * CHANNELS
    }

    pub fn vel_x(&self) -> &[f32] {
        self.vel_x.front()
    }

    pub fn vel_y(&self) -> &[f32] {
        self.vel_y.front()
    }

    pub fn density(&self) -> &[f32] {
        self.density.front()
    }

    pub fn pressure(&self) -> &[f32] {
        &self.pressure
    }

    pub fn divergence(&self) -> &[f32] {
        &self.divergence
    }

    pub fn vel_x_mut(&mut self) -> &mut [f32] {
        self.vel_x.front_mut()
    }

    pub fn vel_y_mut(&mut self) -> &mut [f32] {
        self.vel_y.front_mut()
    }

    pub fn density_mut(&mut self) -> &mut [f32] {
        self.density.front_mut()
    }

    pub fn pressure_mut(&mut self) -> &mut [f32] {
        &mut self.pressure
    }

    /// Zero every field.
    pub fn reset(&mut self) {
        self.vel_x.fill(0.0);
        self.vel_y.fill(0.0);
        self.density.fill(0.0);
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staggered_sizes() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.vel_x().len(), 6 * 3);
        assert_eq!(grid.vel_y().len(), 5 * 4);
        assert_eq!(grid.density().len(), 5 * 3 * CHANNELS);
        assert_eq!(grid.pressure().len(), 15);
        assert_eq!(grid.divergence().len(), 15);
    }

    #[test]
    fn ping_pong_split_and_swap() {
        let mut buf = PingPong::new(3);
        buf.front_mut().copy_from_slice(&[1.0, 2.0, 3.0]);
        {
            let (src, dst) = buf.split();
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s * 10.0;
            }
        }
        assert_eq!(buf.front(), &[1.0, 2.0, 3.0]);
        buf.swap();
        assert_eq!(buf.front(), &[10.0, 20.0, 30.0]);
        let (src, _) = buf.split();
        assert_eq!(src, &[10.0, 20.0, 30.0]);
    }

    #[test]
    #[should_panic(expected = "width")]
    fn zero_width_panics() {
        Grid::new(0, 4);
    }
}
