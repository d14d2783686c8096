//! The XRGB8888 frame buffer handed to the frontend every frame.

/// One XRGB8888 pixel, the top byte is ignored by the frontend.
pub type Pixel = u32;

pub const WIDTH: u32 = 256;
pub const HEIGHT: u32 = 240;

/// Bytes per row.
pub const PITCH: usize = WIDTH as usize * std::mem::size_of::<Pixel>();

pub const WHITE: Pixel = 0xFFFF_FFFF;

pub struct Framebuffer {
    data: Box<[Pixel]>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            data: vec![0; (WIDTH * HEIGHT) as usize].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self, pixel: Pixel) {
        self.data.fill(pixel);
    }

    /// Out of bounds coordinates are ignored.
    pub fn point(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < WIDTH && y < HEIGHT {
            self.data[(y * WIDTH + x) as usize] = pixel;
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < WIDTH && y < HEIGHT {
            Some(self.data[(y * WIDTH + x) as usize])
        } else {
            None
        }
    }

    /// Copies a `width` x `height` block of row-major `pixels` to `(x, y)`, clipped to
    /// the frame buffer.
    pub fn blit(&mut self, x: u32, y: u32, pixels: &[Pixel], width: u32, height: u32) {
        if width == 0 || x >= WIDTH || y >= HEIGHT {
            return;
        }

        let visible_width = (WIDTH - x).min(width) as usize;
        let visible_height = (HEIGHT - y).min(height) as usize;

        for (row, src) in pixels
            .chunks_exact(width as usize)
            .take(visible_height)
            .enumerate()
        {
            let start = (y as usize + row) * WIDTH as usize + x as usize;
            self.data[start..start + visible_width].copy_from_slice(&src[..visible_width]);
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// The frame as handed to the frontend, `PITCH * HEIGHT` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_view_matches_pitch() {
        let fb = Framebuffer::new();

        assert_eq!(PITCH, 1024);
        assert_eq!(fb.as_bytes().len(), PITCH * HEIGHT as usize);
    }

    #[test]
    fn clear_and_point() {
        let mut fb = Framebuffer::new();
        fb.clear(WHITE);
        fb.point(3, 2, 0x00FF_0000);
        fb.point(WIDTH, 0, 0);

        assert!(fb.pixels().iter().filter(|&&p| p != WHITE).eq([&0x00FF_0000]));
        assert_eq!(fb.get(3, 2), Some(0x00FF_0000));
        assert_eq!(fb.get(0, HEIGHT), None);

        // Rows are stored top to bottom
        let offset = 2 * PITCH + 3 * 4;
        assert_eq!(&fb.as_bytes()[offset..offset + 4], &0x00FF_0000u32.to_ne_bytes());
    }

    #[test]
    fn blit_clips_to_bounds() {
        let mut fb = Framebuffer::new();
        let block: Vec<Pixel> = (1..=16).collect();

        fb.blit(WIDTH - 2, HEIGHT - 3, &block, 4, 4);

        assert_eq!(fb.get(WIDTH - 2, HEIGHT - 3), Some(1));
        assert_eq!(fb.get(WIDTH - 1, HEIGHT - 3), Some(2));
        assert_eq!(fb.get(WIDTH - 2, HEIGHT - 1), Some(9));
        assert_eq!(fb.pixels().iter().filter(|&&p| p != 0).count(), 6);
    }

    #[test]
    fn blit_outside_is_ignored() {
        let mut fb = Framebuffer::new();
        fb.blit(WIDTH, 0, &[1; 4], 2, 2);
        fb.blit(0, HEIGHT, &[1; 4], 2, 2);

        assert!(fb.pixels().iter().all(|&p| p == 0));
    }
}
