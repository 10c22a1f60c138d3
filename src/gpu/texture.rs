//! Offscreen render targets and CPU readback.

use crate::error::SplatterError;

/// Bytes per texel of the formats [`RenderTarget::read_rgba8`] accepts.
const RGBA8_TEXEL_SIZE: u32 = 4;

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | COPY_SRC` so a frame can be drawn
/// offscreen and read back.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Texture format.
    pub format: wgpu::TextureFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Tightly packed RGBA8 pixels read back from a [`RenderTarget`], row 0 at
/// the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadbackImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` pixels, row-major.
    pub pixels: Vec<[u8; 4]>,
}

impl ReadbackImage {
    /// Pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Pixel at the image center.
    #[must_use]
    pub fn center(&self) -> Option<[u8; 4]> {
        self.pixel(self.width / 2, self.height / 2)
    }
}

/// Row pitch for a texture copy, padded to
/// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`].
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * RGBA8_TEXEL_SIZE;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Formats whose texels read back byte-for-byte as RGBA.
fn is_rgba8(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb
    )
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and
    /// format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("RenderTarget"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            format,
            width,
            height,
        }
    }

    /// Copy the whole texture into CPU memory, blocking until the GPU is
    /// done.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Readback`] if the format is not RGBA8
    /// (linear or sRGB) or buffer mapping fails.
    pub fn read_rgba8(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<ReadbackImage, SplatterError> {
        if !is_rgba8(self.format) {
            return Err(SplatterError::Readback(format!(
                "unsupported readback format {:?}",
                self.format
            )));
        }

        let unpadded = (self.width * RGBA8_TEXEL_SIZE) as usize;
        let padded = padded_bytes_per_row(self.width);
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Staging Buffer"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        let _ = queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| SplatterError::Readback(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| SplatterError::Readback(e.to_string()))?
            .map_err(|e| SplatterError::Readback(e.to_string()))?;

        let data = slice.get_mapped_range();
        let mut pixels =
            Vec::with_capacity((self.width * self.height) as usize);
        for row in data.chunks_exact(padded as usize) {
            pixels.extend(
                row[..unpadded]
                    .chunks_exact(RGBA8_TEXEL_SIZE as usize)
                    .map(|texel| [texel[0], texel[1], texel[2], texel[3]]),
            );
        }
        drop(data);
        staging.unmap();

        Ok(ReadbackImage {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn readback_accepts_only_rgba8() {
        assert!(is_rgba8(wgpu::TextureFormat::Rgba8Unorm));
        assert!(is_rgba8(wgpu::TextureFormat::Rgba8UnormSrgb));
        assert!(!is_rgba8(wgpu::TextureFormat::Bgra8Unorm));
        assert!(!is_rgba8(wgpu::TextureFormat::R32Float));
        assert!(!is_rgba8(wgpu::TextureFormat::Rgba16Float));
    }

    #[test]
    fn pixel_lookup_is_row_major() {
        let image = ReadbackImage {
            width: 2,
            height: 2,
            pixels: vec![[1; 4], [2; 4], [3; 4], [4; 4]],
        };
        assert_eq!(image.pixel(1, 0), Some([2; 4]));
        assert_eq!(image.pixel(0, 1), Some([3; 4]));
        assert_eq!(image.center(), Some([4; 4]));
        assert_eq!(image.pixel(2, 0), None);
    }
}
