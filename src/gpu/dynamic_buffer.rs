//! Growable typed GPU buffers.
//!
//! Instance data changes size from frame to frame. Buffers grow 2x when the
//! data no longer fits and are rewritten in place otherwise. They never
//! shrink.

use std::marker::PhantomData;

/// Smallest allocation in bytes.
const MIN_CAPACITY: usize = 64;

/// Byte capacity to allocate for `needed` bytes given the current capacity.
///
/// 2x growth, at least 1 KiB more than before.
fn grown_capacity(needed: usize, current: usize) -> usize {
    (needed * 2).max(current + 1024)
}

/// A GPU buffer holding a packed array of `T`, reallocated on overflow.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity_bytes: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity_bytes = (size_of::<T>() * capacity).max(MIN_CAPACITY);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity_bytes as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity_bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write `data` from offset 0, growing the buffer if it does not fit.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups or cached
    /// slices referring to the old buffer must be recreated).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let reallocated = bytes.len() > self.capacity_bytes;
        if reallocated {
            let capacity_bytes =
                grown_capacity(bytes.len(), self.capacity_bytes);
            log::debug!(
                "Growing buffer '{}' from {} to {} bytes",
                self.label,
                self.capacity_bytes,
                capacity_bytes
            );
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: capacity_bytes as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity_bytes = capacity_bytes;
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// Slice covering only the items written last.
    #[must_use]
    pub fn used_slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..(self.count * size_of::<T>()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_large_writes() {
        assert_eq!(grown_capacity(48_000, 4_800), 96_000);
    }

    #[test]
    fn growth_adds_at_least_one_kib() {
        assert_eq!(grown_capacity(100, 64), 1088);
    }
}
