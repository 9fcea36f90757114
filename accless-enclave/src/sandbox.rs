// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Guest-memory services the engine needs from the executing sandbox.

/// Allocation and writes into sandbox linear memory.
///
/// Offsets are guest offsets, not native pointers. Allocations are owned by
/// the sandbox caller; the engine never frees them.
pub trait SandboxMemory {
    /// Allocate `len` bytes on the sandbox heap. `None` when the sandbox is
    /// out of memory.
    fn alloc(&mut self, len: usize) -> Option<u32>;

    /// Copy `data` into guest memory at `offset`.
    fn write(&mut self, offset: u32, data: &[u8]);

    /// Write a little-endian i32 into guest memory at `offset`.
    fn write_i32(&mut self, offset: u32, value: i32);
}
