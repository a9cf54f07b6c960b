//! # System Bus
//!
//! The bus is the only path between the CPU and memory. It is a thin
//! forwarding layer: [`Bus::read`] and [`Bus::write`] pass straight through
//! to the attached [`MemoryDevice`] and propagate its errors.
//!
//! Keeping this indirection (rather than letting the CPU own memory
//! directly) preserves the seam where an alternate backing store — a ROM
//! window, memory-mapped I/O — would later plug in.

use crate::memory::{Memory, MemoryDevice, MemoryError};
use thiserror::Error;

/// Errors raised by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// The bus was used before any memory was attached.
    #[error("bus has no attached memory")]
    NotAttached,

    /// The attached memory rejected the access.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Forwarding layer between the CPU and one attached memory device.
///
/// A new bus starts unattached; [`Bus::attach_memory`] binds a device and
/// rebinding drops the previous one (last writer wins). All accessors fail
/// with [`BusError::NotAttached`] until a device is attached.
///
/// # Examples
///
/// ```
/// use micro8::{Bus, BusError, Memory};
///
/// let mut bus: Bus<Memory> = Bus::new();
/// assert_eq!(bus.read(0x00), Err(BusError::NotAttached));
///
/// bus.attach_memory(Memory::new());
/// bus.write(0x10, 0x99).unwrap();
/// assert_eq!(bus.read(0x10).unwrap(), 0x99);
/// ```
#[derive(Debug, Clone)]
pub struct Bus<M = Memory> {
    memory: Option<M>,
}

impl<M: MemoryDevice> Bus<M> {
    /// Creates a bus with no attached memory.
    pub fn new() -> Self {
        Self { memory: None }
    }

    /// Attaches a memory device, dropping any previous binding.
    pub fn attach_memory(&mut self, memory: M) {
        self.memory = Some(memory);
    }

    /// Capacity of the attached memory.
    pub fn capacity(&self) -> Result<usize, BusError> {
        self.device().map(MemoryDevice::capacity)
    }

    /// Reads a byte through the attached memory.
    pub fn read(&self, addr: u16) -> Result<u8, BusError> {
        Ok(self.device()?.read(addr)?)
    }

    /// Writes a byte through the attached memory.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.device_mut()?.write(addr, value)?;
        Ok(())
    }

    /// Borrows the attached memory, if any. Intended for shells and tests
    /// that render or pre-seed the memory image.
    pub fn memory(&self) -> Option<&M> {
        self.memory.as_ref()
    }

    fn device(&self) -> Result<&M, BusError> {
        self.memory.as_ref().ok_or(BusError::NotAttached)
    }

    fn device_mut(&mut self) -> Result<&mut M, BusError> {
        self.memory.as_mut().ok_or(BusError::NotAttached)
    }
}

impl<M: MemoryDevice> Default for Bus<M> {
    fn default() -> Self {
        Self::new()
    }
}
