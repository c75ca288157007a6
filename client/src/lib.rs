// Licensed under the Apache-2.0 license

//! Runtime register access on top of a compiled register map.
//!
//! [`RegisterClient`] consumes the compiled map's facts (address ceiling,
//! per-address access modes) and enforces them before delegating to a
//! [`RegisterTransport`]. The transport carries the actual protocol: serial
//! RTU, TCP, a test double — this crate never frames a wire message itself.

use anyhow::{bail, Result};
use regmap_generator::{AccessMode, RegisterMap};

/// The protocol seam: reads and writes runs of 16-bit registers.
///
/// Implementations map straight onto holding-register access of the target
/// protocol; `write_registers` returns the number of registers written.
pub trait RegisterTransport {
    fn read_registers(&mut self, start: u16, count: u16) -> Result<Vec<u16>>;
    fn write_registers(&mut self, start: u16, values: &[u16]) -> Result<u16>;
}

/// A transport wrapper that checks every access against the compiled map
/// before letting it on the wire.
pub struct RegisterClient<T> {
    transport: T,
    last_address: u16,
    /// Access mode per address, dense over `0..=last_address`. Reserved and
    /// unused addresses are read-only, mirroring the generated tables.
    modes: Vec<AccessMode>,
}

impl<T: RegisterTransport> RegisterClient<T> {
    pub fn new(transport: T, map: &RegisterMap) -> Self {
        let mut modes = vec![AccessMode::ReadOnly; map.register_count as usize];
        for reg in &map.registers {
            if !reg.is_reserved() {
                modes[reg.address as usize] = reg.mode;
            }
        }
        Self {
            transport,
            last_address: map.last_address,
            modes,
        }
    }

    fn check_span(&self, start: u16, count: u16) -> Result<()> {
        if count == 0 {
            bail!("register span is empty");
        }
        let end = start as u32 + count as u32 - 1;
        if end > self.last_address as u32 {
            bail!(
                "register span {:#x}..={:#x} exceeds last address {:#x}",
                start,
                end,
                self.last_address
            );
        }
        Ok(())
    }

    /// Reads `count` registers starting at `start`.
    pub fn read(&mut self, start: u16, count: u16) -> Result<Vec<u16>> {
        self.check_span(start, count)?;
        // Inclusive bound: a span ending at 0xFFFF must not overflow u16.
        for addr in start..=start + (count - 1) {
            if !self.modes[addr as usize].can_read() {
                bail!("register {addr:#x} is not readable");
            }
        }
        self.transport.read_registers(start, count)
    }

    /// Writes `values` starting at `start`; returns the written count.
    pub fn write(&mut self, start: u16, values: &[u16]) -> Result<u16> {
        if values.len() > u16::MAX as usize {
            bail!("register span is too long");
        }
        let count = values.len() as u16;
        self.check_span(start, count)?;
        for addr in start..=start + (count - 1) {
            if !self.modes[addr as usize].can_write() {
                bail!("register {addr:#x} is not writable");
            }
        }
        self.transport.write_registers(start, values)
    }
}
