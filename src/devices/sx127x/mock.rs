//! Simulated SX127x chip for testing
//!
//! `MockChip` emulates the register file, FIFO and IRQ behavior of the real
//! transceiver behind the `SpiInterface` trait, so the driver's full
//! register sequences run unmodified against it. Transmitted frames are
//! pushed onto an "airwave" queue; by default that queue loops back into the
//! chip's own receiver, and `MockChip::pair()` cross-links two chips for
//! two-node tests.
//!
//! Clones share state, so tests keep a clone as a probe after moving the
//! chip into a driver.

#![cfg(any(test, feature = "mock"))]

use crate::platform::{traits::SpiInterface, Result};
use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use super::registers::*;

type Airwave = Rc<RefCell<VecDeque<Vec<u8>>>>;

#[derive(Debug)]
struct ChipState {
    regs: [u8; 128],
    fifo: [u8; FIFO_SIZE],
    write_counts: [u16; 128],
    /// Register address latched by the last read command byte
    pending_read: Option<u8>,
    /// Flag the next delivered frame as failing the CRC check
    crc_error_next: bool,
    /// Never raise TX_DONE (for timeout tests)
    suppress_tx_done: bool,
    rssi_raw: u8,
    snr_raw: u8,
    tx_queue: Airwave,
    rx_queue: Airwave,
}

impl ChipState {
    fn new(tx_queue: Airwave, rx_queue: Airwave) -> Self {
        let mut regs = [0u8; 128];
        regs[REG_VERSION as usize] = CHIP_VERSION;
        regs[REG_LNA as usize] = 0x20;
        Self {
            regs,
            fifo: [0u8; FIFO_SIZE],
            write_counts: [0u16; 128],
            pending_read: None,
            crc_error_next: false,
            suppress_tx_done: false,
            rssi_raw: 97, // -60 dBm
            snr_raw: 40,  // +10 dB
            tx_queue,
            rx_queue,
        }
    }

    fn in_rx_mode(&self) -> bool {
        matches!(
            self.regs[REG_OP_MODE as usize] & MODE_MASK,
            MODE_RX_SINGLE | MODE_RX_CONTINUOUS
        )
    }

    fn rx_done_set(&self) -> bool {
        self.regs[REG_IRQ_FLAGS as usize] & IrqFlags::RX_DONE.bits() != 0
    }

    fn write_reg(&mut self, addr: u8, val: u8) {
        self.write_counts[addr as usize] += 1;
        match addr {
            REG_OP_MODE => {
                self.regs[REG_OP_MODE as usize] = val;
                match val & MODE_MASK {
                    MODE_TX => self.transmit(),
                    MODE_RX_SINGLE | MODE_RX_CONTINUOUS => self.try_deliver(),
                    _ => {}
                }
            }
            REG_IRQ_FLAGS => {
                // Write 1 to clear
                self.regs[REG_IRQ_FLAGS as usize] &= !val;
                if self.in_rx_mode() {
                    self.try_deliver();
                }
            }
            _ => self.regs[addr as usize] = val,
        }
    }

    /// Move the staged FIFO payload onto the airwave and finish the TX cycle
    fn transmit(&mut self) {
        let len = self.regs[REG_PAYLOAD_LEN as usize] as usize;
        let base = self.regs[REG_FIFO_TX_BASE as usize] as usize;
        let end = (base + len).min(FIFO_SIZE);
        let frame = self.fifo[base..end].to_vec();
        self.tx_queue.borrow_mut().push_back(frame);

        if !self.suppress_tx_done {
            self.regs[REG_IRQ_FLAGS as usize] |= IrqFlags::TX_DONE.bits();
            // The chip returns to standby after transmission
            self.regs[REG_OP_MODE as usize] = LORA_MODE_BIT | MODE_STANDBY;
        }
    }

    /// Deliver the next queued frame into the FIFO if the receiver is idle
    fn try_deliver(&mut self) {
        if self.rx_done_set() {
            return;
        }
        let frame = match self.rx_queue.borrow_mut().pop_front() {
            Some(frame) => frame,
            None => return,
        };

        let base = self.regs[REG_FIFO_RX_BASE as usize] as usize;
        let len = frame.len().min(FIFO_SIZE - base);
        self.fifo[base..base + len].copy_from_slice(&frame[..len]);

        self.regs[REG_RX_NB_BYTES as usize] = len as u8;
        self.regs[REG_FIFO_RX_CURRENT as usize] = base as u8;
        self.regs[REG_PKT_RSSI as usize] = self.rssi_raw;
        self.regs[REG_PKT_SNR as usize] = self.snr_raw;

        let mut irq = IrqFlags::RX_DONE;
        if self.crc_error_next {
            irq |= IrqFlags::CRC_ERROR;
            self.crc_error_next = false;
        }
        self.regs[REG_IRQ_FLAGS as usize] |= irq.bits();
    }
}

/// Simulated SX127x behind the SPI interface
#[derive(Clone, Debug)]
pub struct MockChip {
    state: Rc<RefCell<ChipState>>,
}

impl MockChip {
    /// Create a chip whose transmissions loop back into its own receiver
    pub fn new() -> Self {
        let airwave: Airwave = Rc::new(RefCell::new(VecDeque::new()));
        Self {
            state: Rc::new(RefCell::new(ChipState::new(airwave.clone(), airwave))),
        }
    }

    /// Create two chips wired to each other's receivers
    pub fn pair() -> (Self, Self) {
        let a_to_b: Airwave = Rc::new(RefCell::new(VecDeque::new()));
        let b_to_a: Airwave = Rc::new(RefCell::new(VecDeque::new()));
        let a = Self {
            state: Rc::new(RefCell::new(ChipState::new(a_to_b.clone(), b_to_a.clone()))),
        };
        let b = Self {
            state: Rc::new(RefCell::new(ChipState::new(b_to_a, a_to_b))),
        };
        (a, b)
    }

    /// Read a register directly (for test verification)
    pub fn register(&self, addr: u8) -> u8 {
        self.state.borrow().regs[(addr & 0x7F) as usize]
    }

    /// Number of SPI writes observed for a register
    pub fn write_count(&self, addr: u8) -> u16 {
        self.state.borrow().write_counts[(addr & 0x7F) as usize]
    }

    /// Override the version register (for identity-check tests)
    pub fn set_version(&self, version: u8) {
        self.state.borrow_mut().regs[REG_VERSION as usize] = version;
    }

    /// Queue a frame for reception, as if a remote node transmitted it
    pub fn inject_frame(&self, frame: &[u8]) {
        let state = self.state.borrow();
        state.rx_queue.borrow_mut().push_back(frame.to_vec());
    }

    /// Most recent frame this chip put on the air (for test verification)
    pub fn last_transmitted(&self) -> Option<Vec<u8>> {
        let state = self.state.borrow();
        let queue = state.tx_queue.borrow();
        queue.back().cloned()
    }

    /// Flag the next delivered frame as failing its CRC check
    pub fn set_crc_error_next(&self, enabled: bool) {
        self.state.borrow_mut().crc_error_next = enabled;
    }

    /// Suppress TX_DONE so transmissions appear to hang
    pub fn set_suppress_tx_done(&self, enabled: bool) {
        self.state.borrow_mut().suppress_tx_done = enabled;
    }

    /// Set the raw RSSI/SNR register values reported for packets
    pub fn set_signal(&self, rssi_raw: u8, snr_raw: u8) {
        let mut state = self.state.borrow_mut();
        state.rssi_raw = rssi_raw;
        state.snr_raw = snr_raw;
        state.regs[REG_PKT_RSSI as usize] = rssi_raw;
        state.regs[REG_PKT_SNR as usize] = snr_raw;
    }
}

impl Default for MockChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiInterface for MockChip {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let Some((&cmd, payload)) = data.split_first() else {
            return Ok(());
        };

        if cmd & 0x80 != 0 {
            let addr = cmd & 0x7F;
            if addr == REG_FIFO {
                // Burst write through the FIFO data register
                for &byte in payload {
                    let ptr = state.regs[REG_FIFO_ADDR_PTR as usize];
                    state.fifo[ptr as usize] = byte;
                    state.regs[REG_FIFO_ADDR_PTR as usize] = ptr.wrapping_add(1);
                    state.write_counts[REG_FIFO as usize] += 1;
                }
            } else {
                for &byte in payload {
                    state.write_reg(addr, byte);
                }
            }
        } else {
            state.pending_read = Some(cmd & 0x7F);
        }
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        match state.pending_read.take() {
            Some(REG_FIFO) => {
                for byte in buffer.iter_mut() {
                    let ptr = state.regs[REG_FIFO_ADDR_PTR as usize];
                    *byte = state.fifo[ptr as usize];
                    state.regs[REG_FIFO_ADDR_PTR as usize] = ptr.wrapping_add(1);
                }
            }
            Some(addr) => {
                // A packet queued while the chip was already listening is
                // delivered when the host next inspects the IRQ flags.
                if addr == REG_IRQ_FLAGS && state.in_rx_mode() && !state.rx_done_set() {
                    state.try_deliver();
                }
                let value = state.regs[(addr & 0x7F) as usize];
                for byte in buffer.iter_mut() {
                    *byte = value;
                }
            }
            None => {
                for byte in buffer.iter_mut() {
                    *byte = 0;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_chip_register_write() {
        let mut chip = MockChip::new();
        chip.write(&[REG_SYNC_WORD | 0x80, 0x34]).unwrap();
        assert_eq!(chip.register(REG_SYNC_WORD), 0x34);
        assert_eq!(chip.write_count(REG_SYNC_WORD), 1);
    }

    #[test]
    fn test_mock_chip_register_read() {
        let mut chip = MockChip::new();
        let mut buf = [0u8; 1];
        chip.write(&[REG_VERSION]).unwrap();
        chip.read(&mut buf).unwrap();
        assert_eq!(buf[0], CHIP_VERSION);
    }

    #[test]
    fn test_mock_chip_irq_write_one_to_clear() {
        let mut chip = MockChip::new();
        chip.state.borrow_mut().regs[REG_IRQ_FLAGS as usize] = 0x48;
        chip.write(&[REG_IRQ_FLAGS | 0x80, 0x40]).unwrap();
        assert_eq!(chip.register(REG_IRQ_FLAGS), 0x08);
    }
}
