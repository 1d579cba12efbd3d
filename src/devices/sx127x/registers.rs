//! SX127x Register Definitions
//!
//! Register addresses, op-mode bits and modem constants for the
//! SX1276/77/78/79 family in LoRa mode. Only the registers this driver
//! touches are listed.

use bitflags::bitflags;

// =============================================================================
// Register addresses
// =============================================================================

/// FIFO read/write access
pub const REG_FIFO: u8 = 0x00;

/// Operating mode and LoRa/FSK selection
pub const REG_OP_MODE: u8 = 0x01;

/// RF carrier frequency, most significant byte
pub const REG_FRF_MSB: u8 = 0x06;

/// RF carrier frequency, middle byte
pub const REG_FRF_MID: u8 = 0x07;

/// RF carrier frequency, least significant byte
pub const REG_FRF_LSB: u8 = 0x08;

/// Power amplifier configuration
pub const REG_PA_CONFIG: u8 = 0x09;

/// Over-current protection control
pub const REG_OCP: u8 = 0x0B;

/// Low-noise amplifier settings
pub const REG_LNA: u8 = 0x0C;

/// FIFO SPI access pointer
pub const REG_FIFO_ADDR_PTR: u8 = 0x0D;

/// Start address of the TX buffer within the FIFO
pub const REG_FIFO_TX_BASE: u8 = 0x0E;

/// Start address of the RX buffer within the FIFO
pub const REG_FIFO_RX_BASE: u8 = 0x0F;

/// Start address of the last packet received
pub const REG_FIFO_RX_CURRENT: u8 = 0x10;

/// Interrupt flags (write 1 to clear)
pub const REG_IRQ_FLAGS: u8 = 0x12;

/// Number of payload bytes of the last packet received
pub const REG_RX_NB_BYTES: u8 = 0x13;

/// SNR of the last packet received
pub const REG_PKT_SNR: u8 = 0x19;

/// RSSI of the last packet received
pub const REG_PKT_RSSI: u8 = 0x1A;

/// Modem configuration 1 (bandwidth, coding rate, header mode)
pub const REG_MODEM_CFG1: u8 = 0x1D;

/// Modem configuration 2 (spreading factor, CRC enable)
pub const REG_MODEM_CFG2: u8 = 0x1E;

/// Preamble length, most significant byte
pub const REG_PREAMBLE_MSB: u8 = 0x20;

/// Preamble length, least significant byte
pub const REG_PREAMBLE_LSB: u8 = 0x21;

/// Payload length for transmission
pub const REG_PAYLOAD_LEN: u8 = 0x22;

/// Modem configuration 3 (AGC, low data rate optimize)
pub const REG_MODEM_CFG3: u8 = 0x26;

/// LoRa sync word
pub const REG_SYNC_WORD: u8 = 0x39;

/// DIO0..DIO3 pin mapping
pub const REG_DIO_MAPPING1: u8 = 0x40;

/// Chip silicon revision
pub const REG_VERSION: u8 = 0x42;

// =============================================================================
// Op-mode bits
// =============================================================================

/// LoRa (as opposed to FSK/OOK) mode selector, OR'ed into every mode write
pub const LORA_MODE_BIT: u8 = 0x80;

/// Mask for the mode field of RegOpMode
pub const MODE_MASK: u8 = 0x07;

pub const MODE_SLEEP: u8 = 0x00;
pub const MODE_STANDBY: u8 = 0x01;
pub const MODE_TX: u8 = 0x03;
pub const MODE_RX_CONTINUOUS: u8 = 0x05;
pub const MODE_RX_SINGLE: u8 = 0x06;

// =============================================================================
// Interrupt flags
// =============================================================================

bitflags! {
    /// RegIrqFlags contents. The register is write-1-to-clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags: u8 {
        const CAD_DETECTED = 0x01;
        const FHSS_CHANGE_CHANNEL = 0x02;
        const CAD_DONE = 0x04;
        const TX_DONE = 0x08;
        const VALID_HEADER = 0x10;
        const CRC_ERROR = 0x20;
        const RX_DONE = 0x40;
        const RX_TIMEOUT = 0x80;
    }
}

// =============================================================================
// Modem constants
// =============================================================================

/// Crystal oscillator frequency in Hz
pub const FXOSC_HZ: u64 = 32_000_000;

/// Denominator of the frequency synthesizer step (FSTEP = FXOSC / 2^19)
pub const FRF_DIVISOR_SHIFT: u32 = 19;

/// Expected RegVersion value for the SX1276/77/78/79 silicon revision
pub const CHIP_VERSION: u8 = 0x12;

/// Offset subtracted from RegPktRssiValue to obtain dBm (high-frequency port)
pub const RSSI_OFFSET_DBM: i16 = 157;

/// Largest payload the 8-bit payload-length register can describe
pub const MAX_PAYLOAD_LEN: usize = 255;

/// FIFO size in bytes
pub const FIFO_SIZE: usize = 256;
