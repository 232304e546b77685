// src/hal/types.rs
//! Core types for the waveform-generator abstraction

use std::fmt;
use thiserror::Error;

/// One of the four output channels of the generator.
///
/// Channel numbers are 1-based everywhere a human sees them (command
/// suffixes, the display); [`Channel::index`] gives the 0-based table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ch1 = 1,
    Ch2 = 2,
    Ch3 = 3,
    Ch4 = 4,
}

/// Rejected channel number, reported as a bad command suffix upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel number {0} outside 1-4")]
pub struct InvalidChannel(pub i32);

impl Channel {
    /// All channels in display order.
    pub const ALL: [Channel; 4] = [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4];

    /// 1-based channel number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// 0-based index into per-channel tables.
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<i32> for Channel {
    type Error = InvalidChannel;

    fn try_from(number: i32) -> Result<Self, InvalidChannel> {
        match number {
            1 => Ok(Channel::Ch1),
            2 => Ok(Channel::Ch2),
            3 => Ok(Channel::Ch3),
            4 => Ok(Channel::Ch4),
            other => Err(InvalidChannel(other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{}", self.number())
    }
}
