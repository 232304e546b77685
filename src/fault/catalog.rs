// src/fault/catalog.rs
//! Prioritized error-code catalog shared by every subsystem
//!
//! Faults from the protocol layer, the generic validation helpers and the
//! waveform-generator driver are all funneled into one integer code space:
//! `100 * priority + index`, where the priority partitions the space between
//! subsystems and the index is 1-based within that subsystem's table. The
//! single exception is the generic "no error" code, which is the literal
//! value 0 and sits at index 0 of the generic table.
//!
//! Priorities only partition the numbering; they do not affect delivery
//! order. A fourth subsystem slots in as `max priority + 1` without touching
//! existing codes.

use std::fmt;

/// Code-space priority of the protocol (remote command) layer.
pub const PROTOCOL_PRIORITY: u16 = 1;
/// Code-space priority of the generic validation layer.
pub const GENERIC_PRIORITY: u16 = 2;
/// Code-space priority of the waveform-generator hardware driver.
pub const HARDWARE_PRIORITY: u16 = 3;

const PROTOCOL_MESSAGES: [&str; 3] = ["Unknown Cmd", "Timeout", "Buffer Ovf"];

// Index 0 is the "No Error" entry, so lookups into this table do not
// decrement the index.
const GENERIC_MESSAGES: [&str; 6] = [
    "No Error",
    "Too many Params",
    "Too few Params",
    "Unknown Param",
    "Out of Range",
    "Bad Channel Num",
];

const HARDWARE_MESSAGES: [&str; 6] = [
    "Mem Read Fail",
    "Odd Addr Err",
    "Short Period",
    "Short DOUT",
    "Short Pat Dly",
    "Large DOUT",
];

/// Prioritized integer error code: `100 * priority + index`.
///
/// Codes are what travels through the [`FaultQueue`](crate::fault::FaultQueue)
/// and what the remote protocol reports; they decode uniquely back to
/// (priority, index) by division and remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// The "no error" code, reported when the queue is empty.
    pub const NONE: ErrorCode = ErrorCode(0);

    /// Raw integer value as surfaced to the remote caller.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Subsystem priority encoded in the code.
    pub fn priority(self) -> u16 {
        self.0 / 100
    }

    /// 1-based index within the subsystem table (0 only for [`Self::NONE`]).
    pub fn index(self) -> u16 {
        self.0 % 100
    }

    /// True for the "no error" code.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Faults raised by the remote protocol tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolFault {
    UnknownCommand,
    Timeout,
    BufferOverflow,
}

/// Faults raised by request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericFault {
    None,
    TooManyParams,
    TooFewParams,
    UnknownParam,
    ParamOutOfRange,
    BadChannel,
}

/// Faults reported by the waveform-generator chip after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFault {
    MemReadFail,
    OddAddress,
    ShortPeriod,
    ShortDoutStart,
    ShortPatternDelay,
    LongDoutStart,
}

/// A fault from any subsystem, tagged with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Protocol(ProtocolFault),
    Generic(GenericFault),
    Hardware(HardwareFault),
}

impl From<ProtocolFault> for Fault {
    fn from(fault: ProtocolFault) -> Self {
        Fault::Protocol(fault)
    }
}

impl From<GenericFault> for Fault {
    fn from(fault: GenericFault) -> Self {
        Fault::Generic(fault)
    }
}

impl From<HardwareFault> for Fault {
    fn from(fault: HardwareFault) -> Self {
        Fault::Hardware(fault)
    }
}

/// Encode a fault into its prioritized integer code.
pub fn encode(fault: Fault) -> ErrorCode {
    match fault {
        Fault::Protocol(f) => {
            let index = match f {
                ProtocolFault::UnknownCommand => 1,
                ProtocolFault::Timeout => 2,
                ProtocolFault::BufferOverflow => 3,
            };
            ErrorCode(100 * PROTOCOL_PRIORITY + index)
        }
        Fault::Generic(GenericFault::None) => ErrorCode::NONE,
        Fault::Generic(f) => {
            let index = match f {
                GenericFault::None => unreachable!("handled above"),
                GenericFault::TooManyParams => 1,
                GenericFault::TooFewParams => 2,
                GenericFault::UnknownParam => 3,
                GenericFault::ParamOutOfRange => 4,
                GenericFault::BadChannel => 5,
            };
            ErrorCode(100 * GENERIC_PRIORITY + index)
        }
        Fault::Hardware(f) => {
            let index = match f {
                HardwareFault::MemReadFail => 1,
                HardwareFault::OddAddress => 2,
                HardwareFault::ShortPeriod => 3,
                HardwareFault::ShortDoutStart => 4,
                HardwareFault::ShortPatternDelay => 5,
                HardwareFault::LongDoutStart => 6,
            };
            ErrorCode(100 * HARDWARE_PRIORITY + index)
        }
    }
}

/// Human-readable message for a code produced by [`encode`].
///
/// A code outside the catalog is a programming error: debug builds assert,
/// release builds return an empty string.
pub fn message(code: ErrorCode) -> &'static str {
    if code.is_none() {
        return GENERIC_MESSAGES[0];
    }
    let index = code.index() as usize;
    match code.priority() {
        PROTOCOL_PRIORITY if (1..=PROTOCOL_MESSAGES.len()).contains(&index) => {
            PROTOCOL_MESSAGES[index - 1]
        }
        // "No Error" occupies index 0, so generic indices are not decremented.
        GENERIC_PRIORITY if (1..GENERIC_MESSAGES.len()).contains(&index) => GENERIC_MESSAGES[index],
        HARDWARE_PRIORITY if (1..=HARDWARE_MESSAGES.len()).contains(&index) => {
            HARDWARE_MESSAGES[index - 1]
        }
        _ => {
            debug_assert!(false, "unmapped error code {code}");
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FAULTS: [Fault; 14] = [
        Fault::Protocol(ProtocolFault::UnknownCommand),
        Fault::Protocol(ProtocolFault::Timeout),
        Fault::Protocol(ProtocolFault::BufferOverflow),
        Fault::Generic(GenericFault::TooManyParams),
        Fault::Generic(GenericFault::TooFewParams),
        Fault::Generic(GenericFault::UnknownParam),
        Fault::Generic(GenericFault::ParamOutOfRange),
        Fault::Generic(GenericFault::BadChannel),
        Fault::Hardware(HardwareFault::MemReadFail),
        Fault::Hardware(HardwareFault::OddAddress),
        Fault::Hardware(HardwareFault::ShortPeriod),
        Fault::Hardware(HardwareFault::ShortDoutStart),
        Fault::Hardware(HardwareFault::ShortPatternDelay),
        Fault::Hardware(HardwareFault::LongDoutStart),
    ];

    #[test]
    fn test_encode_decode_round_trip() {
        for fault in ALL_FAULTS {
            let code = encode(fault);
            let rebuilt = 100 * code.priority() + code.index();
            assert_eq!(rebuilt, code.raw(), "{fault:?}");
            assert!((1..=3).contains(&code.priority()), "{fault:?}");
            assert!(code.index() >= 1, "{fault:?}");
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<u16> = ALL_FAULTS.iter().map(|&f| encode(f).raw()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL_FAULTS.len());
    }

    #[test]
    fn test_no_error_encodes_to_zero() {
        let code = encode(Fault::Generic(GenericFault::None));
        assert_eq!(code, ErrorCode::NONE);
        assert!(code.is_none());
        assert_eq!(message(code), "No Error");
    }

    #[test]
    fn test_known_code_values() {
        assert_eq!(encode(ProtocolFault::UnknownCommand.into()).raw(), 101);
        assert_eq!(encode(GenericFault::TooManyParams.into()).raw(), 201);
        assert_eq!(encode(GenericFault::ParamOutOfRange.into()).raw(), 204);
        assert_eq!(encode(GenericFault::BadChannel.into()).raw(), 205);
        assert_eq!(encode(HardwareFault::MemReadFail.into()).raw(), 301);
        assert_eq!(encode(HardwareFault::LongDoutStart.into()).raw(), 306);
    }

    #[test]
    fn test_messages() {
        assert_eq!(message(encode(GenericFault::ParamOutOfRange.into())), "Out of Range");
        assert_eq!(message(encode(ProtocolFault::BufferOverflow.into())), "Buffer Ovf");
        assert_eq!(message(encode(HardwareFault::OddAddress.into())), "Odd Addr Err");
        for fault in ALL_FAULTS {
            assert!(!message(encode(fault)).is_empty(), "{fault:?}");
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_unmapped_code_is_empty_in_release() {
        assert_eq!(message(ErrorCode(999)), "");
    }

    #[test]
    fn test_display_prints_raw_value() {
        let code = encode(GenericFault::ParamOutOfRange.into());
        assert_eq!(code.to_string(), "204");
    }
}
